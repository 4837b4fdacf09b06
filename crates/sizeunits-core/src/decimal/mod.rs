//! Arbitrary-precision decimals with signed infinity
//!
//! [`Decimal`] is the numeric type behind every quantity. Finite values carry
//! [`PRECISION`] significant digits, and anything at or beyond
//! `10^1000` in magnitude saturates to `∞` (or `-∞`). All arithmetic has a
//! `checked_*` form returning [`DecimalError::InvalidOperation`] for undefined
//! combinations such as `∞ × 0`; the operator traits panic in those cases.
//!
//! ```
//! use sizeunits_core::Decimal;
//!
//! let two: Decimal = "2".parse().unwrap();
//! assert_eq!(&two / &Decimal::INFINITY, Decimal::zero());
//! assert_eq!(&two << &Decimal::INFINITY, Decimal::INFINITY);
//! assert_eq!(format!("{}", Decimal::NEG_INFINITY), "-∞");
//! ```

mod format;

pub use format::{
    accuracy_note, format_fraction, round_fraction, split_fraction, Align, DecimalSpec, SignOption,
};

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecimalError;

/// Significant digits kept by finite results
pub const PRECISION: u64 = 100;

/// Finite magnitudes at or above `10^OVERFLOW_EXPONENT` become infinite
pub const OVERFLOW_EXPONENT: i64 = 1000;

/// Plain (non-exponent) rendering is used inside this decimal exponent range
const PLAIN_EXPONENT_LIMIT: i64 = 40;

/// Largest bit shift performed exactly; beyond it the result saturates
const MAX_SHIFT: u64 = 3400;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Decimal {
    Finite(BigDecimal),
    PosInfinity,
    NegInfinity,
}

impl Decimal {
    pub const INFINITY: Decimal = Decimal::PosInfinity;
    pub const NEG_INFINITY: Decimal = Decimal::NegInfinity;

    pub fn zero() -> Self {
        Decimal::Finite(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Decimal::Finite(BigDecimal::one())
    }

    /// Infinity with the given sign
    pub fn infinity(negative: bool) -> Self {
        if negative {
            Decimal::NegInfinity
        } else {
            Decimal::PosInfinity
        }
    }

    /// Wrap a raw decimal, applying precision and overflow limits
    pub fn from_big(value: BigDecimal) -> Self {
        if value.is_zero() {
            return Decimal::zero();
        }
        let magnitude = value.order_of_magnitude();
        if magnitude >= OVERFLOW_EXPONENT {
            return Decimal::infinity(value.is_negative());
        }
        if magnitude <= -OVERFLOW_EXPONENT {
            return Decimal::zero();
        }
        Decimal::Finite(limit_precision(value))
    }

    pub fn from_bigint(value: BigInt) -> Self {
        Decimal::from_big(BigDecimal::from(value))
    }

    /// Convert from a float via its shortest round-trip text
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        if value.is_infinite() {
            return Some(Decimal::infinity(value < 0.0));
        }
        format!("{value:e}").parse::<BigDecimal>().ok().map(Decimal::from_big)
    }

    pub fn as_big(&self) -> Option<&BigDecimal> {
        match self {
            Decimal::Finite(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Decimal::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Decimal::Finite(value) if value.is_zero())
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Decimal::Finite(value) => value.is_negative(),
            Decimal::PosInfinity => false,
            Decimal::NegInfinity => true,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Decimal::Finite(value) if value.is_integer())
    }

    /// `"-"` for negative values, otherwise empty
    pub fn sign(&self) -> &'static str {
        if self.is_negative() {
            "-"
        } else {
            ""
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Decimal::Finite(value) => value.to_f64().unwrap_or(f64::NAN),
            Decimal::PosInfinity => f64::INFINITY,
            Decimal::NegInfinity => f64::NEG_INFINITY,
        }
    }

    pub fn abs(&self) -> Decimal {
        match self {
            Decimal::Finite(value) => Decimal::Finite(value.abs()),
            _ => Decimal::PosInfinity,
        }
    }

    /// Round half-even to `places` decimal places
    pub fn round_dp(&self, places: i64) -> Decimal {
        self.map_finite(|value| value.with_scale_round(places, RoundingMode::HalfEven))
    }

    pub fn trunc(&self) -> Decimal {
        self.map_finite(|value| value.with_scale_round(0, RoundingMode::Down))
    }

    pub fn floor(&self) -> Decimal {
        self.map_finite(|value| value.with_scale_round(0, RoundingMode::Floor))
    }

    pub fn ceil(&self) -> Decimal {
        self.map_finite(|value| value.with_scale_round(0, RoundingMode::Ceiling))
    }

    /// Strip trailing zeros without switching to exponent form
    pub fn fix_zeroes(&self) -> Decimal {
        match self {
            Decimal::Finite(value) => Decimal::Finite(fix_zeroes(value)),
            other => other.clone(),
        }
    }

    fn map_finite(&self, f: impl FnOnce(&BigDecimal) -> BigDecimal) -> Decimal {
        match self {
            Decimal::Finite(value) => Decimal::from_big(f(value)),
            other => other.clone(),
        }
    }

    pub fn checked_add(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        use Decimal::*;
        match (self, other) {
            (Finite(a), Finite(b)) => Ok(Decimal::from_big(a + b)),
            (PosInfinity, NegInfinity) | (NegInfinity, PosInfinity) => {
                Err(DecimalError::InvalidOperation("∞ + -∞"))
            }
            (inf @ (PosInfinity | NegInfinity), _) | (_, inf @ (PosInfinity | NegInfinity)) => {
                Ok(inf.clone())
            }
        }
    }

    /// Subtraction; two infinities of the same sign cancel to zero
    pub fn checked_sub(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        use Decimal::*;
        match (self, other) {
            (Finite(a), Finite(b)) => Ok(Decimal::from_big(a - b)),
            (PosInfinity, PosInfinity) | (NegInfinity, NegInfinity) => Ok(Decimal::zero()),
            (inf @ (PosInfinity | NegInfinity), _) => Ok(inf.clone()),
            (_, inf) => Ok(-inf),
        }
    }

    pub fn checked_mul(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        match (self, other) {
            (Decimal::Finite(a), Decimal::Finite(b)) => Ok(Decimal::from_big(a * b)),
            (a, b) if a.is_zero() || b.is_zero() => Err(DecimalError::InvalidOperation("∞ × 0")),
            (a, b) => Ok(Decimal::infinity(a.is_negative() != b.is_negative())),
        }
    }

    /// Division; a non-zero value divided by zero is a signed infinity
    pub fn checked_div(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        use Decimal::*;
        match (self, other) {
            (PosInfinity | NegInfinity, PosInfinity | NegInfinity) => {
                Err(DecimalError::InvalidOperation("∞ / ∞"))
            }
            (a @ (PosInfinity | NegInfinity), b) => {
                Ok(Decimal::infinity(a.is_negative() != b.is_negative()))
            }
            (Finite(_), PosInfinity | NegInfinity) => Ok(Decimal::zero()),
            (Finite(a), Finite(b)) if b.is_zero() => {
                if a.is_zero() {
                    Err(DecimalError::InvalidOperation("0 / 0"))
                } else {
                    Ok(Decimal::infinity(a.is_negative()))
                }
            }
            (Finite(a), Finite(b)) => Ok(Decimal::from_big(a / b)),
        }
    }

    /// Division truncated toward zero
    pub fn checked_trunc_div(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        match (self, other) {
            (Decimal::Finite(a), Decimal::Finite(b)) if !b.is_zero() => {
                let (a, b) = aligned_ints(a, b);
                Ok(Decimal::from_bigint(a / b))
            }
            _ => self.checked_div(other),
        }
    }

    /// Remainder with the sign of the dividend
    pub fn checked_rem(&self, other: &Decimal) -> Result<Decimal, DecimalError> {
        match (self, other) {
            (Decimal::PosInfinity | Decimal::NegInfinity, _) => Ok(Decimal::zero()),
            (Decimal::Finite(_), Decimal::PosInfinity | Decimal::NegInfinity) => Ok(self.clone()),
            (Decimal::Finite(_), Decimal::Finite(b)) if b.is_zero() => {
                Err(DecimalError::InvalidOperation("x % 0"))
            }
            (Decimal::Finite(a), Decimal::Finite(b)) => Ok(Decimal::from_big(a % b)),
        }
    }

    /// Truncated quotient and remainder in one call
    pub fn checked_divmod(&self, other: &Decimal) -> Result<(Decimal, Decimal), DecimalError> {
        Ok((self.checked_trunc_div(other)?, self.checked_rem(other)?))
    }

    pub fn checked_pow(&self, exponent: &Decimal) -> Result<Decimal, DecimalError> {
        use Decimal::*;
        if exponent.is_zero() {
            if self.is_zero() {
                return Err(DecimalError::InvalidOperation("0 ** 0"));
            }
            return Ok(Decimal::one());
        }
        match (self, exponent) {
            (PosInfinity | NegInfinity, PosInfinity) => Ok(PosInfinity),
            (PosInfinity | NegInfinity, NegInfinity) => Ok(Decimal::zero()),
            (PosInfinity, Finite(e)) => Ok(if e.is_negative() {
                Decimal::zero()
            } else {
                PosInfinity
            }),
            (NegInfinity, Finite(e)) => Ok(if e.is_negative() {
                Decimal::zero()
            } else {
                Decimal::infinity(is_odd_integer(e))
            }),
            (Finite(base), PosInfinity | NegInfinity) => {
                if base.is_negative() {
                    return Err(DecimalError::InvalidOperation("negative base ** ∞"));
                }
                let grows = matches!(exponent, PosInfinity);
                Ok(match base.cmp(&BigDecimal::one()) {
                    Ordering::Equal => Decimal::one(),
                    Ordering::Greater if grows => PosInfinity,
                    Ordering::Less if !grows => PosInfinity,
                    _ => Decimal::zero(),
                })
            }
            (Finite(base), Finite(e)) => finite_pow(base, e),
        }
    }

    /// Shift the integer part left by `shift` bits
    pub fn checked_shl(&self, shift: &Decimal) -> Result<Decimal, DecimalError> {
        use Decimal::*;
        match (self, shift) {
            (PosInfinity | NegInfinity, NegInfinity) => {
                Err(DecimalError::InvalidOperation("∞ << -∞"))
            }
            (PosInfinity | NegInfinity, _) => Ok(self.clone()),
            (Finite(value), PosInfinity) => Ok(if value.is_zero() {
                Decimal::zero()
            } else {
                Decimal::infinity(value.is_negative())
            }),
            (Finite(_), NegInfinity) => Ok(Decimal::zero()),
            (Finite(value), Finite(places)) => Ok(shift_int(trunc_int(value), trunc_int(places))),
        }
    }

    pub fn checked_shr(&self, shift: &Decimal) -> Result<Decimal, DecimalError> {
        self.checked_shl(&-shift)
    }
}

/// Round to [`PRECISION`] significant digits, half-even
fn limit_precision(value: BigDecimal) -> BigDecimal {
    let digits = value.digits();
    if digits <= PRECISION {
        return value;
    }
    let scale = value.fractional_digit_count() - (digits - PRECISION) as i64;
    value.with_scale_round(scale, RoundingMode::HalfEven)
}

/// Remove trailing zeros; integers keep a zero scale instead of an exponent
pub(crate) fn fix_zeroes(value: &BigDecimal) -> BigDecimal {
    let normalized = value.normalized();
    if normalized.fractional_digit_count() < 0 {
        normalized.with_scale(0)
    } else {
        normalized
    }
}

fn trunc_int(value: &BigDecimal) -> BigInt {
    value.with_scale(0).into_bigint_and_exponent().0
}

/// Both operands as integers sharing one scale
fn aligned_ints(a: &BigDecimal, b: &BigDecimal) -> (BigInt, BigInt) {
    let scale = a.fractional_digit_count().max(b.fractional_digit_count());
    (
        a.with_scale(scale).into_bigint_and_exponent().0,
        b.with_scale(scale).into_bigint_and_exponent().0,
    )
}

fn is_odd_integer(value: &BigDecimal) -> bool {
    value.is_integer() && !(trunc_int(value) % BigInt::from(2)).is_zero()
}

/// `log10(|value|)` without overflowing `f64`
fn log10_abs(value: &BigDecimal) -> f64 {
    let magnitude = value.order_of_magnitude();
    let (digits, scale) = value.abs().into_bigint_and_exponent();
    let mantissa = BigDecimal::new(digits, scale + magnitude)
        .to_f64()
        .unwrap_or(1.0);
    mantissa.log10() + magnitude as f64
}

fn finite_pow(base: &BigDecimal, exponent: &BigDecimal) -> Result<Decimal, DecimalError> {
    if base.is_zero() {
        return Ok(if exponent.is_negative() {
            Decimal::PosInfinity
        } else {
            Decimal::zero()
        });
    }
    let integral = exponent.is_integer();
    if !integral && base.is_negative() {
        return Err(DecimalError::InvalidOperation("negative base ** fraction"));
    }
    let negative = base.is_negative() && is_odd_integer(exponent);
    if base.abs().is_one() {
        return Ok(if negative { -Decimal::one() } else { Decimal::one() });
    }

    let power = exponent.to_f64().unwrap_or(if exponent.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    });
    let estimate = log10_abs(base) * power;
    if estimate >= OVERFLOW_EXPONENT as f64 {
        return Ok(Decimal::infinity(negative));
    }
    if estimate <= -OVERFLOW_EXPONENT as f64 {
        return Ok(Decimal::zero());
    }

    if integral {
        if let Some(power) = exponent.to_i64() {
            return Ok(Decimal::from_big(base.powi(power)));
        }
    }

    // Fractional powers go through f64 and keep float precision.
    let whole = estimate.floor();
    let mantissa = Decimal::from_f64(10f64.powf(estimate - whole))
        .ok_or(DecimalError::InvalidOperation("pow"))?;
    let scale = Decimal::Finite(BigDecimal::new(BigInt::one(), -(whole as i64)));
    let magnitude = mantissa.checked_mul(&scale)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn shift_int(value: BigInt, places: BigInt) -> Decimal {
    if value.is_zero() {
        return Decimal::zero();
    }
    let negative = value.is_negative();
    let limit = places.abs().to_u64().filter(|n| *n <= MAX_SHIFT);
    match (places.is_negative(), limit) {
        (false, Some(n)) => Decimal::from_bigint(value << n as usize),
        (false, None) => Decimal::infinity(negative),
        (true, Some(n)) => Decimal::from_bigint(value >> n as usize),
        (true, None) if negative => -Decimal::one(),
        (true, None) => Decimal::zero(),
    }
}

/// Exact textual form, plain inside a moderate exponent range
fn canonical_string(value: &BigDecimal) -> String {
    let value = fix_zeroes(value);
    let magnitude = value.order_of_magnitude();
    if (-PLAIN_EXPONENT_LIMIT..=PLAIN_EXPONENT_LIMIT).contains(&magnitude) {
        value.to_plain_string()
    } else {
        let (mantissa, exponent) = format::scientific_parts(&value, None);
        format!("{}e{:+}", mantissa.to_plain_string(), exponent)
    }
}

fn is_infinity_word(text: &str) -> bool {
    text == "∞" || text.eq_ignore_ascii_case("inf") || text.eq_ignore_ascii_case("infinity")
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::InvalidNumber(s.to_string());
        let text = s.trim();

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if is_infinity_word(body) {
            return Ok(Decimal::infinity(negative));
        }

        if let Some((numerator, denominator)) = text.split_once('/') {
            let numerator: Decimal = numerator.parse().map_err(|_| invalid())?;
            let denominator: Decimal = denominator.parse().map_err(|_| invalid())?;
            return numerator.checked_div(&denominator);
        }

        if body.starts_with(['+', '-']) || body.is_empty() {
            return Err(invalid());
        }
        let value = BigDecimal::from_str(body).map_err(|_| invalid())?;
        Ok(Decimal::from_big(if negative { -value } else { value }))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decimal::Finite(value) => f.pad(&canonical_string(value)),
            Decimal::PosInfinity => f.pad("∞"),
            Decimal::NegInfinity => f.pad("-∞"),
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal('{self}')")
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        use Decimal::*;
        match (self, other) {
            (Finite(a), Finite(b)) => a.cmp(b),
            (PosInfinity, PosInfinity) | (NegInfinity, NegInfinity) => Ordering::Equal,
            (NegInfinity, _) | (_, PosInfinity) => Ordering::Less,
            (PosInfinity, _) | (_, NegInfinity) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Decimal::Finite(BigDecimal::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64);

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        Decimal::from_big(value)
    }
}

/// Implement an operator over owned and borrowed operands through a
/// `checked_*` method, panicking on undefined forms.
macro_rules! forward_checked_binop {
    ($imp:ident, $method:ident, $checked:ident) => {
        impl $imp<&Decimal> for &Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &Decimal) -> Decimal {
                match self.$checked(rhs) {
                    Ok(value) => value,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }

        impl $imp<Decimal> for &Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                self.$method(&rhs)
            }
        }
    };
}

forward_checked_binop!(Add, add, checked_add);
forward_checked_binop!(Sub, sub, checked_sub);
forward_checked_binop!(Mul, mul, checked_mul);
forward_checked_binop!(Div, div, checked_div);
forward_checked_binop!(Rem, rem, checked_rem);
forward_checked_binop!(Shl, shl, checked_shl);
forward_checked_binop!(Shr, shr, checked_shr);

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        match self {
            Decimal::Finite(value) => Decimal::Finite(-value),
            Decimal::PosInfinity => Decimal::NegInfinity,
            Decimal::NegInfinity => Decimal::PosInfinity,
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}

/// Bitwise complement of the integer part, `-x - 1`
impl Not for &Decimal {
    type Output = Decimal;

    fn not(self) -> Decimal {
        match self {
            Decimal::Finite(value) => Decimal::from_bigint(-trunc_int(value) - BigInt::one()),
            infinite => -infinite,
        }
    }
}

impl Not for Decimal {
    type Output = Decimal;

    fn not(self) -> Decimal {
        !&self
    }
}

/// Infinity is the identity for `&`
impl BitAnd<&Decimal> for &Decimal {
    type Output = Decimal;

    fn bitand(self, rhs: &Decimal) -> Decimal {
        match (self, rhs) {
            (Decimal::Finite(a), Decimal::Finite(b)) => {
                Decimal::from_bigint(trunc_int(a) & trunc_int(b))
            }
            (Decimal::Finite(_), _) => self.clone(),
            _ => rhs.clone(),
        }
    }
}

/// Infinity absorbs `|`
impl BitOr<&Decimal> for &Decimal {
    type Output = Decimal;

    fn bitor(self, rhs: &Decimal) -> Decimal {
        match (self, rhs) {
            (Decimal::Finite(a), Decimal::Finite(b)) => {
                Decimal::from_bigint(trunc_int(a) | trunc_int(b))
            }
            _ => Decimal::PosInfinity,
        }
    }
}

/// `∞ ^ x` is the complement of `x`
impl BitXor<&Decimal> for &Decimal {
    type Output = Decimal;

    fn bitxor(self, rhs: &Decimal) -> Decimal {
        match (self, rhs) {
            (Decimal::Finite(a), Decimal::Finite(b)) => {
                Decimal::from_bigint(trunc_int(a) ^ trunc_int(b))
            }
            (Decimal::Finite(_), _) => !self,
            _ => !rhs,
        }
    }
}

macro_rules! forward_owned_bitop {
    ($imp:ident, $method:ident) => {
        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_bitop!(BitAnd, bitand);
forward_owned_bitop!(BitOr, bitor);
forward_owned_bitop!(BitXor, bitxor);

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Decimal::from_f64(v).ok_or_else(|| E::custom("NaN is not a decimal"))
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    const INF: Decimal = Decimal::INFINITY;
    const NEG_INF: Decimal = Decimal::NEG_INFINITY;

    #[test]
    fn test_parse_forms() {
        assert_eq!(d("1e3"), Decimal::from(1000));
        assert_eq!(d("+12.5"), d("12.5"));
        assert_eq!(d("1/4"), d("0.25"));
        assert_eq!(d("-1/2"), d("-0.5"));
        assert_eq!(d("∞"), INF);
        assert_eq!(d("-∞"), NEG_INF);
        assert_eq!(d("Infinity"), INF);
        assert_eq!(d("-inf"), NEG_INF);
        assert!("abc".parse::<Decimal>().is_err());
        assert!("--5".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(d("1e1000"), INF);
        assert_eq!(d("-2e1500"), NEG_INF);
        assert!(d("9e999").is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(d("100.000").to_string(), "100");
        assert_eq!(d("1e3").to_string(), "1000");
        assert_eq!(d("0.25").to_string(), "0.25");
        assert_eq!(d("1e54").to_string(), "1e+54");
        assert_eq!(d("-1.5e-50").to_string(), "-1.5e-50");
        assert_eq!(INF.to_string(), "∞");
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["0", "-7", "3.14159", "8.79848e53", "1.616255e-35", "123456789.5"] {
            let value = d(text);
            assert_eq!(d(&value.to_string()), value);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(NEG_INF < d("-1e999"));
        assert!(d("1e999") < INF);
        assert!(d("2") > d("1.5"));
        assert_eq!(INF.cmp(&INF), Ordering::Equal);
    }

    #[test]
    fn test_infinite_addition() {
        assert_eq!(&INF + &d("1"), INF);
        assert_eq!(&d("1") + &NEG_INF, NEG_INF);
        assert!(INF.checked_add(&NEG_INF).is_err());
    }

    #[test]
    fn test_infinite_subtraction() {
        assert_eq!(&INF - &INF, Decimal::zero());
        assert_eq!(&d("1") - &INF, NEG_INF);
        assert_eq!(&INF - &NEG_INF, INF);
    }

    #[test]
    fn test_infinite_multiplication() {
        assert_eq!(&INF * &d("-2"), NEG_INF);
        assert_eq!(&NEG_INF * &NEG_INF, INF);
        assert!(INF.checked_mul(&Decimal::zero()).is_err());
    }

    #[test]
    fn test_infinite_division() {
        assert_eq!(&d("1") / &INF, Decimal::zero());
        assert_eq!(&INF / &d("-2"), NEG_INF);
        assert_eq!(&d("5") / &Decimal::zero(), INF);
        assert_eq!(&d("-5") / &Decimal::zero(), NEG_INF);
        assert!(INF.checked_div(&INF).is_err());
        assert!(Decimal::zero().checked_div(&Decimal::zero()).is_err());
    }

    #[test]
    fn test_divmod() {
        assert_eq!(d("1").checked_divmod(&INF).unwrap(), (Decimal::zero(), d("1")));
        assert_eq!(INF.checked_divmod(&d("1")).unwrap(), (INF, Decimal::zero()));
        assert_eq!(d("-7").checked_divmod(&d("2")).unwrap(), (d("-3"), d("-1")));
        assert_eq!(d("68.5").checked_divmod(&d("12")).unwrap(), (d("5"), d("8.5")));
    }

    #[test]
    fn test_pow() {
        assert_eq!(INF.checked_pow(&d("2")).unwrap(), INF);
        assert_eq!(NEG_INF.checked_pow(&d("2")).unwrap(), INF);
        assert_eq!(NEG_INF.checked_pow(&d("3")).unwrap(), NEG_INF);
        assert_eq!(d("2").checked_pow(&INF).unwrap(), INF);
        assert_eq!(d("2").checked_pow(&NEG_INF).unwrap(), Decimal::zero());
        assert_eq!(d("0.5").checked_pow(&INF).unwrap(), Decimal::zero());
        assert_eq!(d("1").checked_pow(&INF).unwrap(), Decimal::one());
        assert_eq!(INF.checked_pow(&Decimal::zero()).unwrap(), Decimal::one());
        assert_eq!(d("2").checked_pow(&d("10")).unwrap(), d("1024"));
        assert_eq!(d("2").checked_pow(&d("-2")).unwrap(), d("0.25"));
        assert_eq!(d("10").checked_pow(&d("5000")).unwrap(), INF);
        assert!(d("-8").checked_pow(&d("0.5")).is_err());
    }

    #[test]
    fn test_shifts() {
        assert_eq!(&INF << &d("2"), INF);
        assert_eq!(&d("2") << &INF, INF);
        assert_eq!(&d("2") << &NEG_INF, Decimal::zero());
        assert_eq!(&INF >> &d("2"), INF);
        assert_eq!(&d("2") >> &INF, Decimal::zero());
        assert_eq!(&d("2") >> &NEG_INF, INF);
        assert_eq!(&d("3") << &d("4"), d("48"));
        assert_eq!(&d("48") >> &d("4"), d("3"));
    }

    #[test]
    fn test_bitwise_with_infinity() {
        assert_eq!(&INF & &d("6"), d("6"));
        assert_eq!(&d("6") & &INF, d("6"));
        assert_eq!(&NEG_INF | &d("2"), INF);
        assert_eq!(&INF ^ &d("2"), !d("2"));
        assert_eq!(!d("2"), d("-3"));
        assert_eq!(!INF, NEG_INF);
        assert_eq!(&d("6") & &d("3"), d("2"));
    }

    #[test]
    fn test_unary() {
        assert_eq!(-INF, NEG_INF);
        assert_eq!(NEG_INF.abs(), INF);
        assert_eq!(INF.round_dp(2), INF);
        assert_eq!(d("2.5").round_dp(0), d("2"));
        assert_eq!(d("3.5").round_dp(0), d("4"));
        assert_eq!(d("-2.7").trunc(), d("-2"));
        assert_eq!(d("-2.2").floor(), d("-3"));
        assert_eq!(d("2.2").ceil(), d("3"));
    }

    #[test]
    fn test_precision_limit() {
        let third = &Decimal::one() / &d("3");
        let digits = third.as_big().unwrap().digits();
        assert_eq!(digits, PRECISION);
    }

    #[test]
    fn test_fix_zeroes_idempotent() {
        for text in ["1e3", "100.000", "0.5000", "0", "-42.10"] {
            let once = d(text).fix_zeroes();
            assert_eq!(once.to_string(), once.fix_zeroes().to_string());
        }
        assert_eq!(d("1e3").fix_zeroes().to_string(), "1000");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&d("1.5")).unwrap();
        assert_eq!(json, "\"1.5\"");
        let back: Decimal = serde_json::from_str("\"∞\"").unwrap();
        assert_eq!(back, INF);
        let number: Decimal = serde_json::from_str("12").unwrap();
        assert_eq!(number, d("12"));
    }
}
