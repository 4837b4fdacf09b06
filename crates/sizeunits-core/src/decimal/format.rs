//! Format specifiers and number rendering
//!
//! A spec follows `[[fill]align][sign][0][width][,][.precision][kind][%[d]][&[d]]`.
//! `kind` is free letters (quantity formatting reads them as unit systems),
//! `%` renders eighths (or `1/d`) as vulgar fraction glyphs, and `&` appends
//! an accuracy note rounded to `d` places.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::{Signed, ToPrimitive, Zero};
use pest::Parser;

use super::{fix_zeroes, Decimal};
use crate::error::DecimalError;
use crate::parser::{Rule, SizeParser};

const DEFAULT_PRECISION: usize = 2;
const DEFAULT_FRACTION: u32 = 8;
const FRACTION_GLYPHS: [&str; 8] = ["", "⅛", "¼", "⅜", "½", "⅝", "¾", "⅞"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits
    AfterSign,
}

impl Align {
    fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Align::Left),
            ">" => Some(Align::Right),
            "^" => Some(Align::Center),
            "=" => Some(Align::AfterSign),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Align::Left => "<",
            Align::Right => ">",
            Align::Center => "^",
            Align::AfterSign => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOption {
    /// `+`: sign on positive values too
    Always,
    /// `-`: sign on negative values only
    NegativeOnly,
    /// ` `: a space in place of a positive sign
    Space,
}

impl SignOption {
    fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(SignOption::Always),
            "-" => Some(SignOption::NegativeOnly),
            " " => Some(SignOption::Space),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            SignOption::Always => "+",
            SignOption::NegativeOnly => "-",
            SignOption::Space => " ",
        }
    }
}

/// A parsed format specifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecimalSpec {
    pub fill: Option<char>,
    pub align: Option<Align>,
    pub sign: Option<SignOption>,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub thousands: bool,
    pub precision: Option<usize>,
    /// Trailing type letters
    pub kind: Option<String>,
    /// Fraction denominator requested by `%`
    pub fraction: Option<u32>,
    /// Accuracy places requested by `&`
    pub accuracy: Option<u32>,
}

impl DecimalSpec {
    pub fn parse(spec: &str) -> Result<Self, DecimalError> {
        spec.parse()
    }

    pub fn precision_or_default(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    /// Render a number, accuracy note included
    pub fn format(&self, value: &Decimal) -> String {
        let (number, accuracy) = self.format_parts(value);
        match accuracy {
            Some(accuracy) => number + &accuracy,
            None => number,
        }
    }

    /// Render a number and, separately, its accuracy note (if requested and
    /// applicable) so callers can place the note after a unit.
    pub fn format_parts(&self, value: &Decimal) -> (String, Option<String>) {
        let exact = match value {
            Decimal::Finite(exact) => exact,
            infinite => return (format!("{}∞", infinite.sign()), None),
        };

        let precision = self.precision_or_default();
        let lower = BigDecimal::new(1.into(), precision as i64 + 1);
        let upper = BigDecimal::new(1.into(), -10);
        let magnitude = exact.abs();
        let fixed = exact.is_zero() || (magnitude > lower && magnitude < upper);

        if !fixed {
            let (mantissa, exponent) = scientific_parts(&magnitude, Some(precision as i64));
            let body = format!("{}e{:+}", mantissa.to_plain_string(), exponent);
            return (self.pad(exact.is_negative(), body), None);
        }

        let rounded = match self.fraction {
            Some(denominator) => round_fraction(value, denominator),
            None => value.round_dp(precision as i64),
        };
        let negative = rounded.is_negative();

        let body = match self.fraction {
            Some(_) => {
                let (whole, glyph) = split_rounded(&rounded);
                let whole = self.digits(&whole.abs());
                if !glyph.is_empty() && whole == "0" {
                    glyph.to_string()
                } else {
                    whole + glyph
                }
            }
            None => self.digits(&rounded.abs()),
        };

        let accuracy = self
            .accuracy
            .map(|places| accuracy_note(&rounded, value, places));
        (self.pad(negative, body), accuracy)
    }

    /// Plain digits of a finite, non-negative value, grouped if requested
    fn digits(&self, value: &Decimal) -> String {
        let text = match value {
            Decimal::Finite(v) => fix_zeroes(v).to_plain_string(),
            other => other.to_string(),
        };
        if self.thousands {
            group_thousands(&text)
        } else {
            text
        }
    }

    fn pad(&self, negative: bool, body: String) -> String {
        let sign = match (negative, self.sign) {
            (true, _) => "-",
            (false, Some(SignOption::Always)) => "+",
            (false, Some(SignOption::Space)) => " ",
            (false, _) => "",
        };
        let (fill, align) = match (self.align, self.zero_pad) {
            (Some(align), _) => (self.fill.unwrap_or(' '), align),
            (None, true) => ('0', Align::AfterSign),
            (None, false) => (' ', Align::Right),
        };

        let len = sign.chars().count() + body.chars().count();
        let padding = self.width.unwrap_or(0).saturating_sub(len);
        let fill_n = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
        match align {
            Align::Left => format!("{sign}{body}{}", fill_n(padding)),
            Align::Right => format!("{}{sign}{body}", fill_n(padding)),
            Align::AfterSign => format!("{sign}{}{body}", fill_n(padding)),
            Align::Center => {
                let left = padding / 2;
                format!("{}{sign}{body}{}", fill_n(left), fill_n(padding - left))
            }
        }
    }
}

impl FromStr for DecimalSpec {
    type Err = DecimalError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::InvalidFormatSpec(spec.to_string());
        let pairs = SizeParser::parse(Rule::format_spec, spec).map_err(|_| invalid())?;

        let mut parsed = DecimalSpec::default();
        for pair in pairs.flatten() {
            let text = pair.as_str();
            match pair.as_rule() {
                Rule::spec_fill => parsed.fill = text.chars().next(),
                Rule::spec_align => parsed.align = Align::from_symbol(text),
                Rule::spec_sign => parsed.sign = SignOption::from_symbol(text),
                Rule::spec_zero => parsed.zero_pad = true,
                Rule::spec_width => parsed.width = Some(text.parse().map_err(|_| invalid())?),
                Rule::spec_thousands => parsed.thousands = true,
                Rule::spec_precision => {
                    parsed.precision = Some(text.parse().map_err(|_| invalid())?)
                }
                Rule::spec_kind => parsed.kind = Some(text.to_string()),
                Rule::spec_fraction => {
                    parsed.fraction = Some(text[1..].parse().unwrap_or(DEFAULT_FRACTION))
                }
                Rule::spec_accuracy => parsed.accuracy = Some(text[1..].parse().unwrap_or(0)),
                _ => {}
            }
        }
        Ok(parsed)
    }
}

impl fmt::Display for DecimalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(align) = self.align {
            if let Some(fill) = self.fill {
                write!(f, "{fill}")?;
            }
            f.write_str(align.symbol())?;
        }
        if let Some(sign) = self.sign {
            f.write_str(sign.symbol())?;
        }
        if self.zero_pad {
            f.write_str("0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{width}")?;
        }
        if self.thousands {
            f.write_str(",")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        if let Some(kind) = &self.kind {
            f.write_str(kind)?;
        }
        match self.fraction {
            Some(DEFAULT_FRACTION) => f.write_str("%")?,
            Some(denominator) => write!(f, "%{denominator}")?,
            None => {}
        }
        match self.accuracy {
            Some(0) => f.write_str("&"),
            Some(places) => write!(f, "&{places}"),
            None => Ok(()),
        }
    }
}

impl Decimal {
    /// Render with a textual format specifier
    pub fn format_with(&self, spec: &str) -> Result<String, DecimalError> {
        Ok(DecimalSpec::parse(spec)?.format(self))
    }
}

/// Round to the nearest `1/denominator`, e.g. `round_fraction(1.8, 4) == 1.75`
pub fn round_fraction(value: &Decimal, denominator: u32) -> Decimal {
    let denominator = Decimal::from(denominator.max(1));
    match value.checked_mul(&denominator) {
        Ok(scaled) => scaled
            .round_dp(0)
            .checked_div(&denominator)
            .unwrap_or_else(|_| value.clone()),
        Err(_) => value.clone(),
    }
}

/// Vulgar fraction glyph for the fractional part of `value`, to the nearest eighth
pub fn format_fraction(value: &Decimal) -> &'static str {
    let part = value
        .abs()
        .checked_rem(&Decimal::one())
        .unwrap_or_else(|_| Decimal::zero());
    let eighths = round_fraction(&part, 8)
        .checked_mul(&Decimal::from(8))
        .ok()
        .and_then(|n| n.as_big().and_then(|n| n.to_i64()))
        .unwrap_or(0);
    FRACTION_GLYPHS[eighths.rem_euclid(8) as usize]
}

/// Round to the nearest `1/denominator` and split into whole part and glyph
pub fn split_fraction(value: &Decimal, denominator: u32) -> (Decimal, &'static str) {
    split_rounded(&round_fraction(value, denominator))
}

fn split_rounded(rounded: &Decimal) -> (Decimal, &'static str) {
    let whole = rounded.trunc();
    let part = rounded.checked_sub(&whole).unwrap_or_else(|_| Decimal::zero());
    (whole, format_fraction(&part))
}

/// ` (~99.5% accurate)` note comparing a rounded value with the exact one
pub fn accuracy_note(rounded: &Decimal, exact: &Decimal, places: u32) -> String {
    format!(" (~{}% accurate)", accuracy_percent(rounded, exact, places))
}

/// `min / max × 100` of the two magnitudes, rounded to `places`
fn accuracy_percent(rounded: &Decimal, exact: &Decimal, places: u32) -> String {
    let (a, b) = (rounded.abs(), exact.abs());
    let (small, big) = if a <= b { (a, b) } else { (b, a) };
    let percent = small
        .checked_div(&big)
        .and_then(|ratio| ratio.checked_mul(&Decimal::from(100)))
        .unwrap_or_else(|_| Decimal::from(100));
    match percent.as_big() {
        Some(percent) => percent
            .with_scale_round(places as i64, RoundingMode::HalfEven)
            .to_plain_string(),
        None => percent.to_string(),
    }
}

fn group_thousands(text: &str) -> String {
    let (int_part, rest) = text.split_at(text.find('.').unwrap_or(text.len()));
    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

/// Mantissa in `[1, 10)` and decimal exponent. With `places`, the mantissa is
/// rounded half-even to that many decimals; otherwise trailing zeros go.
pub(crate) fn scientific_parts(value: &BigDecimal, places: Option<i64>) -> (BigDecimal, i64) {
    if value.is_zero() {
        return (BigDecimal::zero().with_scale(places.unwrap_or(0)), 0);
    }
    let mut exponent = value.order_of_magnitude();
    let (digits, scale) = value.as_bigint_and_exponent();
    let mut mantissa = BigDecimal::new(digits, scale + exponent);
    match places {
        Some(places) => {
            mantissa = mantissa.with_scale_round(places, RoundingMode::HalfEven);
            if mantissa.abs() >= BigDecimal::from(10) {
                let (digits, scale) = mantissa.into_bigint_and_exponent();
                mantissa = BigDecimal::new(digits, scale + 1)
                    .with_scale_round(places, RoundingMode::HalfEven);
                exponent += 1;
            }
        }
        None => mantissa = fix_zeroes(&mantissa),
    }
    (mantissa, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fmt(value: &str, spec: &str) -> String {
        d(value).format_with(spec).unwrap()
    }

    #[test]
    fn test_spec_parse_fields() {
        let spec = DecimalSpec::parse("*^+012,.3mu%4&2").unwrap();
        assert_eq!(spec.fill, Some('*'));
        assert_eq!(spec.align, Some(Align::Center));
        assert_eq!(spec.sign, Some(SignOption::Always));
        assert!(spec.zero_pad);
        assert_eq!(spec.width, Some(12));
        assert!(spec.thousands);
        assert_eq!(spec.precision, Some(3));
        assert_eq!(spec.kind.as_deref(), Some("mu"));
        assert_eq!(spec.fraction, Some(4));
        assert_eq!(spec.accuracy, Some(2));
    }

    #[test]
    fn test_spec_display_round_trip() {
        for text in ["", "m", ",.3mu", ">10", "x<5.1", "%", "&", ".0u%&3", "+"] {
            assert_eq!(DecimalSpec::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_spec_align_without_fill() {
        let spec = DecimalSpec::parse("<8").unwrap();
        assert_eq!(spec.fill, None);
        assert_eq!(spec.align, Some(Align::Left));
        assert_eq!(spec.width, Some(8));
    }

    #[test]
    fn test_spec_rejects_garbage() {
        assert!(DecimalSpec::parse(".05").is_err());
        assert!(DecimalSpec::parse("m!").is_err());
        assert!(DecimalSpec::parse("%0").is_err());
    }

    #[test]
    fn test_fixed_formatting() {
        assert_eq!(fmt("1.2345", ""), "1.23");
        assert_eq!(fmt("1.5", ""), "1.5");
        assert_eq!(fmt("100.000", ""), "100");
        assert_eq!(fmt("0", ".4"), "0");
        assert_eq!(fmt("-2.125", ".2"), "-2.12");
        assert_eq!(fmt("1234567.891", ","), "1,234,567.89");
    }

    #[test]
    fn test_scientific_switch() {
        assert_eq!(fmt("12345678901", ""), "1.23e+10");
        assert_eq!(fmt("0.0001", ""), "1.00e-4");
        assert_eq!(fmt("-9.996e20", ""), "-1.00e+21");
        assert_eq!(fmt("0.001", ".3"), "0.001");
    }

    #[test]
    fn test_infinity_ignores_spec() {
        assert_eq!(fmt("∞", ",.3&"), "∞");
        assert_eq!(fmt("-∞", ">10"), "-∞");
    }

    #[test]
    fn test_padding() {
        assert_eq!(fmt("1.5", ">6"), "   1.5");
        assert_eq!(fmt("1.5", "*<6"), "1.5***");
        assert_eq!(fmt("-1.5", "06"), "-001.5");
        assert_eq!(fmt("2", "^5"), "  2  ");
        assert_eq!(fmt("2", "+"), "+2");
    }

    #[test]
    fn test_fraction_rendering() {
        assert_eq!(fmt("1.5", "%"), "1½");
        assert_eq!(fmt("0.25", "%"), "¼");
        assert_eq!(fmt("2.9", "%4"), "3");
        assert_eq!(fmt("-1.125", "%"), "-1⅛");
        assert_eq!(fmt("3", "%"), "3");
    }

    #[test]
    fn test_accuracy_suffix() {
        assert_eq!(fmt("2", "&"), "2 (~100% accurate)");
        assert_eq!(fmt("1.995", ".1&1"), "2 (~99.8% accurate)");
        assert_eq!(fmt("1e20", "&"), "1.00e+20");
        let (number, accuracy) = DecimalSpec::parse("&").unwrap().format_parts(&d("3"));
        assert_eq!(number, "3");
        assert_eq!(accuracy.as_deref(), Some(" (~100% accurate)"));
    }

    #[test]
    fn test_round_fraction() {
        assert_eq!(round_fraction(&d("1.8"), 4), d("1.75"));
        assert_eq!(round_fraction(&d("∞"), 4), d("∞"));
        assert_eq!(split_fraction(&d("2.3"), 4), (d("2"), "¼"));
        assert_eq!(split_fraction(&d("4.99"), 8), (d("5"), ""));
    }

    #[test]
    fn test_format_fraction_glyphs() {
        assert_eq!(format_fraction(&d("0.375")), "⅜");
        assert_eq!(format_fraction(&d("5.875")), "⅞");
        assert_eq!(format_fraction(&d("0.99")), "");
        assert_eq!(format_fraction(&d("7")), "");
    }
}
