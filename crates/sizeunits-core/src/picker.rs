//! Random close-unit picker
//!
//! Finds units in which a value reads as a simple quarter fraction, e.g.
//! "about 3¼ bananas", and picks one of them at random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::decimal::{round_fraction, Decimal};
use crate::types::Unit;

/// Relative error below which a ratio counts as close to its quarter
const TOLERANCE: (i64, i64) = (75, 1000);

/// Ceiling used when the first pass finds nothing
pub const FALLBACK_LIMIT: u32 = 10;

/// Whether `n` lies within tolerance of the nearest quarter (and that quarter is not zero)
pub fn is_good(n: &Decimal) -> bool {
    if !n.is_finite() {
        return false;
    }
    let rounded = round_fraction(n, 4);
    if rounded.is_zero() {
        return false;
    }
    let error = n
        .checked_sub(&rounded)
        .and_then(|diff| diff.abs().checked_div(&rounded));
    let tolerance = Decimal::from(TOLERANCE.0)
        .checked_div(&Decimal::from(TOLERANCE.1))
        .unwrap_or_else(|_| Decimal::zero());
    matches!(error, Ok(error) if error < tolerance)
}

/// Units whose ratio rounds into `[1, limit]` and is close to that rounding
pub fn close_units<'a, I>(value: &Decimal, units: I, limit: u32) -> Vec<&'a Unit>
where
    I: IntoIterator<Item = &'a Unit>,
{
    if !value.is_finite() {
        return Vec::new();
    }
    let limit = Decimal::from(limit);
    units
        .into_iter()
        .filter(|unit| {
            let Ok(ratio) = value.checked_div(&unit.factor()) else {
                return false;
            };
            let rounded = round_fraction(&ratio, 4);
            rounded >= Decimal::one() && rounded <= limit && is_good(&ratio)
        })
        .collect()
}

/// Pick uniformly among the close units, widening the ceiling to
/// [`FALLBACK_LIMIT`] if `options` finds none
pub fn random_close_unit<'a, I, R>(
    value: &Decimal,
    units: I,
    options: u32,
    rng: &mut R,
) -> Option<&'a Unit>
where
    I: IntoIterator<Item = &'a Unit>,
    I::IntoIter: Clone,
    R: Rng + ?Sized,
{
    let units = units.into_iter();
    let mut candidates = close_units(value, units.clone(), options);
    if candidates.is_empty() {
        candidates = close_units(value, units, FALLBACK_LIMIT);
    }
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScaledUnit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn unit(factor: &str, symbol: &str) -> Unit {
        Unit::Scaled(ScaledUnit::new(d(factor)).with_symbol(symbol))
    }

    #[test]
    fn test_is_good() {
        assert!(is_good(&d("3")));
        assert!(is_good(&d("3.26")));
        assert!(is_good(&d("1.52")));
        assert!(!is_good(&d("1.1")));
        assert!(!is_good(&d("0.1")));
        assert!(!is_good(&Decimal::INFINITY));
    }

    #[test]
    fn test_close_units_respects_limit() {
        let units = [unit("1", "a"), unit("0.5", "b"), unit("0.1", "c"), unit("10", "d")];
        let close: Vec<_> = close_units(&d("2"), &units, 6)
            .into_iter()
            .map(Unit::id)
            .collect();
        assert_eq!(close, vec!["a", "b"]);

        let wide: Vec<_> = close_units(&d("1"), &units, 10)
            .into_iter()
            .map(Unit::id)
            .collect();
        assert_eq!(wide, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_second_pass_widens_ceiling() {
        let units = [unit("0.125", "eighth")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = random_close_unit(&d("1"), &units, 6, &mut rng);
        assert_eq!(picked.map(Unit::id), Some("eighth"));
    }

    #[test]
    fn test_no_candidates() {
        let units = [unit("1000", "km")];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(random_close_unit(&d("1"), &units, 6, &mut rng).is_none());
    }

    #[test]
    fn test_choice_is_among_candidates() {
        let units = [unit("1", "a"), unit("0.5", "b"), unit("0.001", "mm")];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = random_close_unit(&d("2"), &units, 6, &mut rng).map(Unit::id);
            assert!(matches!(picked, Some("a") | Some("b")));
        }
    }
}
