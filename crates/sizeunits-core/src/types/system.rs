//! Display systems: ranked subsets of a dimension's units

use rand::Rng;

use super::quantity::Dimension;
use super::unit::{Unit, UnitRegistry};
use crate::decimal::Decimal;
use crate::error::UnitError;
use crate::picker;

/// Default first-pass ceiling for [`SystemRegistry::get_good_unit`]
pub const DEFAULT_OPTIONS: u32 = 6;

/// A unit reference placed in a system, with an optional display threshold
#[derive(Debug, Clone, PartialEq)]
pub struct SystemUnit {
    unit: String,
    trigger: Option<Decimal>,
    rel_trigger: Option<Decimal>,
}

impl SystemUnit {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            trigger: None,
            rel_trigger: None,
        }
    }

    /// Absolute threshold in base units
    pub fn with_trigger(mut self, trigger: Decimal) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Threshold as a multiple of the unit's own factor
    pub fn with_rel_trigger(mut self, rel_trigger: Decimal) -> Self {
        self.rel_trigger = Some(rel_trigger);
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn effective_trigger(&self, unit: &Unit) -> Result<Decimal, UnitError> {
        match (&self.trigger, &self.rel_trigger) {
            (Some(_), Some(_)) => Err(UnitError::ConflictingTrigger {
                unit: self.unit.clone(),
            }),
            (Some(trigger), None) => Ok(trigger.clone()),
            (None, Some(rel)) => Ok(unit.factor().checked_mul(rel).unwrap_or_else(|_| unit.factor())),
            (None, None) => Ok(unit.factor()),
        }
    }
}

#[derive(Debug, Clone)]
struct SystemEntry {
    unit: Unit,
    trigger: Decimal,
}

/// One named system of one dimension, kept sorted ascending by trigger
#[derive(Debug, Clone)]
pub struct SystemRegistry {
    dimension: Dimension,
    name: String,
    entries: Vec<SystemEntry>,
}

impl SystemRegistry {
    pub fn new(dimension: Dimension, name: &str) -> Self {
        Self {
            dimension,
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Resolve the reference against `units` and insert it after every
    /// entry with a trigger less than or equal to its own
    pub fn add_system_unit(
        &mut self,
        system_unit: SystemUnit,
        units: &UnitRegistry,
    ) -> Result<(), UnitError> {
        let unit = units
            .resolve(system_unit.unit())
            .ok_or_else(|| UnitError::UnknownUnit {
                dimension: self.dimension,
                token: system_unit.unit().to_string(),
            })?;
        let trigger = system_unit.effective_trigger(unit)?;
        let index = self.entries.partition_point(|entry| entry.trigger <= trigger);
        self.entries.insert(
            index,
            SystemEntry {
                unit: unit.clone(),
                trigger,
            },
        );
        Ok(())
    }

    /// Largest unit whose trigger does not exceed `|value|`; the smallest
    /// unit below every trigger, the largest one beyond them all
    pub fn get_best_unit(&self, value: &Decimal) -> Result<&Unit, UnitError> {
        let value = value.abs();
        for pair in self.entries.windows(2) {
            if value < pair[1].trigger {
                return Ok(&pair[0].unit);
            }
        }
        self.entries
            .last()
            .map(|entry| &entry.unit)
            .ok_or_else(|| UnitError::EmptySystem {
                dimension: self.dimension,
                system: self.name.clone(),
            })
    }

    /// A randomly chosen unit the value reads nicely in, else the best unit
    pub fn get_good_unit(&self, value: &Decimal, options: u32) -> Result<&Unit, UnitError> {
        self.get_good_unit_with_rng(value, options, &mut rand::thread_rng())
    }

    pub fn get_good_unit_with_rng<R: Rng + ?Sized>(
        &self,
        value: &Decimal,
        options: u32,
        rng: &mut R,
    ) -> Result<&Unit, UnitError> {
        match picker::random_close_unit(&value.abs(), self.units(), options, rng) {
            Some(unit) => Ok(unit),
            None => self.get_best_unit(value),
        }
    }

    /// Member unit matching a token
    pub fn get(&self, token: &str) -> Option<&Unit> {
        self.units()
            .find(|unit| unit.id() == token)
            .or_else(|| self.units().find(|unit| unit.is_unit(token)))
    }

    /// Units in trigger order
    pub fn units(&self) -> impl Iterator<Item = &Unit> + Clone {
        self.entries.iter().map(|entry| &entry.unit)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &Decimal> {
        self.entries.iter().map(|entry| &entry.trigger)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
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

    fn registry() -> UnitRegistry {
        let mut units = UnitRegistry::new();
        for (factor, symbol) in [("0.001", "mm"), ("0.01", "cm"), ("1", "m"), ("1000", "km")] {
            units.add_unit(Unit::Scaled(ScaledUnit::new(d(factor)).with_symbol(symbol)));
        }
        units.add_unit(Unit::infinity(d("1e30")));
        units
    }

    fn metric() -> SystemRegistry {
        let units = registry();
        let mut system = SystemRegistry::new(Dimension::Length, "m");
        for symbol in ["km", "mm", "∞", "m", "cm"] {
            system.add_system_unit(SystemUnit::new(symbol), &units).unwrap();
        }
        system
    }

    fn best(system: &SystemRegistry, value: &str) -> String {
        system.get_best_unit(&d(value)).unwrap().id().to_string()
    }

    #[test]
    fn test_sorted_on_insert() {
        let m = metric();
        let ids: Vec<_> = m.units().map(Unit::id).collect();
        assert_eq!(ids, vec!["mm", "cm", "m", "km", "∞"]);
    }

    #[test]
    fn test_get_best_unit() {
        let system = metric();
        assert_eq!(best(&system, "0.0000001"), "mm");
        assert_eq!(best(&system, "0.005"), "mm");
        assert_eq!(best(&system, "0.5"), "cm");
        assert_eq!(best(&system, "1"), "m");
        assert_eq!(best(&system, "-1500"), "km");
        assert_eq!(best(&system, "1e29"), "km");
        assert_eq!(best(&system, "1e31"), "∞");
        assert_eq!(
            system.get_best_unit(&Decimal::INFINITY).unwrap().id(),
            "∞"
        );
    }

    #[test]
    fn test_explicit_and_relative_triggers() {
        let units = registry();
        let mut system = SystemRegistry::new(Dimension::Length, "x");
        system
            .add_system_unit(SystemUnit::new("m"), &units)
            .unwrap();
        system
            .add_system_unit(SystemUnit::new("km").with_rel_trigger(d("0.1")), &units)
            .unwrap();
        system
            .add_system_unit(SystemUnit::new("mm").with_trigger(d("500")), &units)
            .unwrap();
        let triggers: Vec<_> = system.triggers().cloned().collect();
        assert_eq!(triggers, vec![d("1"), d("100"), d("500")]);
        assert_eq!(best(&system, "150"), "km");
    }

    #[test]
    fn test_conflicting_trigger() {
        let units = registry();
        let mut system = SystemRegistry::new(Dimension::Length, "x");
        let su = SystemUnit::new("m")
            .with_trigger(d("1"))
            .with_rel_trigger(d("1"));
        assert_eq!(
            system.add_system_unit(su, &units),
            Err(UnitError::ConflictingTrigger { unit: "m".into() })
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        let units = registry();
        let mut system = SystemRegistry::new(Dimension::Length, "x");
        assert!(matches!(
            system.add_system_unit(SystemUnit::new("parsec"), &units),
            Err(UnitError::UnknownUnit { .. })
        ));
        assert_eq!(
            system.get_best_unit(&d("1")),
            Err(UnitError::EmptySystem {
                dimension: Dimension::Length,
                system: "x".into()
            })
        );
    }

    #[test]
    fn test_equal_triggers_keep_insertion_order() {
        let mut units = UnitRegistry::new();
        units.add_unit(Unit::Scaled(ScaledUnit::new(d("1")).with_symbol("a")));
        units.add_unit(Unit::Scaled(ScaledUnit::new(d("1")).with_symbol("b")));
        let mut system = SystemRegistry::new(Dimension::Length, "x");
        system.add_system_unit(SystemUnit::new("a"), &units).unwrap();
        system.add_system_unit(SystemUnit::new("b"), &units).unwrap();
        let ids: Vec<_> = system.units().map(Unit::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_get_good_unit_falls_back_to_best() {
        let system = metric();
        let mut rng = StdRng::seed_from_u64(1);
        let unit = system.get_good_unit_with_rng(&d("2"), 6, &mut rng).unwrap();
        assert_eq!(unit.id(), "m");

        // 0.37 m is 37 cm and 370 mm, neither under the ceiling of 10
        let unit = system.get_good_unit_with_rng(&d("0.37"), 6, &mut rng).unwrap();
        assert_eq!(unit.id(), "cm");
    }

    #[test]
    fn test_get_good_unit_uses_magnitude() {
        let system = metric();
        let mut rng = StdRng::seed_from_u64(1);
        let unit = system.get_good_unit_with_rng(&d("-2"), 6, &mut rng).unwrap();
        assert_eq!(unit.id(), "m");
        let unit = system.get_good_unit_with_rng(&d("-0.37"), 6, &mut rng).unwrap();
        assert_eq!(unit.id(), "cm");
    }
}
