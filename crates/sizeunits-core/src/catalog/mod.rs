//! Unit catalogs
//!
//! A [`UnitCatalog`] owns every dimension's units and display systems. Build
//! it once, before any parsing or formatting, and pass it by reference.

mod data;

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;

use crate::decimal::Decimal;
use crate::error::UnitError;
use crate::types::{Dimension, ScaledUnit, SystemRegistry, SystemUnit, Unit, UnitRegistry};

pub use data::{SystemUnitDef, UnitDef};

/// Units and named systems of one dimension
#[derive(Debug, Clone)]
pub struct DimensionTable {
    dimension: Dimension,
    units: UnitRegistry,
    systems: BTreeMap<String, SystemRegistry>,
}

impl DimensionTable {
    fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            units: UnitRegistry::new(),
            systems: BTreeMap::new(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn has_system(&self, name: &str) -> bool {
        self.systems.contains_key(name)
    }

    pub fn system(&self, name: &str) -> Result<&SystemRegistry, UnitError> {
        self.systems
            .get(name)
            .ok_or_else(|| UnitError::UnknownSystem {
                dimension: self.dimension,
                system: name.to_string(),
            })
    }

    pub fn systems(&self) -> impl Iterator<Item = &SystemRegistry> {
        self.systems.values()
    }

    fn add_system_unit(&mut self, system: &str, system_unit: SystemUnit) -> Result<(), UnitError> {
        let dimension = self.dimension;
        self.systems
            .entry(system.to_string())
            .or_insert_with(|| SystemRegistry::new(dimension, system))
            .add_system_unit(system_unit, &self.units)
    }
}

#[derive(Debug, Clone)]
pub struct UnitCatalog {
    size: DimensionTable,
    weight: DimensionTable,
    time: DimensionTable,
}

impl UnitCatalog {
    /// No units at all
    pub fn empty() -> Self {
        Self {
            size: DimensionTable::new(Dimension::Length),
            weight: DimensionTable::new(Dimension::Mass),
            time: DimensionTable::new(Dimension::Time),
        }
    }

    /// Only the built-in units every dimension needs: its `∞` unit, and the
    /// feet-and-inches unit for sizes. No systems.
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        for dimension in Dimension::ALL {
            catalog.add_unit(dimension, Unit::infinity(dimension.infinity_threshold()));
        }
        catalog.add_unit(Dimension::Length, Unit::FeetAndInches);
        catalog
    }

    /// Built-in units plus the bundled tables for every dimension
    pub fn bundled() -> Result<Self, UnitError> {
        let mut catalog = Self::new();
        for table in data::BUNDLED {
            for def in table.units {
                catalog.add_unit(table.dimension, unit_from_def(def)?);
            }
            for (system, members) in table.systems {
                for member in *members {
                    catalog.add_system_unit(table.dimension, system, system_unit_from_def(member)?)?;
                }
            }
            catalog.log_loaded(table.dimension, "bundled tables");
        }
        Ok(catalog)
    }

    pub fn table(&self, dimension: Dimension) -> &DimensionTable {
        match dimension {
            Dimension::Length => &self.size,
            Dimension::Mass => &self.weight,
            Dimension::Time => &self.time,
        }
    }

    fn table_mut(&mut self, dimension: Dimension) -> &mut DimensionTable {
        match dimension {
            Dimension::Length => &mut self.size,
            Dimension::Mass => &mut self.weight,
            Dimension::Time => &mut self.time,
        }
    }

    pub fn add_unit(&mut self, dimension: Dimension, unit: Unit) {
        self.table_mut(dimension).units.add_unit(unit);
    }

    /// Add a member to a system, creating the system on first use. The unit
    /// reference must already be registered.
    pub fn add_system_unit(
        &mut self,
        dimension: Dimension,
        system: &str,
        system_unit: SystemUnit,
    ) -> Result<(), UnitError> {
        self.table_mut(dimension).add_system_unit(system, system_unit)
    }

    /// Load a JSON unit file: `{"units": [...], "systems": {"m": [...]}}`
    pub fn load_json(&mut self, dimension: Dimension, text: &str) -> Result<(), UnitError> {
        let file: UnitFile =
            serde_json::from_str(text).map_err(|e| UnitError::InvalidUnitFile(e.to_string()))?;

        for record in file.units {
            self.add_unit(dimension, record.into_unit());
        }
        for (system, members) in file.systems {
            for member in members {
                let mut system_unit = SystemUnit::new(&member.unit);
                if let Some(trigger) = member.trigger {
                    system_unit = system_unit.with_trigger(trigger);
                }
                if let Some(rel_trigger) = member.rel_trigger {
                    system_unit = system_unit.with_rel_trigger(rel_trigger);
                }
                self.add_system_unit(dimension, &system, system_unit)?;
            }
        }
        self.log_loaded(dimension, "unit file");
        Ok(())
    }

    fn log_loaded(&self, dimension: Dimension, source: &str) {
        let table = self.table(dimension);
        debug!(
            "loaded {} {} units and {} systems from {}",
            table.units.len(),
            dimension,
            table.systems.len(),
            source
        );
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_factor(text: &str) -> Result<Decimal, UnitError> {
    text.parse()
        .map_err(|_| UnitError::InvalidUnitFile(format!("'{text}' is not a valid factor")))
}

fn unit_from_def(def: &UnitDef) -> Result<Unit, UnitError> {
    let mut unit = ScaledUnit::new(parse_factor(def.factor)?)
        .with_symbols(def.symbols)
        .with_names(def.names)
        .fractional(def.fractional);
    if let Some(symbol) = def.symbol {
        unit = unit.with_symbol(symbol);
    }
    if let Some(name) = def.name {
        unit = unit.with_name(name);
    }
    if let Some(plural) = def.name_plural {
        unit = unit.with_plural(plural);
    }
    Ok(Unit::Scaled(unit))
}

fn system_unit_from_def(def: &SystemUnitDef) -> Result<SystemUnit, UnitError> {
    let mut system_unit = SystemUnit::new(def.unit);
    if let Some(trigger) = def.trigger {
        system_unit = system_unit.with_trigger(parse_factor(trigger)?);
    }
    if let Some(rel_trigger) = def.rel_trigger {
        system_unit = system_unit.with_rel_trigger(parse_factor(rel_trigger)?);
    }
    Ok(system_unit)
}

#[derive(Debug, Deserialize)]
struct UnitFile {
    #[serde(default)]
    units: Vec<UnitRecord>,
    #[serde(default)]
    systems: BTreeMap<String, Vec<SystemUnitRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitRecord {
    factor: Decimal,
    symbol: Option<String>,
    name: Option<String>,
    name_plural: Option<String>,
    #[serde(default)]
    symbols: Vec<String>,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    fractional: bool,
    #[serde(default)]
    hidden: bool,
}

impl UnitRecord {
    fn into_unit(self) -> Unit {
        let mut unit = ScaledUnit::new(self.factor)
            .with_symbols(&self.symbols)
            .with_names(&self.names)
            .fractional(self.fractional)
            .hidden(self.hidden);
        if let Some(symbol) = &self.symbol {
            unit = unit.with_symbol(symbol);
        }
        if let Some(name) = &self.name {
            unit = unit.with_name(name);
        }
        if let Some(plural) = &self.name_plural {
            unit = unit.with_plural(plural);
        }
        Unit::Scaled(unit)
    }
}

#[derive(Debug, Deserialize)]
struct SystemUnitRecord {
    unit: String,
    trigger: Option<Decimal>,
    rel_trigger: Option<Decimal>,
}
