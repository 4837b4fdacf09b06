//! Dimensions and the public quantity types
//!
//! A quantity is a [`Decimal`] in its dimension's base unit (metres, grams or
//! seconds). Parsing and formatting go through a [`UnitCatalog`], which owns
//! every dimension's units and display systems.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use log::trace;
use num_bigint::BigInt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::system::DEFAULT_OPTIONS;
use crate::catalog::UnitCatalog;
use crate::decimal::{Decimal, DecimalSpec};
use crate::error::{Error, ParseError, UnitError};
use crate::parser::{split_feet_and_inches, split_quantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Mass,
    Time,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Length, Dimension::Mass, Dimension::Time];

    /// Label used in user-facing errors
    pub fn kind(self) -> &'static str {
        match self {
            Dimension::Length => "size",
            Dimension::Mass => "weight",
            Dimension::Time => "time",
        }
    }

    /// Short type code: `SV`, `WV` or `TV`
    pub fn code(self) -> &'static str {
        match self {
            Dimension::Length => "SV",
            Dimension::Mass => "WV",
            Dimension::Time => "TV",
        }
    }

    pub fn base_symbol(self) -> &'static str {
        match self {
            Dimension::Length => "m",
            Dimension::Mass => "g",
            Dimension::Time => "s",
        }
    }

    /// Magnitude at which the dimension's `∞` unit takes over display
    pub fn infinity_threshold(self) -> Decimal {
        let (digits, scale) = match self {
            Dimension::Length => (879848, -48),
            Dimension::Mass => (34, -83),
            Dimension::Time => (31556952, -100),
        };
        Decimal::Finite(BigDecimal::new(BigInt::from(digits), scale))
    }

    /// Accepts kind labels, type codes and variant names, any case
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "size" | "sv" | "length" => Some(Dimension::Length),
            "weight" | "wv" | "mass" => Some(Dimension::Mass),
            "time" | "tv" => Some(Dimension::Time),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl FromStr for Dimension {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::from_name(s).ok_or_else(|| ParseError::invalid_value(s, "dimension"))
    }
}

/// A value of one dimension
pub trait Quantity: Sized {
    const DIMENSION: Dimension;

    fn new(value: Decimal) -> Self;

    /// Value in base units
    fn value(&self) -> &Decimal;

    /// Parse free text such as `5ft8in`, `1,000 km`, `.5 lb` or `infinity`
    fn parse(text: &str, catalog: &UnitCatalog) -> Result<Self, ParseError> {
        parse_value(Self::DIMENSION, text, catalog).map(Self::new)
    }

    /// Render with a format spec whose type letters name display systems,
    /// e.g. `,.3mu` for metric and US units; uppercase letters prefer names
    fn format(&self, spec: &str, catalog: &UnitCatalog) -> Result<String, Error> {
        format_value(Self::DIMENSION, self.value(), spec, catalog)
    }

    /// Render in the best unit of one system
    fn to_best_unit(&self, system: &str, spec: &str, catalog: &UnitCatalog) -> Result<String, Error> {
        let (name, prefer_name) = system_code(system);
        let spec = DecimalSpec::parse(spec)?;
        let unit = catalog
            .table(Self::DIMENSION)
            .system(&name)?
            .get_best_unit(self.value())?;
        Ok(unit.format(self.value(), &spec, prefer_name))
    }

    /// Render in a randomly chosen unit of one system that the value reads nicely in
    fn to_good_unit(&self, system: &str, spec: &str, catalog: &UnitCatalog) -> Result<String, Error> {
        self.to_good_unit_with_rng(system, spec, catalog, &mut rand::thread_rng())
    }

    fn to_good_unit_with_rng<R: Rng + ?Sized>(
        &self,
        system: &str,
        spec: &str,
        catalog: &UnitCatalog,
        rng: &mut R,
    ) -> Result<String, Error> {
        let (name, prefer_name) = system_code(system);
        let spec = DecimalSpec::parse(spec)?;
        let unit = catalog
            .table(Self::DIMENSION)
            .system(&name)?
            .get_good_unit_with_rng(self.value(), DEFAULT_OPTIONS, rng)?;
        Ok(unit.format(self.value(), &spec, prefer_name))
    }

    /// Render in a named member unit of one system
    fn to_unit(
        &self,
        system: &str,
        unit: &str,
        spec: &str,
        catalog: &UnitCatalog,
    ) -> Result<String, Error> {
        let (name, prefer_name) = system_code(system);
        let spec = DecimalSpec::parse(spec)?;
        let member = catalog
            .table(Self::DIMENSION)
            .system(&name)?
            .get(unit)
            .ok_or_else(|| UnitError::UnknownUnit {
                dimension: Self::DIMENSION,
                token: unit.to_string(),
            })?;
        Ok(member.format(self.value(), &spec, prefer_name))
    }
}

/// Lowercased system name, and whether the code asked for unit names
fn system_code(code: &str) -> (String, bool) {
    let prefer_name = code.chars().any(char::is_uppercase) && code == code.to_uppercase();
    (code.to_lowercase(), prefer_name)
}

fn parse_value(dimension: Dimension, text: &str, catalog: &UnitCatalog) -> Result<Decimal, ParseError> {
    let invalid = || ParseError::invalid_value(text, dimension.kind());

    let mut s: String = text
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string();

    if dimension == Dimension::Length {
        if let Some((feet, inches)) = split_feet_and_inches(&s) {
            let feet: Decimal = feet.parse().map_err(|_| invalid())?;
            let inches: Decimal = inches.parse().map_err(|_| invalid())?;
            let total = feet
                .checked_mul(&Decimal::from(12))
                .and_then(|feet| feet.checked_add(&inches))
                .map_err(|_| invalid())?;
            s = format!("{total}in");
            trace!("read {text:?} as {s:?}");
        }
    }

    let s = s.replace(',', "");
    match s.to_lowercase().as_str() {
        "0" | "zero" | "no" => {
            if s.eq_ignore_ascii_case("no") {
                trace!("No.");
            }
            return Ok(Decimal::zero());
        }
        "infinity" | "inf" | "∞" | "yes" => {
            if s.eq_ignore_ascii_case("yes") {
                trace!("Yes.");
            }
            return Ok(Decimal::INFINITY);
        }
        _ => {}
    }

    let s = match s.strip_prefix('.') {
        Some(rest) => format!("0.{rest}"),
        None => s,
    };
    let (amount, token) = split_quantity(dimension, &s).ok_or_else(invalid)?;
    let amount: Decimal = amount.unwrap_or("1").parse().map_err(|_| invalid())?;
    let unit = catalog
        .table(dimension)
        .units()
        .get(token)
        .ok_or_else(invalid)?;
    trace!("{token:?} resolved to {}", unit.id());
    unit.to_base_unit(&amount).map_err(|_| invalid())
}

fn format_value(
    dimension: Dimension,
    value: &Decimal,
    spec: &str,
    catalog: &UnitCatalog,
) -> Result<String, Error> {
    let mut parsed = DecimalSpec::parse(spec)?;
    let table = catalog.table(dimension);
    let systems = parsed.kind.take().unwrap_or_default();

    let all_known = !systems.is_empty()
        && systems
            .chars()
            .all(|letter| table.has_system(&letter.to_lowercase().to_string()));
    if !all_known {
        parsed.kind = (!systems.is_empty()).then_some(systems);
        return Ok(parsed.format(value));
    }

    let mut formatted: Vec<String> = Vec::new();
    for letter in systems.chars() {
        let system = table.system(&letter.to_lowercase().to_string())?;
        let unit = system.get_best_unit(value)?;
        let text = unit.format(value, &parsed, letter.is_uppercase());
        if !formatted.contains(&text) {
            formatted.push(text);
        }
    }
    Ok(formatted.join(" / "))
}

macro_rules! quantity_type {
    ($(#[$meta:meta])* $name:ident, $dimension:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Decimal);

        impl Quantity for $name {
            const DIMENSION: Dimension = $dimension;

            fn new(value: Decimal) -> Self {
                $name(value)
            }

            fn value(&self) -> &Decimal {
                &self.0
            }
        }

        impl $name {
            pub fn into_inner(self) -> Decimal {
                self.0
            }
        }

        impl From<Decimal> for $name {
            fn from(value: Decimal) -> Self {
                $name(value)
            }
        }

        impl From<$name> for Decimal {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                $name(-self.0)
            }
        }

        /// The bare base-unit number
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

quantity_type!(
    /// Size value: a length in metres
    SV,
    Dimension::Length
);
quantity_type!(
    /// Weight value: a mass in grams
    WV,
    Dimension::Mass
);
quantity_type!(
    /// Time value: a duration in seconds
    TV,
    Dimension::Time
);

/// Parse a size that must not be negative
pub fn pos_sv(text: &str, catalog: &UnitCatalog) -> Result<SV, ParseError> {
    let value = SV::parse(text, catalog)?;
    if value.value().is_negative() {
        return Err(ParseError::invalid_value(text, "SV"));
    }
    Ok(value)
}

/// Parse a weight that must not be negative
pub fn pos_wv(text: &str, catalog: &UnitCatalog) -> Result<WV, ParseError> {
    let value = WV::parse(text, catalog)?;
    if value.value().is_negative() {
        return Err(ParseError::invalid_value(text, "WV"));
    }
    Ok(value)
}
