//! Units and the unit registry
//!
//! A unit scales a base-unit value for display and recognizes the tokens
//! users type for it. [`Unit::Fixed`] always renders the same text (the `∞`
//! entry of every dimension) and [`Unit::FeetAndInches`] renders heights as
//! `5'8"`.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::decimal::{accuracy_note, round_fraction, Decimal, DecimalSpec};
use crate::error::DecimalError;

/// Identifier of the feet-and-inches unit in system tables
pub const FEET_AND_INCHES_ID: &str = "'\"";

/// Metres per inch
pub fn inch() -> Decimal {
    Decimal::Finite(BigDecimal::new(BigInt::from(254), 4))
}

/// Metres per foot
pub fn foot() -> Decimal {
    Decimal::Finite(BigDecimal::new(BigInt::from(3048), 4))
}

/// A unit that scales by a constant factor
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledUnit {
    factor: Decimal,
    symbol: Option<String>,
    name: Option<String>,
    name_plural: Option<String>,
    /// Case-sensitive tokens
    symbols: Vec<String>,
    /// Case-insensitive tokens, stored lowercase
    names: Vec<String>,
    fractional: bool,
    hidden: bool,
}

impl ScaledUnit {
    pub fn new(factor: Decimal) -> Self {
        Self {
            factor,
            symbol: None,
            name: None,
            name_plural: None,
            symbols: Vec::new(),
            names: Vec::new(),
            fractional: false,
            hidden: false,
        }
    }

    /// Display symbol; also accepted as a case-sensitive token
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.add_symbol(symbol);
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Singular display name; also accepted as a case-insensitive token
    pub fn with_name(mut self, name: &str) -> Self {
        self.add_name(name);
        self.name = Some(name.to_string());
        self
    }

    pub fn with_plural(mut self, plural: &str) -> Self {
        self.add_name(plural);
        self.name_plural = Some(plural.to_string());
        self
    }

    /// Extra case-sensitive tokens
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for symbol in symbols {
            self.add_symbol(symbol.as_ref());
        }
        self
    }

    /// Extra case-insensitive tokens
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_name(name.as_ref());
        }
        self
    }

    /// Allow eighths-fraction rendering for this unit
    pub fn fractional(mut self, fractional: bool) -> Self {
        self.fractional = fractional;
        self
    }

    /// Leave out of registry iteration
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn add_symbol(&mut self, symbol: &str) {
        let symbol = symbol.trim().to_string();
        if !self.symbols.contains(&symbol) {
            self.symbols.push(symbol);
        }
    }

    fn add_name(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn factor(&self) -> &Decimal {
        &self.factor
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn name_plural(&self) -> Option<&str> {
        self.name_plural.as_deref()
    }

    pub fn is_fractional(&self) -> bool {
        self.fractional
    }

    pub fn is_unit(&self, token: &str) -> bool {
        let token = token.trim();
        if self.symbols.iter().any(|s| s == token) {
            return true;
        }
        let folded = token.to_lowercase();
        self.names.iter().any(|n| *n == folded)
    }

    pub fn format(&self, value: &Decimal, spec: &DecimalSpec, prefer_name: bool) -> String {
        if value.is_infinite() {
            let text = if prefer_name { "infinity" } else { "∞" };
            return format!("{}{}", value.sign(), text);
        }

        let scaled = value
            .checked_div(&self.factor)
            .unwrap_or_else(|_| value.clone());
        let mut spec = spec.clone();
        if !self.fractional {
            spec.fraction = None;
        }
        let (number, accuracy) = spec.format_parts(&scaled);
        if number == "0" {
            return number;
        }

        let single = number == "1" || number == "-1";
        let name = if single {
            self.name.as_ref().or(self.name_plural.as_ref())
        } else {
            self.name_plural.as_ref().or(self.name.as_ref())
        };

        let mut formatted = match (prefer_name, name, &self.symbol) {
            (true, Some(name), _) => format!("{number} {name}"),
            (_, _, Some(symbol)) => format!("{number}{symbol}"),
            (false, Some(name), None) => format!("{number} {name}"),
            _ => number,
        };
        if let Some(accuracy) = accuracy {
            formatted.push_str(&accuracy);
        }
        formatted
    }
}

/// A unit that always renders the same text
#[derive(Debug, Clone, PartialEq)]
pub struct FixedUnit {
    factor: Decimal,
    symbol: String,
    name: Option<String>,
}

impl FixedUnit {
    pub fn new(factor: Decimal, symbol: &str, name: Option<&str>) -> Self {
        Self {
            factor,
            symbol: symbol.to_string(),
            name: name.map(str::to_string),
        }
    }

    fn is_unit(&self, token: &str) -> bool {
        let token = token.trim();
        token == self.symbol
            || self
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(token))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Scaled(ScaledUnit),
    Fixed(FixedUnit),
    /// Imperial heights; hidden and never matched by token
    FeetAndInches,
}

impl Unit {
    /// The `∞` entry placed at the top of a dimension's systems
    pub fn infinity(threshold: Decimal) -> Self {
        Unit::Fixed(FixedUnit::new(threshold, "∞", Some("infinity")))
    }

    pub fn factor(&self) -> Decimal {
        match self {
            Unit::Scaled(unit) => unit.factor.clone(),
            Unit::Fixed(unit) => unit.factor.clone(),
            Unit::FeetAndInches => foot(),
        }
    }

    /// Reference used by system tables: symbol, else name, else plural
    pub fn id(&self) -> &str {
        match self {
            Unit::Scaled(unit) => unit
                .symbol
                .as_deref()
                .or(unit.name.as_deref())
                .or(unit.name_plural.as_deref())
                .unwrap_or(""),
            Unit::Fixed(unit) => &unit.symbol,
            Unit::FeetAndInches => FEET_AND_INCHES_ID,
        }
    }

    pub fn is_unit(&self, token: &str) -> bool {
        match self {
            Unit::Scaled(unit) => unit.is_unit(token),
            Unit::Fixed(unit) => unit.is_unit(token),
            Unit::FeetAndInches => false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Unit::Scaled(unit) => unit.hidden,
            Unit::Fixed(_) => false,
            Unit::FeetAndInches => true,
        }
    }

    /// Convert an amount of this unit into the base unit
    pub fn to_base_unit(&self, amount: &Decimal) -> Result<Decimal, DecimalError> {
        match self {
            Unit::Scaled(unit) => amount.checked_mul(&unit.factor),
            Unit::Fixed(unit) => Ok(unit.factor.clone()),
            Unit::FeetAndInches => amount.checked_mul(&foot()),
        }
    }

    /// Render a base-unit value in this unit
    pub fn format(&self, value: &Decimal, spec: &DecimalSpec, prefer_name: bool) -> String {
        match self {
            Unit::Scaled(unit) => unit.format(value, spec, prefer_name),
            Unit::Fixed(unit) => {
                let text = match (&unit.name, prefer_name) {
                    (Some(name), true) => name,
                    _ => &unit.symbol,
                };
                format!("{}{}", value.sign(), text)
            }
            Unit::FeetAndInches => format_feet_and_inches(value, spec),
        }
    }
}

fn format_feet_and_inches(value: &Decimal, spec: &DecimalSpec) -> String {
    if value.is_infinite() {
        return format!("{}∞", value.sign());
    }

    let precision = spec.precision_or_default() as i64;
    let exact = value
        .abs()
        .checked_div(&inch())
        .unwrap_or_else(|_| Decimal::zero());
    // Round the total first so the inch part stays below 12
    let total = match spec.fraction {
        Some(denominator) => round_fraction(&exact, denominator),
        None => exact.round_dp(precision),
    };
    let (feet, inches) = total
        .checked_divmod(&Decimal::from(12))
        .unwrap_or_else(|_| (Decimal::zero(), total.clone()));
    let tiny = Decimal::Finite(BigDecimal::new(BigInt::from(1), 100));
    let inches = if inches < tiny { Decimal::zero() } else { inches };

    let sign = if value.is_negative() && !total.is_zero() {
        "-"
    } else {
        match spec.sign {
            Some(crate::decimal::SignOption::Always) => "+",
            Some(crate::decimal::SignOption::Space) => " ",
            _ => "",
        }
    };
    let feet_spec = DecimalSpec {
        sign: None,
        precision: Some(0),
        kind: None,
        fraction: None,
        accuracy: None,
        ..spec.clone()
    };
    let inch_spec = DecimalSpec {
        fill: None,
        align: None,
        sign: None,
        zero_pad: false,
        width: None,
        kind: None,
        accuracy: None,
        ..spec.clone()
    };

    let mut formatted = format!(
        "{sign}{}'{}\"",
        feet_spec.format(&feet),
        inch_spec.format(&inches)
    );
    if let Some(places) = spec.accuracy {
        formatted.push_str(&accuracy_note(&total, &exact, places));
    }
    formatted
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Scaled(unit) => match (&unit.name, &unit.symbol) {
                (Some(name), Some(symbol)) => write!(f, "{} ({})", name.trim(), symbol.trim()),
                (Some(name), None) => f.write_str(name.trim()),
                (None, Some(symbol)) => f.write_str(symbol.trim()),
                (None, None) => f.write_str("?"),
            },
            Unit::Fixed(unit) => f.write_str(&unit.symbol),
            Unit::FeetAndInches => f.write_str("feet and inches"),
        }
    }
}

/// Append-only list of a dimension's units, searched in insertion order
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// First unit matching a user-typed token
    pub fn get(&self, token: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.is_unit(token))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Resolve a system-table reference: exact id first, then token rules
    pub fn resolve(&self, reference: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|unit| unit.id() == reference)
            .or_else(|| self.get(reference))
    }

    /// Visible units only
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| !unit.is_hidden())
    }

    /// Count of every unit, hidden ones included
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
