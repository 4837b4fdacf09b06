//! Change expressions
//!
//! Shorthand for how a size should change, optionally over time and up to a
//! limit:
//!
//! - diff: `2m`, `+2m`, `minus 3ft`, `x2`, `2x`, `/2`, `50%`, `%50`, `**2`
//! - rate: `<diff>/3s`, `<diff> per hour`, `<diff> every 2 days`
//! - limited rate: `<rate> until 12m`, `<rate> for 9 hours`, `<rate> -> 12m`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::UnitCatalog;
use crate::decimal::Decimal;
use crate::error::{DecimalError, Error, ParseError};
use crate::parser::{
    parse_change_syntax, parse_multiplier_syntax, split_limited_rate, split_rate, ChangeOp,
    ChangeSyntax,
};
use crate::types::{Quantity, SV, TV};

const ADD_SPEC: &str = ",.3mu";
const FACTOR_SPEC: &str = ".10";
const TIME_SPEC: &str = "m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Multiply,
    Power,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeType::Add => "add",
            ChangeType::Multiply => "multiply",
            ChangeType::Power => "power",
        })
    }
}

/// Turn a multiplicative operator and its number into a plain multiplier:
/// divide takes the reciprocal, percent divides by 100, subtract negates
fn normalize(op: Option<ChangeOp>, number: &Decimal) -> Result<Decimal, DecimalError> {
    match op {
        None | Some(ChangeOp::Multiply) | Some(ChangeOp::Add) | Some(ChangeOp::Power) => {
            Ok(number.clone())
        }
        Some(ChangeOp::Divide) => Decimal::one().checked_div(number),
        Some(ChangeOp::Percent) => number.checked_div(&Decimal::from(100)),
        Some(ChangeOp::Subtract) => Ok(-number),
    }
}

/// Plain multipliers: `2`, `x2`, `2x`, `/4`, `50%`
pub struct Mult;

impl Mult {
    pub fn parse(text: &str) -> Result<Decimal, ParseError> {
        let invalid = || ParseError::invalid_value(text, "multiplier");
        let (op, number) = parse_multiplier_syntax(text.trim()).ok_or_else(invalid)?;
        let number: Decimal = number.parse().map_err(|_| invalid())?;
        normalize(op, &number).map_err(|_| invalid())
    }
}

/// What a diff does to a size
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Add(SV),
    Multiply(Decimal),
    Power(Decimal),
}

impl Delta {
    pub fn changetype(&self) -> ChangeType {
        match self {
            Delta::Add(_) => ChangeType::Add,
            Delta::Multiply(_) => ChangeType::Multiply,
            Delta::Power(_) => ChangeType::Power,
        }
    }

    /// Base-unit size for additions, the bare factor otherwise
    pub fn amount(&self) -> &Decimal {
        match self {
            Delta::Add(size) => size.value(),
            Delta::Multiply(factor) | Delta::Power(factor) => factor,
        }
    }
}

/// A one-off change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DiffRecord", from = "DiffRecord")]
pub struct Diff {
    delta: Delta,
    original: String,
}

impl Diff {
    pub fn new(delta: Delta, original: impl Into<String>) -> Self {
        Self {
            delta,
            original: original.into(),
        }
    }

    pub fn parse(text: &str, catalog: &UnitCatalog) -> Result<Self, ParseError> {
        let factor = |op: Option<ChangeOp>, number: &str| -> Result<Decimal, ParseError> {
            let invalid = || ParseError::invalid_value(number, "multiplier");
            let number: Decimal = number.trim().parse().map_err(|_| invalid())?;
            normalize(op, &number).map_err(|_| invalid())
        };

        let delta = match parse_change_syntax(text) {
            ChangeSyntax::Prefixed { op, rest } => match op {
                ChangeOp::Add => Delta::Add(SV::parse(rest, catalog)?),
                ChangeOp::Subtract => Delta::Add(-SV::parse(rest, catalog)?),
                ChangeOp::Power => Delta::Power(factor(None, rest)?),
                op => Delta::Multiply(factor(Some(op), rest)?),
            },
            ChangeSyntax::Suffixed { number, op } => Delta::Multiply(factor(Some(op), number)?),
            ChangeSyntax::Bare => Delta::Add(SV::parse(text, catalog)?),
        };
        Ok(Self::new(delta, text))
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    pub fn changetype(&self) -> ChangeType {
        self.delta.changetype()
    }

    pub fn amount(&self) -> &Decimal {
        self.delta.amount()
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// `+2m / 6'6.74"`, `-1ft`, `x2`, `^2`
    ///
    /// Multipliers always print with `x`, including factors below zero.
    pub fn format(&self, catalog: &UnitCatalog) -> Result<String, Error> {
        Ok(match &self.delta {
            Delta::Add(size) => {
                let operator = if size.value().is_negative() { "-" } else { "+" };
                let magnitude = SV::new(size.value().abs());
                format!("{operator}{}", magnitude.format(ADD_SPEC, catalog)?)
            }
            Delta::Multiply(factor) => format!("x{}", factor.format_with(FACTOR_SPEC)?),
            Delta::Power(factor) => format!("^{}", factor.format_with(FACTOR_SPEC)?),
        })
    }
}

#[derive(Serialize, Deserialize)]
struct DiffRecord {
    changetype: ChangeType,
    amount: Decimal,
    original: String,
}

impl From<Diff> for DiffRecord {
    fn from(diff: Diff) -> Self {
        DiffRecord {
            changetype: diff.changetype(),
            amount: diff.amount().clone(),
            original: diff.original,
        }
    }
}

impl From<DiffRecord> for Diff {
    fn from(record: DiffRecord) -> Self {
        let delta = match record.changetype {
            ChangeType::Add => Delta::Add(SV::new(record.amount)),
            ChangeType::Multiply => Delta::Multiply(record.amount),
            ChangeType::Power => Delta::Power(record.amount),
        };
        Diff::new(delta, record.original)
    }
}

/// A diff applied once per time period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    diff: Diff,
    time: TV,
    original: String,
}

impl Rate {
    pub fn new(diff: Diff, time: TV, original: impl Into<String>) -> Self {
        Self {
            diff,
            time,
            original: original.into(),
        }
    }

    pub fn parse(text: &str, catalog: &UnitCatalog) -> Result<Self, ParseError> {
        let text = text.replace("mph", "mi/hr").replace("kph", "km/hr");
        let (diff, time) = split_rate(&text).ok_or_else(|| ParseError::grammar(&text, "Rate"))?;
        let diff = Diff::parse(diff.trim(), catalog)?;
        let time = TV::parse(time, catalog)?;
        Ok(Self::new(diff, time, text))
    }

    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    pub fn time(&self) -> &TV {
        &self.time
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Metres added per second; zero unless the diff adds
    pub fn add_per_second(&self) -> Result<Decimal, DecimalError> {
        match self.diff.delta() {
            Delta::Add(size) => size.value().checked_div(self.time.value()),
            _ => Ok(Decimal::zero()),
        }
    }

    /// Factor applied per second; one unless the diff multiplies
    pub fn mult_per_second(&self) -> Result<Decimal, DecimalError> {
        match self.diff.delta() {
            Delta::Multiply(factor) => {
                let exponent = Decimal::one().checked_div(self.time.value())?;
                factor.checked_pow(&exponent)
            }
            _ => Ok(Decimal::one()),
        }
    }

    pub fn format(&self, catalog: &UnitCatalog) -> Result<String, Error> {
        Ok(format!(
            "{} per {}",
            self.diff.format(catalog)?,
            self.time.format(TIME_SPEC, catalog)?
        ))
    }
}

/// Where a limited rate stops: at a size, or after a duration
#[derive(Debug, Clone, PartialEq)]
pub enum Stop {
    Size(SV),
    Time(TV),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopType {
    SV,
    TV,
}

/// A rate that ends at a target size or after a duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "LimitedRateRecord", from = "LimitedRateRecord")]
pub struct LimitedRate {
    rate: Rate,
    stop: Stop,
    original: String,
}

impl LimitedRate {
    pub fn new(rate: Rate, stop: Stop, original: impl Into<String>) -> Self {
        Self {
            rate,
            stop,
            original: original.into(),
        }
    }

    pub fn parse(text: &str, catalog: &UnitCatalog) -> Result<Self, ParseError> {
        let fail = || ParseError::grammar(text, "LimitedRate");
        let (rate, stop) = split_limited_rate(text).ok_or_else(fail)?;
        let rate = Rate::parse(rate, catalog)?;
        let stop = SV::parse(stop, catalog)
            .map(Stop::Size)
            .or_else(|_| TV::parse(stop, catalog).map(Stop::Time))
            .map_err(|_| fail())?;
        Ok(Self::new(rate, stop, text))
    }

    pub fn rate(&self) -> &Rate {
        &self.rate
    }

    pub fn stop(&self) -> &Stop {
        &self.stop
    }

    pub fn stoptype(&self) -> StopType {
        match self.stop {
            Stop::Size(_) => StopType::SV,
            Stop::Time(_) => StopType::TV,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn format(&self, catalog: &UnitCatalog) -> Result<String, Error> {
        let (joiner, stop) = match &self.stop {
            Stop::Size(size) => ("until", size.format(ADD_SPEC, catalog)?),
            Stop::Time(time) => ("for", time.format(TIME_SPEC, catalog)?),
        };
        Ok(format!("{} {joiner} {stop}", self.rate.format(catalog)?))
    }
}

#[derive(Serialize, Deserialize)]
struct LimitedRateRecord {
    rate: Rate,
    stop: Decimal,
    original: String,
    stoptype: StopType,
}

impl From<LimitedRate> for LimitedRateRecord {
    fn from(limited: LimitedRate) -> Self {
        let stoptype = limited.stoptype();
        let stop = match limited.stop {
            Stop::Size(size) => size.into_inner(),
            Stop::Time(time) => time.into_inner(),
        };
        LimitedRateRecord {
            rate: limited.rate,
            stop,
            original: limited.original,
            stoptype,
        }
    }
}

impl From<LimitedRateRecord> for LimitedRate {
    fn from(record: LimitedRateRecord) -> Self {
        let stop = match record.stoptype {
            StopType::SV => Stop::Size(SV::new(record.stop)),
            StopType::TV => Stop::Time(TV::new(record.stop)),
        };
        LimitedRate::new(record.rate, stop, record.original)
    }
}

/// Any change expression; the JSON form is that of the inner value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Change {
    LimitedRate(LimitedRate),
    Rate(Rate),
    Diff(Diff),
}

impl Change {
    /// Try a limited rate, then a rate, then a diff
    pub fn parse(text: &str, catalog: &UnitCatalog) -> Result<Self, ParseError> {
        LimitedRate::parse(text, catalog)
            .map(Change::LimitedRate)
            .or_else(|_| Rate::parse(text, catalog).map(Change::Rate))
            .or_else(|_| Diff::parse(text, catalog).map(Change::Diff))
            .map_err(|_| ParseError::grammar(text, "Diff"))
    }

    pub fn original(&self) -> &str {
        match self {
            Change::LimitedRate(limited) => limited.original(),
            Change::Rate(rate) => rate.original(),
            Change::Diff(diff) => diff.original(),
        }
    }

    pub fn format(&self, catalog: &UnitCatalog) -> Result<String, Error> {
        match self {
            Change::LimitedRate(limited) => limited.format(catalog),
            Change::Rate(rate) => rate.format(catalog),
            Change::Diff(diff) => diff.format(catalog),
        }
    }
}
