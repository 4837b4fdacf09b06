//! Error types for the unit engine

use thiserror::Error;

use crate::types::Dimension;

/// Failures of decimal construction, arithmetic and format specifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    /// An arithmetic form with no defined result, e.g. `∞ × 0` or `0 / 0`
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("'{0}' is not a valid format specifier")]
    InvalidFormatSpec(String),
}

/// Failures of unit and system lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("'{token}' is not a known {dimension} unit")]
    UnknownUnit { dimension: Dimension, token: String },

    #[error("'{system}' is an unrecognized {dimension} unit system.")]
    UnknownSystem { dimension: Dimension, system: String },

    #[error("the {dimension} unit system '{system}' has no units")]
    EmptySystem { dimension: Dimension, system: String },

    #[error("system unit '{unit}' has both a trigger and a relative trigger")]
    ConflictingTrigger { unit: String },

    #[error("invalid unit file: {0}")]
    InvalidUnitFile(String),
}

/// Failures of user-facing text parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{value}' is an unrecognized {kind} value.")]
    InvalidSizeValue { value: String, kind: &'static str },

    #[error("Could not parse {value} into a {grammar}.")]
    Grammar { value: String, grammar: &'static str },
}

impl ParseError {
    pub fn invalid_value(value: impl Into<String>, kind: &'static str) -> Self {
        ParseError::InvalidSizeValue {
            value: value.into(),
            kind,
        }
    }

    pub fn grammar(value: impl Into<String>, grammar: &'static str) -> Self {
        ParseError::Grammar {
            value: value.into(),
            grammar,
        }
    }
}

/// Any error the engine can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Decimal(#[from] DecimalError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
