//! sizeunits-core: Unit engine for sizes, weights and durations
//!
//! This crate parses free-form quantities ("5ft8in", "1,000 km", "2 blue
//! whales", "infinity") into base-unit decimals and formats them back in the
//! best unit of one or more display systems. Values range from the Planck
//! length to beyond the observable universe, so arithmetic runs on
//! arbitrary-precision decimals with infinity as a first-class value.
//!
//! # Example
//!
//! ```
//! use sizeunits_core::{Change, Quantity, UnitCatalog, SV};
//!
//! let catalog = UnitCatalog::bundled()?;
//!
//! let height = SV::parse("5ft8in", &catalog)?;
//! assert_eq!(height.format("u", &catalog)?, "5'8\"");
//!
//! let big = SV::parse("1,000,000m", &catalog)?;
//! assert_eq!(big.format("m", &catalog)?, "1Mm");
//!
//! let change = Change::parse("2m/3s until 12m", &catalog)?;
//! assert!(matches!(change, Change::LimitedRate(_)));
//! # Ok::<(), sizeunits_core::Error>(())
//! ```

pub mod catalog;
pub mod change;
pub mod decimal;
pub mod error;
pub mod parser;
pub mod picker;
pub mod types;

pub use catalog::{DimensionTable, UnitCatalog};
pub use change::{Change, ChangeType, Delta, Diff, LimitedRate, Mult, Rate, Stop, StopType};
pub use decimal::{Decimal, DecimalSpec};
pub use error::{DecimalError, Error, ParseError, Result, UnitError};
pub use types::{
    pos_sv, pos_wv, Dimension, Quantity, ScaledUnit, SystemRegistry, SystemUnit, Unit,
    UnitRegistry, SV, TV, WV,
};
