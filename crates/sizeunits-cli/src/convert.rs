//! Dimension dispatch shared by the command line and the server

use sizeunits_core::{Decimal, Dimension, Error, Quantity, UnitCatalog, SV, TV, WV};

pub fn parse(dimension: Dimension, text: &str, catalog: &UnitCatalog) -> Result<Decimal, Error> {
    let value = match dimension {
        Dimension::Length => SV::parse(text, catalog)?.into_inner(),
        Dimension::Mass => WV::parse(text, catalog)?.into_inner(),
        Dimension::Time => TV::parse(text, catalog)?.into_inner(),
    };
    Ok(value)
}

pub fn format(
    dimension: Dimension,
    value: Decimal,
    spec: &str,
    catalog: &UnitCatalog,
) -> Result<String, Error> {
    match dimension {
        Dimension::Length => SV::new(value).format(spec, catalog),
        Dimension::Mass => WV::new(value).format(spec, catalog),
        Dimension::Time => TV::new(value).format(spec, catalog),
    }
}

/// Random close unit from `system`, for everyday comparisons
pub fn good_unit(
    dimension: Dimension,
    value: Decimal,
    system: &str,
    spec: &str,
    catalog: &UnitCatalog,
) -> Result<String, Error> {
    match dimension {
        Dimension::Length => SV::new(value).to_good_unit(system, spec, catalog),
        Dimension::Mass => WV::new(value).to_good_unit(system, spec, catalog),
        Dimension::Time => TV::new(value).to_good_unit(system, spec, catalog),
    }
}
