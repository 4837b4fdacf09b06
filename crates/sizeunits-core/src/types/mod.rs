mod quantity;
mod system;
mod unit;

pub use quantity::{pos_sv, pos_wv, Dimension, Quantity, SV, TV, WV};
pub use system::{SystemRegistry, SystemUnit, DEFAULT_OPTIONS};
pub use unit::{foot, inch, FixedUnit, ScaledUnit, Unit, UnitRegistry, FEET_AND_INCHES_ID};
