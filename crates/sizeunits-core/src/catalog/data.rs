//! Bundled unit tables
//!
//! To add a unit, add an entry to the dimension's unit list; to show it in a
//! display system, reference its symbol (or name) from that system's list.

use crate::types::Dimension;

/// Unit metadata, factor in base units
#[derive(Debug, Clone, Copy)]
pub struct UnitDef {
    pub factor: &'static str,
    pub symbol: Option<&'static str>,
    pub name: Option<&'static str>,
    pub name_plural: Option<&'static str>,
    /// Extra case-sensitive spellings
    pub symbols: &'static [&'static str],
    /// Extra case-insensitive spellings
    pub names: &'static [&'static str],
    pub fractional: bool,
}

impl UnitDef {
    const fn new(
        factor: &'static str,
        symbol: &'static str,
        name: &'static str,
        plural: &'static str,
    ) -> Self {
        UnitDef {
            factor,
            symbol: Some(symbol),
            name: Some(name),
            name_plural: Some(plural),
            symbols: &[],
            names: &[],
            fractional: false,
        }
    }

    /// A reference object known only by name
    const fn object(factor: &'static str, name: &'static str, plural: &'static str) -> Self {
        UnitDef {
            symbol: None,
            ..UnitDef::new(factor, "", name, plural)
        }
    }

    const fn aka(self, symbols: &'static [&'static str], names: &'static [&'static str]) -> Self {
        UnitDef {
            symbols,
            names,
            ..self
        }
    }

    const fn fractional(self) -> Self {
        UnitDef {
            fractional: true,
            ..self
        }
    }
}

/// A system member: unit reference plus optional threshold
#[derive(Debug, Clone, Copy)]
pub struct SystemUnitDef {
    pub unit: &'static str,
    pub trigger: Option<&'static str>,
    pub rel_trigger: Option<&'static str>,
}

const fn at(unit: &'static str) -> SystemUnitDef {
    SystemUnitDef {
        unit,
        trigger: None,
        rel_trigger: None,
    }
}

const fn above(unit: &'static str, trigger: &'static str) -> SystemUnitDef {
    SystemUnitDef {
        trigger: Some(trigger),
        ..at(unit)
    }
}

const fn rel(unit: &'static str, rel_trigger: &'static str) -> SystemUnitDef {
    SystemUnitDef {
        rel_trigger: Some(rel_trigger),
        ..at(unit)
    }
}

pub struct DimensionData {
    pub dimension: Dimension,
    pub units: &'static [UnitDef],
    pub systems: &'static [(&'static str, &'static [SystemUnitDef])],
}

pub static BUNDLED: &[DimensionData] = &[
    DimensionData {
        dimension: Dimension::Length,
        units: SIZE_UNITS,
        systems: SIZE_SYSTEMS,
    },
    DimensionData {
        dimension: Dimension::Mass,
        units: WEIGHT_UNITS,
        systems: WEIGHT_SYSTEMS,
    },
    DimensionData {
        dimension: Dimension::Time,
        units: TIME_UNITS,
        systems: TIME_SYSTEMS,
    },
];

// Length (base: meter)

static SIZE_UNITS: &[UnitDef] = &[
    UnitDef::new("1e-24", "ym", "yoctometer", "yoctometers").aka(&[], &["yoctometre", "yoctometres"]),
    UnitDef::new("1e-21", "zm", "zeptometer", "zeptometers").aka(&[], &["zeptometre", "zeptometres"]),
    UnitDef::new("1e-18", "am", "attometer", "attometers").aka(&[], &["attometre", "attometres"]),
    UnitDef::new("1e-15", "fm", "femtometer", "femtometers").aka(&[], &["femtometre", "femtometres"]),
    UnitDef::new("1e-12", "pm", "picometer", "picometers").aka(&[], &["picometre", "picometres"]),
    UnitDef::new("1e-10", "Å", "angstrom", "angstroms"),
    UnitDef::new("1e-9", "nm", "nanometer", "nanometers").aka(&[], &["nanometre", "nanometres"]),
    UnitDef::new("1e-6", "µm", "micrometer", "micrometers")
        .aka(&["um", "μm"], &["micrometre", "micrometres", "micron", "microns"]),
    UnitDef::new("0.001", "mm", "millimeter", "millimeters").aka(&[], &["millimetre", "millimetres"]),
    UnitDef::new("0.01", "cm", "centimeter", "centimeters").aka(&[], &["centimetre", "centimetres"]),
    UnitDef::new("1", "m", "meter", "meters").aka(&[], &["metre", "metres"]),
    UnitDef::new("1000", "km", "kilometer", "kilometers").aka(&[], &["kilometre", "kilometres"]),
    UnitDef::new("1e6", "Mm", "megameter", "megameters").aka(&[], &["megametre", "megametres"]),
    UnitDef::new("1e9", "Gm", "gigameter", "gigameters").aka(&[], &["gigametre", "gigametres"]),
    UnitDef::new("1e12", "Tm", "terameter", "terameters").aka(&[], &["terametre", "terametres"]),
    UnitDef::new("1e15", "Pm", "petameter", "petameters").aka(&[], &["petametre", "petametres"]),
    UnitDef::new("1e18", "Em", "exameter", "exameters").aka(&[], &["exametre", "exametres"]),
    UnitDef::new("1e21", "Zm", "zettameter", "zettameters").aka(&[], &["zettametre", "zettametres"]),
    UnitDef::new("1e24", "Ym", "yottameter", "yottameters").aka(&[], &["yottametre", "yottametres"]),
    UnitDef::object("1.616255e-35", "Planck length", "Planck lengths"),
    UnitDef::new("0.0000254", "thou", "thou", "thou").aka(&["mil"], &[]),
    UnitDef::new("0.0254", "in", "inch", "inches").aka(&["\""], &[]).fractional(),
    UnitDef::new("0.3048", "ft", "foot", "feet").aka(&["'"], &[]),
    UnitDef::new("0.9144", "yd", "yard", "yards"),
    UnitDef::new("1609.344", "mi", "mile", "miles"),
    UnitDef::new("149597870700", "AU", "astronomical unit", "astronomical units"),
    UnitDef::new("9460730472580800", "ly", "light year", "light years").aka(&[], &["lightyear", "lightyears"]),
    UnitDef::new("30856775814913673", "pc", "parsec", "parsecs"),
    UnitDef::new("8.79848e26", "uni", "universe", "universes"),
    UnitDef::object("0.0005", "grain of sand", "grains of sand"),
    UnitDef::object("0.005", "ant", "ants"),
    UnitDef::object("0.033", "paperclip", "paperclips"),
    UnitDef::object("0.08560", "credit card", "credit cards"),
    UnitDef::object("0.19", "pencil", "pencils"),
    UnitDef::object("0.2", "banana", "bananas"),
    UnitDef::object("1", "guitar", "guitars"),
    UnitDef::object("2.03", "door", "doors"),
    UnitDef::object("4.5", "car", "cars"),
    UnitDef::object("12", "bus", "buses"),
    UnitDef::object("25", "blue whale", "blue whales"),
    UnitDef::object("91.44", "football field", "football fields"),
    UnitDef::object("330", "Eiffel Tower", "Eiffel Towers"),
    UnitDef::object("8848.86", "Mount Everest", "Mount Everests"),
    UnitDef::object("3474800", "Moon", "Moons"),
    UnitDef::object("12742000", "Earth", "Earths"),
    UnitDef::object("1392700000", "Sun", "Suns"),
];

static SIZE_SYSTEMS: &[(&str, &[SystemUnitDef])] = &[
    (
        "m",
        &[
            at("ym"),
            at("zm"),
            at("am"),
            at("fm"),
            at("pm"),
            at("nm"),
            at("µm"),
            at("mm"),
            at("cm"),
            at("m"),
            at("km"),
            at("Mm"),
            at("Gm"),
            at("Tm"),
            at("Pm"),
            at("Em"),
            at("Zm"),
            at("Ym"),
            at("uni"),
            at("∞"),
        ],
    ),
    (
        "u",
        &[
            at("in"),
            above("'\"", "0.3048"),
            at("mi"),
            at("AU"),
            rel("ly", "0.1"),
            at("uni"),
            at("∞"),
        ],
    ),
    (
        "o",
        &[
            at("grain of sand"),
            at("ant"),
            at("paperclip"),
            at("credit card"),
            at("banana"),
            at("guitar"),
            at("door"),
            at("car"),
            at("bus"),
            at("blue whale"),
            at("football field"),
            at("Eiffel Tower"),
            at("Mount Everest"),
            at("Moon"),
            at("Earth"),
            at("Sun"),
            at("uni"),
            at("∞"),
        ],
    ),
];

// Mass (base: gram)

static WEIGHT_UNITS: &[UnitDef] = &[
    UnitDef::new("1e-24", "yg", "yoctogram", "yoctograms"),
    UnitDef::new("1e-21", "zg", "zeptogram", "zeptograms"),
    UnitDef::new("1e-18", "ag", "attogram", "attograms"),
    UnitDef::new("1e-15", "fg", "femtogram", "femtograms"),
    UnitDef::new("1e-12", "pg", "picogram", "picograms"),
    UnitDef::new("1e-9", "ng", "nanogram", "nanograms"),
    UnitDef::new("1e-6", "ug", "microgram", "micrograms").aka(&["mcg"], &[]),
    UnitDef::new("0.001", "mg", "milligram", "milligrams"),
    UnitDef::new("1", "g", "gram", "grams").aka(&[], &["gramme", "grammes"]),
    UnitDef::new("1000", "kg", "kilogram", "kilograms").aka(&[], &["kilo", "kilos"]),
    UnitDef::new("1e6", "t", "tonne", "tonnes").aka(&[], &["metric ton", "metric tons"]),
    UnitDef::new("1e9", "kt", "kilotonne", "kilotonnes"),
    UnitDef::new("1e12", "Mt", "megatonne", "megatonnes"),
    UnitDef::new("1e15", "Gt", "gigatonne", "gigatonnes"),
    UnitDef::new("1e18", "Tt", "teratonne", "teratonnes"),
    UnitDef::new("1e21", "Pt", "petatonne", "petatonnes"),
    UnitDef::new("1e24", "Et", "exatonne", "exatonnes"),
    UnitDef::new("1e27", "Zt", "zettatonne", "zettatonnes"),
    UnitDef::new("1e30", "Yt", "yottatonne", "yottatonnes"),
    UnitDef::new("0.06479891", "gr", "grain", "grains"),
    UnitDef::new("28.349523125", "oz", "ounce", "ounces"),
    UnitDef::new("453.59237", "lb", "pound", "pounds").aka(&["lbs"], &[]),
    UnitDef::new("6350.29318", "st", "stone", "stone"),
    UnitDef::new("907184.74", "ton", "ton", "tons").aka(&["tn"], &["short ton", "short tons"]),
    UnitDef::object("5.9722e27", "Earth mass", "Earth masses"),
    UnitDef::object("1.98847e33", "solar mass", "solar masses"),
    UnitDef::new("1.5e56", "uni", "universe", "universes"),
    UnitDef::object("0.029", "grain of rice", "grains of rice"),
    UnitDef::object("182", "apple", "apples"),
    UnitDef::object("2270", "brick", "bricks"),
    UnitDef::object("62000", "person", "people").aka(&[], &["persons"]),
    UnitDef::object("1500000", "car", "cars"),
    UnitDef::object("6000000", "elephant", "elephants"),
    UnitDef::object("150000000", "blue whale", "blue whales"),
    UnitDef::object("7.3e9", "Eiffel Tower", "Eiffel Towers"),
];

static WEIGHT_SYSTEMS: &[(&str, &[SystemUnitDef])] = &[
    (
        "m",
        &[
            at("yg"),
            at("zg"),
            at("ag"),
            at("fg"),
            at("pg"),
            at("ng"),
            at("ug"),
            at("mg"),
            at("g"),
            at("kg"),
            at("t"),
            at("kt"),
            at("Mt"),
            at("Gt"),
            at("Tt"),
            at("Pt"),
            at("Et"),
            at("Zt"),
            at("Yt"),
            at("uni"),
            at("∞"),
        ],
    ),
    (
        "u",
        &[
            at("gr"),
            at("oz"),
            at("lb"),
            at("ton"),
            at("Earth mass"),
            at("solar mass"),
            at("uni"),
            at("∞"),
        ],
    ),
    (
        "o",
        &[
            at("grain of rice"),
            at("apple"),
            at("brick"),
            at("person"),
            at("car"),
            at("elephant"),
            at("blue whale"),
            at("Eiffel Tower"),
            at("Earth mass"),
            at("solar mass"),
            at("uni"),
            at("∞"),
        ],
    ),
];

// Time (base: second)

static TIME_UNITS: &[UnitDef] = &[
    UnitDef::new("1e-9", "ns", "nanosecond", "nanoseconds"),
    UnitDef::new("0.001", "ms", "millisecond", "milliseconds"),
    UnitDef::new("1", "s", "second", "seconds").aka(&["sec", "secs"], &[]),
    UnitDef::new("60", "min", "minute", "minutes").aka(&["mins"], &[]),
    UnitDef::new("3600", "h", "hour", "hours").aka(&["hr", "hrs"], &[]),
    UnitDef::new("86400", "d", "day", "days"),
    UnitDef::new("604800", "wk", "week", "weeks"),
    UnitDef::object("1209600", "fortnight", "fortnights"),
    UnitDef::new("2629746", "mo", "month", "months"),
    UnitDef::new("31556952", "yr", "year", "years").aka(&["y", "yrs"], &[]),
    UnitDef::object("315569520", "decade", "decades"),
    UnitDef::object("3155695200", "century", "centuries"),
    UnitDef::object("31556952000", "millennium", "millennia"),
    UnitDef::object("4.35e17", "age of the universe", "ages of the universe"),
];

static TIME_SYSTEMS: &[(&str, &[SystemUnitDef])] = &[
    (
        "m",
        &[
            at("ns"),
            at("ms"),
            at("s"),
            at("min"),
            at("h"),
            at("d"),
            at("yr"),
            at("millennium"),
            at("age of the universe"),
            at("∞"),
        ],
    ),
    (
        "u",
        &[
            at("s"),
            at("min"),
            at("h"),
            at("d"),
            at("wk"),
            at("mo"),
            at("yr"),
            at("decade"),
            at("century"),
            at("millennium"),
            at("∞"),
        ],
    ),
];
