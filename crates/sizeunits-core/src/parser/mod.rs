//! Text grammars using pest

mod syntax;

pub use syntax::{
    parse_change_syntax, parse_multiplier_syntax, split_limited_rate, split_rate, ChangeOp,
    ChangeSyntax,
};

use pest::Parser;
use pest_derive::Parser;

use crate::types::Dimension;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct SizeParser;

/// Split quantity text into its optional amount and its unit token.
///
/// The accepted unit characters depend on the dimension: lengths allow the
/// foot/inch marks, micro signs and spaces, masses allow the marks, times
/// allow letters only (plus spaces for multi-word names).
pub fn split_quantity(dimension: Dimension, input: &str) -> Option<(Option<&str>, &str)> {
    let rule = match dimension {
        Dimension::Length => Rule::sv_quantity,
        Dimension::Mass => Rule::wv_quantity,
        Dimension::Time => Rule::tv_quantity,
    };
    let pairs = SizeParser::parse(rule, input).ok()?;

    let mut amount = None;
    let mut unit = None;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::amount => amount = Some(pair.as_str()),
            Rule::sv_unit | Rule::wv_unit | Rule::tv_unit => unit = Some(pair.as_str().trim()),
            _ => {}
        }
    }
    Some((amount, unit.filter(|u| !u.is_empty())?))
}

/// Recognize `5ft8in`, `5'8"` and `5 foot 8`, returning the feet and inch numbers
pub fn split_feet_and_inches(input: &str) -> Option<(&str, &str)> {
    let pairs = SizeParser::parse(Rule::feet_and_inches, input).ok()?;
    let mut numbers = pairs
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::plain_number)
        .map(|pair| pair.as_str());
    Some((numbers.next()?, numbers.next()?))
}
