//! Change expression syntax

use pest::iterators::Pair;
use pest::Parser;

use super::{Rule, SizeParser};

/// Operators a change expression can carry before normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
    Power,
}

impl ChangeOp {
    fn from_rule(rule: Rule) -> Option<Self> {
        match rule {
            Rule::add_prefix => Some(ChangeOp::Add),
            Rule::subtract_prefix => Some(ChangeOp::Subtract),
            Rule::multiply_prefix | Rule::multiply_suffix => Some(ChangeOp::Multiply),
            Rule::divide_prefix => Some(ChangeOp::Divide),
            Rule::percent_prefix | Rule::percent_suffix => Some(ChangeOp::Percent),
            Rule::power_prefix => Some(ChangeOp::Power),
            _ => None,
        }
    }
}

/// Shape of a diff expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSyntax<'i> {
    /// `+2m`, `x2`, `/2`, `**2`, `%50`
    Prefixed { op: ChangeOp, rest: &'i str },
    /// `2x`, `50%`
    Suffixed { number: &'i str, op: ChangeOp },
    /// Anything else; read as a bare quantity
    Bare,
}

pub fn parse_change_syntax(input: &str) -> ChangeSyntax<'_> {
    if let Ok(pairs) = SizeParser::parse(Rule::prefixed_change, input) {
        let mut op = None;
        let mut rest = "";
        for pair in pairs.flatten() {
            match pair.as_rule() {
                Rule::change_rest => rest = pair.as_str(),
                rule => op = op.or(ChangeOp::from_rule(rule)),
            }
        }
        if let Some(op) = op {
            return ChangeSyntax::Prefixed { op, rest };
        }
    }

    if let Ok(pairs) = SizeParser::parse(Rule::suffixed_change, input) {
        let (number, op) = number_and_op(pairs.flatten());
        if let (Some(number), Some(op)) = (number, op) {
            return ChangeSyntax::Suffixed { number, op };
        }
    }

    ChangeSyntax::Bare
}

/// Split a multiplier into its operator (prefix or suffix, prefix first) and number
pub fn parse_multiplier_syntax(input: &str) -> Option<(Option<ChangeOp>, &str)> {
    let pairs = SizeParser::parse(Rule::multiplier, input).ok()?;
    let (number, op) = number_and_op(pairs.flatten());
    Some((op, number?))
}

fn number_and_op<'i>(
    pairs: impl Iterator<Item = Pair<'i, Rule>>,
) -> (Option<&'i str>, Option<ChangeOp>) {
    let mut number = None;
    let mut op = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::change_number => number = Some(pair.as_str()),
            rule => op = op.or(ChangeOp::from_rule(rule)),
        }
    }
    (number, op)
}

/// Split `<diff> <divider> <time>` on the last divider
pub fn split_rate(input: &str) -> Option<(&str, &str)> {
    split_pair(Rule::rate, Rule::rate_lhs, Rule::rate_rhs, input)
}

/// Split `<rate> <stop divider> <stop>` on the last stop divider
pub fn split_limited_rate(input: &str) -> Option<(&str, &str)> {
    split_pair(Rule::limited_rate, Rule::limited_lhs, Rule::limited_rhs, input)
}

fn split_pair(rule: Rule, lhs: Rule, rhs: Rule, input: &str) -> Option<(&str, &str)> {
    let pairs = SizeParser::parse(rule, input).ok()?;
    let mut left = None;
    let mut right = None;
    for pair in pairs.flatten() {
        if pair.as_rule() == lhs {
            left = Some(pair.as_str());
        } else if pair.as_rule() == rhs {
            right = Some(pair.as_str());
        }
    }
    Some((left?, right?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(
            parse_change_syntax("+2m"),
            ChangeSyntax::Prefixed { op: ChangeOp::Add, rest: "2m" }
        );
        assert_eq!(
            parse_change_syntax("minus 3 ft"),
            ChangeSyntax::Prefixed { op: ChangeOp::Subtract, rest: "3 ft" }
        );
        assert_eq!(
            parse_change_syntax("**2"),
            ChangeSyntax::Prefixed { op: ChangeOp::Power, rest: "2" }
        );
        assert_eq!(
            parse_change_syntax("*2"),
            ChangeSyntax::Prefixed { op: ChangeOp::Multiply, rest: "2" }
        );
        assert_eq!(
            parse_change_syntax("multiply by 4"),
            ChangeSyntax::Prefixed { op: ChangeOp::Multiply, rest: "4" }
        );
        assert_eq!(
            parse_change_syntax("÷3"),
            ChangeSyntax::Prefixed { op: ChangeOp::Divide, rest: "3" }
        );
        assert_eq!(
            parse_change_syntax("%50"),
            ChangeSyntax::Prefixed { op: ChangeOp::Percent, rest: "50" }
        );
    }

    #[test]
    fn test_suffixes_and_bare() {
        assert_eq!(
            parse_change_syntax("2x"),
            ChangeSyntax::Suffixed { number: "2", op: ChangeOp::Multiply }
        );
        assert_eq!(
            parse_change_syntax("50 %"),
            ChangeSyntax::Suffixed { number: "50", op: ChangeOp::Percent }
        );
        assert_eq!(parse_change_syntax("2m"), ChangeSyntax::Bare);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(parse_multiplier_syntax("2"), Some((None, "2")));
        assert_eq!(parse_multiplier_syntax("x2"), Some((Some(ChangeOp::Multiply), "2")));
        assert_eq!(parse_multiplier_syntax("1.5X"), Some((Some(ChangeOp::Multiply), "1.5")));
        assert_eq!(parse_multiplier_syntax("/4"), Some((Some(ChangeOp::Divide), "4")));
        assert_eq!(parse_multiplier_syntax("50%"), Some((Some(ChangeOp::Percent), "50")));
        assert_eq!(parse_multiplier_syntax("two"), None);
    }

    #[test]
    fn test_rate_split_uses_last_divider() {
        assert_eq!(split_rate("2m/3s"), Some(("2m", "3s")));
        assert_eq!(split_rate("1 ft per hour"), Some(("1 ft", "hour")));
        assert_eq!(split_rate("x2 every 2 days"), Some(("x2", "2 days")));
        assert_eq!(split_rate("1/2m / s"), Some(("1/2m", "s")));
        assert_eq!(split_rate("2 persons"), None);
        assert_eq!(split_rate("/2"), None);
    }

    #[test]
    fn test_limited_rate_split() {
        assert_eq!(split_limited_rate("2m/3s until 12m"), Some(("2m/3s", "12m")));
        assert_eq!(split_limited_rate("1m/s -> 5m"), Some(("1m/s", "5m")));
        assert_eq!(split_limited_rate("1m/s-->5m"), Some(("1m/s", "5m")));
        assert_eq!(split_limited_rate("1m/s for 2 hours"), Some(("1m/s", "2 hours")));
        assert_eq!(split_limited_rate("2m/3s"), None);
    }
}
