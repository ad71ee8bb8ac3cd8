use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Money is kept as an exact decimal so repeated sums never drift.
/// Rounding happens only when a value is formatted for display.
pub type Money = Decimal;

/// Format money as a human-readable string with two decimal places.
/// Example: 50 -> "50.00", -12.345 -> "-12.35"
pub fn format_money(amount: Money) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // -0.001 rounds to a negative zero, which should not print a sign
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Format a percentage with two decimals and a trailing `%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_money(value))
}

/// Parse a decimal string into money.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, ".50" -> 0.50
pub fn parse_money(input: &str) -> Result<Money, ParseMoneyError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    if digits.is_empty() || digits == "." {
        return Err(ParseMoneyError::InvalidFormat);
    }
    if digits.chars().filter(|c| *c == '.').count() > 1
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return Err(ParseMoneyError::InvalidFormat);
    }

    let normalized = if digits.starts_with('.') {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    let value = Decimal::from_str(&normalized).map_err(|_| ParseMoneyError::InvalidFormat)?;
    Ok(if negative { -value } else { value })
}

/// Parse a stored amount. Entity amounts are never negative; changes are
/// computed, not stored.
pub fn parse_amount(input: &str) -> Result<Money, ParseMoneyError> {
    let amount = parse_money(input)?;
    if amount < Money::ZERO {
        return Err(ParseMoneyError::Negative);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    InvalidFormat,
    Negative,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::InvalidFormat => write!(f, "invalid money format"),
            ParseMoneyError::Negative => write!(f, "amount must not be negative"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}
