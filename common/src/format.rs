//! Rupee amount formatting with South-Asian digit grouping.
//!
//! Amounts render with the fixed `Rs.` prefix and exactly two decimal
//! digits. Integer digits group in the lakh/crore convention: the rightmost
//! three digits form one group and everything to their left is grouped in
//! pairs, so `1234567` renders as `12,34,567` rather than `1,234,567`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Prefix applied to every formatted rupee amount.
pub const RUPEE_PREFIX: &str = "Rs.";

/// Format an amount as a rupee string: `[sign]Rs. <grouped>.<2 digits>`.
///
/// Rounding to two decimals happens here and nowhere earlier, half away
/// from zero. An amount that rounds to zero renders as `Rs. 0.00` with no
/// sign, whatever the sign of the input.
pub fn format_rupees(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return format!("{} 0.00", RUPEE_PREFIX);
    }

    let rendered = format!("{:.2}", rounded.abs());
    let (int_digits, frac_digits) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), "00"));
    let grouped = group_south_asian(int_digits);

    if rounded.is_sign_negative() {
        format!("-{} {}.{}", RUPEE_PREFIX, grouped, frac_digits)
    } else {
        format!("{} {}.{}", RUPEE_PREFIX, grouped, frac_digits)
    }
}

/// Render a value with exactly two decimal digits, no grouping or prefix.
///
/// Used for the per-unit rates in descriptions and table cells.
pub fn two_decimals(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Group a string of integer digits in the lakh/crore convention.
///
/// Three or fewer digits pass through untouched. Otherwise the last three
/// digits form the final group and the remaining digits are chunked in
/// pairs from the right; the leftover one or two digits stay as the
/// leftmost segment.
fn group_south_asian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 2);
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
