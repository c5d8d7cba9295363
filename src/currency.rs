//! Currency display formatting
//!
//! Amounts stay unrounded `BigDecimal` through every calculation; this module
//! is the only place values are rounded, and only for display.

use bigdecimal::{BigDecimal, RoundingMode};

/// Format an amount as Indian rupees: two fixed decimals, Indian digit
/// grouping, `₹` prefix. Missing amounts render as zero.
///
/// `₹1,23,456.00`, `-₹500.00`, `₹0.00`
pub fn format_inr(amount: Option<&BigDecimal>) -> String {
    let zero = BigDecimal::from(0);
    let value = amount.unwrap_or(&zero);
    let rounded = value.with_scale_round(2, RoundingMode::HalfUp);

    let text = rounded.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!("{}₹{}.{}", sign, group_indian(int_part), frac_part)
}

/// Indian digit grouping: the last three digits form one group, everything
/// before that groups in twos (12,34,56,789).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
