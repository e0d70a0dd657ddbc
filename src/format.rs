//! Display formatting for currency amounts and percentages
//!
//! Currency and locale are always explicit parameters; nothing here reads a
//! process-wide selection.

use crate::purchase::Currency;

/// Format an amount as a whole-unit currency string
///
/// Matches the standard display rules for both supported locales (es-MX for
/// MXN, en-US for USD): dollar-sign symbol, comma thousands grouping, zero
/// decimal places, rounded to the nearest whole unit. The output is
/// round-trippable back to the amount by stripping the symbol and separators.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let units = rounded.abs() as u64;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let symbol = currency.symbol();
    if negative {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

/// Format a percentage with exactly two decimal places
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
