//! Number formatting for prices shown on the page.
//!
//! Follows the Albanian convention the site is written for: thousands are
//! grouped with a no-break space and the euro sign trails the amount
//! (`11 500 €`). Amounts are shown without decimals.

/// No-break space used between digit groups and before the currency sign.
pub const GROUP_SEPARATOR: char = '\u{a0}';

pub const CURRENCY_SYMBOL: &str = "€";

/// Format a whole number with grouped thousands, e.g. `11 500`.
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}

/// Format an amount as whole euros, rounding half away from zero.
pub fn format_currency(amount: f64) -> String {
    format!(
        "{}{}{}",
        format_grouped(amount.round() as i64),
        GROUP_SEPARATOR,
        CURRENCY_SYMBOL
    )
}

/// Format an amount mid-animation: truncated toward negative infinity so the
/// display never overshoots the value it is counting toward.
pub fn format_counting(amount: f64) -> String {
    format_grouped(amount.floor() as i64)
}
