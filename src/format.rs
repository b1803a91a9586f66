//! Display formatting for KPI values, money, percentages and names
//!
//! All functions are pure. Output is fixed to US-English conventions
//! (comma thousands separator, period decimal point).

use serde::{Deserialize, Serialize};

/// Abbreviate a count with `K`/`M`/`B` suffixes
///
/// Below 1000 the integer part is printed as-is. Larger values keep one
/// decimal place, including a trailing `.0` (`1000` -> `"1.0K"`). The suffix
/// is chosen before rounding, so `999_950` prints `"1000.0K"`.
pub fn format_number(n: f64) -> String {
    let abs = n.abs();
    if abs >= 1e9 {
        format!("{:.1}B", n / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", n / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", n / 1e3)
    } else {
        format!("{}", n.trunc() as i64)
    }
}

/// Round to an integer and insert thousands separators (`1847` -> `"1,847"`)
pub fn format_grouped(n: f64) -> String {
    let rounded = n.round();
    let digits = group_digits(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Money with two decimals and the currency's symbol
///
/// Codes without a known symbol are written out: `"CHF 1,000.00"`.
pub fn format_currency(n: f64, currency: &str) -> String {
    let cents = (n.abs() * 100.0).round() as u64;
    let body = format!("{}.{:02}", group_digits(cents / 100), cents % 100);
    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, currency.trim().to_ascii_uppercase(), body),
    }
}

/// Symbol for an ISO 4217 code
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Fixed-decimal percentage (`12.345`, 1 -> `"12.3%"`)
pub fn format_percentage(n: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, n)
}

/// Up to two uppercase initials from a full name
pub fn generate_initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Chart y-axis tick label (`45000` -> `"45k"`)
pub fn axis_tick(value: f64) -> String {
    format!("{:.0}k", value / 1000.0)
}

/// How a KPI's raw value is turned into its display string
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// `format_number`
    Compact,
    /// Currency symbol followed by `format_number`
    CompactCurrency,
    /// `format_percentage` with the given decimals
    Percentage(usize),
    /// `format_grouped`
    Grouped,
}

impl ValueFormat {
    pub fn apply(&self, value: f64, currency: &str) -> String {
        match self {
            ValueFormat::Compact => format_number(value),
            ValueFormat::CompactCurrency => {
                let symbol = currency_symbol(currency).unwrap_or("");
                if value < 0.0 {
                    format!("-{}{}", symbol, format_number(-value))
                } else {
                    format!("{}{}", symbol, format_number(value))
                }
            }
            ValueFormat::Percentage(decimals) => format_percentage(value, *decimals),
            ValueFormat::Grouped => format_grouped(value),
        }
    }
}

fn group_digits(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    for group in groups.iter().rev() {
        out.push_str(&format!(",{:03}", group));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(500.0), "500");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(999.9), "999");
        assert_eq!(format_number(1000.0), "1.0K");
        assert_eq!(format_number(1500.0), "1.5K");
        assert_eq!(format_number(24_567.0), "24.6K");
        assert_eq!(format_number(1_500_000.0), "1.5M");
        assert_eq!(format_number(1_500_000_000.0), "1.5B");
        assert_eq!(format_number(-2500.0), "-2.5K");
    }

    #[test]
    fn test_format_number_rounds_after_choosing_suffix() {
        // The suffix is picked from the raw magnitude; rounding may reach 1000
        assert_eq!(format_number(999_949.0), "999.9K");
        assert_eq!(format_number(999_950.0), "1000.0K");
        assert_eq!(format_number(999_999_999.0), "1000.0M");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
        assert_eq!(format_currency(1000.0, "EUR"), "€1,000.00");
        assert_eq!(format_currency(0.5, "gbp"), "£0.50");
        assert_eq!(format_currency(-299.99, "USD"), "-$299.99");
        assert_eq!(format_currency(1_000_000.0, "CHF"), "CHF 1,000,000.00");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.345, 1), "12.3%");
        assert_eq!(format_percentage(12.345, 2), "12.35%");
        assert_eq!(format_percentage(3.0, 0), "3%");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(1847.0), "1,847");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_234_567.4), "1,234,567");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(-12_000.0), "-12,000");
    }

    #[test]
    fn test_generate_initials() {
        assert_eq!(generate_initials("John Doe"), "JD");
        assert_eq!(generate_initials("Jane Smith Johnson"), "JS");
        assert_eq!(generate_initials("Alice"), "A");
        assert_eq!(generate_initials("  devops   team "), "DT");
        assert_eq!(generate_initials(""), "");
    }

    #[test]
    fn test_axis_tick() {
        assert_eq!(axis_tick(45_000.0), "45k");
        assert_eq!(axis_tick(0.0), "0k");
    }

    #[test]
    fn test_value_format() {
        assert_eq!(ValueFormat::Compact.apply(24_567.0, "USD"), "24.6K");
        assert_eq!(ValueFormat::CompactCurrency.apply(89_432.0, "USD"), "$89.4K");
        assert_eq!(ValueFormat::Percentage(2).apply(3.24, "USD"), "3.24%");
        assert_eq!(ValueFormat::Grouped.apply(1847.0, "USD"), "1,847");
    }
}
