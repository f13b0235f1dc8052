//! Display formatting for currency amounts and percentages.
//!
//! All amounts are rendered as US dollars with thousands separators and two
//! decimal places, e.g. `$1,234.50`.

/// Format an amount as USD: `$1,234.50`, `-$12.00`.
///
/// Non-finite input renders as `$0.00`; the data-access layer rejects such
/// values before they reach a page.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// Format a value that is already a percentage, with one decimal: `82.3%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a fraction in `[0, 1]` as a percentage with one decimal: `0.75` → `75.0%`.
pub fn format_fraction_percent(fraction: f64) -> String {
    format_percent(fraction * 100.0)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
