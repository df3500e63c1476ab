//! Presentation-only money formatting. Amounts are never converted.

const GROUPING_SEPARATOR: char = ',';
const PRECISION: usize = 2;

/// Renders `amount` with `symbol`, two decimals and thousands grouping,
/// e.g. `-$1,234.50`.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}{symbol}∞");
    }
    format!("{sign}{symbol}{}", format_number(amount.abs()))
}

/// Fixed two-decimal rendering of a non-negative value with grouped thousands.
pub fn format_number(value: f64) -> String {
    let body = format!("{:.*}", PRECISION, value);
    match body.split_once('.') {
        Some((int_part, fraction)) => format!("{}.{}", group_digits(int_part), fraction),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
