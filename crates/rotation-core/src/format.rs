//! Number formatting shared by the narration, report and console summary.

/// Groups the integer part by thousands: `1234567.8` -> `1,234,568`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Money amount with its currency suffix.
pub fn format_amount(value: f64, currency: &str) -> String {
    format!("{} {currency}", format_thousands(value))
}

/// Unit count with the `un` suffix.
pub fn format_units(value: i64) -> String {
    format!("{} un", format_thousands(value as f64))
}
