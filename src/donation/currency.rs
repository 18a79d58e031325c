/// Formats a dollar amount the way donors see it in running text: whole
/// amounts without decimals, fractional amounts as-is.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        (amount as i64).to_string()
    } else {
        amount.to_string()
    }
}

/// Whole-dollar USD with thousands separators, e.g. `$10,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}
