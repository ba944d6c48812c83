/// Format an amount with thousands separators and two decimals
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "n/a".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    // Cents no longer fit in a u64
    if value.abs() >= u64::MAX as f64 / 100.0 {
        return format!("{value:.3e}");
    }

    // Round once so cents never carry to 100
    let total_cents = (value.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    // Add thousands separators
    let whole_str = whole.to_string();
    let mut result = String::new();
    for (i, c) in whole_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let whole_formatted: String = result.chars().rev().collect();

    if value < 0.0 && total_cents > 0 {
        format!("-{whole_formatted}.{cents:02}")
    } else {
        format!("{whole_formatted}.{cents:02}")
    }
}

/// Format a rate (0.0483 -> "4.83%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a years-to-target outcome
pub fn format_years(year: Option<usize>) -> String {
    match year {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{n} years"),
        None => "not within horizon".to_string(),
    }
}
