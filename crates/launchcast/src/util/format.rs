/// Format a value in billions with the table precision (e.g. `0.051`, `-0.191`)
pub fn format_billions(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format a value in billions with a currency suffix (e.g. `$0.510B`)
pub fn format_billions_label(value: f64) -> String {
    if value >= 0.0 {
        format!("${:.3}B", value)
    } else {
        format!("-${:.3}B", value.abs())
    }
}

/// Format a millions amount without decimals (e.g. `$1,500M`)
pub fn format_millions(value: f64) -> String {
    let abs_value = value.abs();
    let whole = abs_value.round() as i64;

    // Add thousands separators
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();

    if value >= 0.0 {
        format!("${}M", formatted)
    } else {
        format!("-${}M", formatted)
    }
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
