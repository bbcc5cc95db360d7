//! Number formatting for table cells and summary cards

/// Group the integer digits of an already formatted number with `separator`
///
/// # Examples
///
/// ```ignore
/// assert_eq!(group_thousands("1234567.89", ','), "1,234,567.89");
/// ```
pub fn group_thousands(formatted: &str, separator: char) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    let grouped: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Two-decimal USD amount with comma grouping
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_usd(1234.5), "$1,234.50");
/// assert_eq!(format_usd(-3.0), "-$3.00");
/// ```
pub fn format_usd(value: f64) -> String {
    let grouped = group_thousands(&format!("{:.2}", value.abs()), ',');
    // -0.001 rounds to 0.00 and is shown without a sign
    if value < 0.0 && grouped != "0.00" {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Optional USD amount; absent values show a dash
pub fn format_usd_opt(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| "-".to_string())
}

/// Integer counter with comma grouping
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string(), ',')
}
