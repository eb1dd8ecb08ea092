use crate::domain::entities::metrics::MetricValue;

pub const NOT_AVAILABLE: &str = "N/A";

/// Formats with `.` as the thousands separator and `,` for decimals.
pub fn format_number_with_dots(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rounded.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push(',');
        grouped.push_str(frac_part);
    }

    let is_zero = rounded.chars().all(|ch| ch == '0' || ch == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_price(metric: &MetricValue) -> String {
    match metric.value() {
        Some(value) => format!("${}", format_number_with_dots(value, 0)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_margin(metric: &MetricValue) -> String {
    match metric.value() {
        Some(value) => format!("{value:.0}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_units(value: f64) -> String {
    format_number_with_dots(value, 0)
}

pub fn format_delta(metric: &MetricValue) -> String {
    match metric {
        MetricValue::Available(value) => format!("{value:.2}%"),
        MetricValue::Unavailable(reason) => format!("{NOT_AVAILABLE} ({})", reason.describe()),
    }
}

pub fn delta_color(metric: &MetricValue) -> &'static str {
    match metric.value() {
        Some(value) if value > 0.0 => "#09ab3b",
        Some(value) if value < 0.0 => "#ff2b2b",
        _ => "#808495",
    }
}

pub fn delta_arrow(metric: &MetricValue) -> &'static str {
    match metric.value() {
        Some(value) if value > 0.0 => "↑",
        Some(value) if value < 0.0 => "↓",
        _ => "",
    }
}
