use dioxus::prelude::*;

use crate::domain::entities::metrics::{MetricValue, ProductMetrics};
use crate::ui::format::{
    delta_arrow, delta_color, format_delta, format_margin, format_price, format_units,
};

#[derive(Clone, Debug, PartialEq)]
pub struct MetricDisplay {
    pub label: &'static str,
    pub value: String,
    pub delta: MetricValue,
}

/// The three headline figures shown beside each chart.
pub fn metric_displays(metrics: &ProductMetrics) -> Vec<MetricDisplay> {
    vec![
        MetricDisplay {
            label: "Precio Promedio",
            value: format_price(&metrics.average_price),
            delta: metrics.average_price_yoy_pct,
        },
        MetricDisplay {
            label: "Margen Promedio",
            value: format_margin(&metrics.average_margin),
            delta: metrics.average_margin_yoy_pct,
        },
        MetricDisplay {
            label: "Unidades Vendidas",
            value: format_units(metrics.total_units),
            delta: metrics.units_yoy_pct,
        },
    ]
}

#[component]
pub fn MetricCard(display: MetricDisplay) -> Element {
    let color = delta_color(&display.delta);
    let arrow = delta_arrow(&display.delta);
    let delta_text = format_delta(&display.delta);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 2px; padding: 8px 0;",
            span { style: "font-size: 14px; color: #555;", "{display.label}" }
            span { style: "font-size: 30px; font-weight: 600;", "{display.value}" }
            span { style: "font-size: 14px; color: {color};", "{arrow} {delta_text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::metrics::UnavailableReason;

    #[test]
    fn metric_displays_format_each_figure() {
        let metrics = ProductMetrics {
            product: "Café".to_string(),
            row_count: 4,
            average_price: MetricValue::Available(1523.4),
            average_price_yoy_pct: MetricValue::Available(4.257),
            average_margin: MetricValue::Available(31.7),
            average_margin_yoy_pct: MetricValue::Unavailable(UnavailableReason::NoPriorYear),
            total_units: 12500.0,
            average_units: 3125.0,
            units_yoy_pct: MetricValue::Available(-2.5),
            excluded_rows: Vec::new(),
        };

        let displays = metric_displays(&metrics);

        let values: Vec<(&str, &str)> = displays
            .iter()
            .map(|display| (display.label, display.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Precio Promedio", "$1.523"),
                ("Margen Promedio", "32%"),
                ("Unidades Vendidas", "12.500"),
            ]
        );
        assert_eq!(format_delta(&displays[0].delta), "4.26%");
        assert_eq!(displays[1].delta.value(), None);
    }
}
