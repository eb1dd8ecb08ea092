use crate::domain::entities::chart::{ChartSeries, ChartSpec, LineStyle, LinearFit};
use crate::domain::entities::metrics::MonthlyAggregate;

pub const CHART_TITLE: &str = "Evolución de Ventas Mensual";
pub const X_LABEL: &str = "Año-Mes";
pub const Y_LABEL: &str = "Unidades Vendidas";
pub const LEGEND_TITLE: &str = "Producto";
pub const TREND_LABEL: &str = "Tendencia";
pub const SERIES_COLOR: &str = "#1f77b4";
pub const TREND_COLOR: &str = "red";

/// Closed-form least squares over `(index, value)` pairs.
///
/// Returns `None` for fewer than two points.
pub fn fit_linear(values: &[f64]) -> Option<LinearFit> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xx: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| i as f64 * y)
        .sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    (slope.is_finite() && intercept.is_finite()).then_some(LinearFit { slope, intercept })
}

/// Year at each January position, blank elsewhere.
pub fn year_tick_labels(monthly: &[MonthlyAggregate]) -> Vec<String> {
    monthly
        .iter()
        .map(|entry| {
            if entry.month == 1 {
                entry.year.to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

pub fn build_trend_chart(product: &str, monthly: &[MonthlyAggregate]) -> ChartSpec {
    let values: Vec<f64> = monthly.iter().map(|entry| entry.units_sold).collect();
    let trend = fit_linear(&values);

    let mut series = vec![ChartSeries {
        label: product.to_string(),
        color: SERIES_COLOR.to_string(),
        style: LineStyle::Solid,
        points: values
            .iter()
            .enumerate()
            .map(|(idx, units)| (idx as f64, *units))
            .collect(),
    }];
    if let Some(fit) = trend {
        series.push(ChartSeries {
            label: TREND_LABEL.to_string(),
            color: TREND_COLOR.to_string(),
            style: LineStyle::Dashed,
            points: (0..values.len())
                .map(|idx| (idx as f64, fit.predict(idx as f64)))
                .collect(),
        });
    }

    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, y)| *y))
        .fold(1.0_f64, f64::max);

    ChartSpec {
        title: CHART_TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        legend_title: LEGEND_TITLE.to_string(),
        series,
        x_ticks: year_tick_labels(monthly),
        y_min: 0.0,
        y_max,
        grid: true,
        trend,
    }
}
