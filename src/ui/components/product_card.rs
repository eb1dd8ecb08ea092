use dioxus::prelude::*;

use crate::config::{AuthorConfig, ChartConfig};
use crate::domain::entities::metrics::ExcludedRow;
use crate::ui::components::metric_card::{metric_displays, MetricCard};
use crate::ui::components::trend_chart::TrendChart;
use crate::ui::format::format_number_with_dots;
use crate::usecase::services::dashboard_service::ProductPanel;

const CARD_STYLE: &str =
    "border: 1px solid #ddd; border-radius: 8px; padding: 12px 16px; margin-bottom: 16px; background: #fff;";

pub fn exclusion_summary(excluded: &[ExcludedRow]) -> Option<String> {
    let first = excluded.first()?;
    let noun = if excluded.len() == 1 { "fila excluida" } else { "filas excluidas" };
    Some(format!(
        "{} {noun} de precio y margen (p. ej. registro {}: {})",
        excluded.len(),
        first.position + 1,
        first.reason.describe()
    ))
}

#[component]
pub fn ProductCard(panel: ProductPanel, chart: ChartConfig) -> Element {
    let body = match &panel.outcome {
        Ok(report) => {
            let displays = metric_displays(&report.metrics);
            let average_units = format_number_with_dots(report.metrics.average_units, 1);
            let exclusion = exclusion_summary(&report.metrics.excluded_rows);
            let spec = report.chart.clone();
            rsx! {
                div {
                    style: "display: flex; gap: 16px; align-items: flex-start;",
                    div {
                        style: "flex: 0 0 25%; display: flex; flex-direction: column;",
                        for display in displays {
                            MetricCard { display: display }
                        }
                        span {
                            style: "font-size: 12px; color: #808495;",
                            "Promedio por registro: {average_units} u."
                        }
                        if let Some(text) = exclusion {
                            span {
                                style: "font-size: 12px; color: #b26b00; margin-top: 6px;",
                                "⚠ {text}"
                            }
                        }
                    }
                    div {
                        style: "flex: 1 1 75%; min-width: 0;",
                        TrendChart { spec: spec, width: chart.width, height: chart.height }
                    }
                }
            }
        }
        Err(err) => rsx! {
            p { style: "color: #ff2b2b;", "No se pudieron calcular las métricas: {err}" }
        },
    };

    rsx! {
        div {
            style: CARD_STYLE,
            h3 { style: "margin: 0 0 8px 0;", "{panel.product}" }
            {body}
        }
    }
}

#[component]
pub fn AuthorPanel(author: AuthorConfig) -> Element {
    rsx! {
        div {
            style: CARD_STYLE,
            p { b { "Legajo:" } " {author.legajo}" }
            p { b { "Nombre:" } " {author.nombre}" }
            p { b { "Comisión:" } " {author.comision}" }
        }
    }
}
