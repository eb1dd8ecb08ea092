use dioxus::prelude::*;

use crate::domain::entities::chart::{ChartSpec, LineStyle};
use crate::ui::format::format_number_with_dots;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 52.0;
const Y_TICK_COUNT: usize = 5;
const Y_HEADROOM: f64 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineLayout {
    pub label: String,
    pub color: String,
    pub dash: Option<&'static str>,
    pub points: Vec<(f64, f64)>,
}

impl PolylineLayout {
    pub fn svg_points(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// SVG geometry for a [`ChartSpec`] at a given pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub lines: Vec<PolylineLayout>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

pub fn layout_chart(spec: &ChartSpec, width: f64, height: f64) -> ChartLayout {
    let plot = PlotArea {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        right: (width - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
        bottom: (height - MARGIN_BOTTOM).max(MARGIN_TOP + 1.0),
    };
    let y_top = spec.y_min + (spec.y_max - spec.y_min).max(1.0) * Y_HEADROOM;
    let last_index = spec.point_count().saturating_sub(1) as f64;

    let x_of = |index: f64| {
        if last_index == 0.0 {
            (plot.left + plot.right) / 2.0
        } else {
            plot.left + index / last_index * (plot.right - plot.left)
        }
    };
    let y_of = |value: f64| {
        let clamped = value.max(spec.y_min);
        plot.bottom - (clamped - spec.y_min) / (y_top - spec.y_min) * (plot.bottom - plot.top)
    };

    let lines = spec
        .series
        .iter()
        .map(|series| PolylineLayout {
            label: series.label.clone(),
            color: series.color.clone(),
            dash: match series.style {
                LineStyle::Solid => None,
                LineStyle::Dashed => Some("6 4"),
            },
            points: series
                .points
                .iter()
                .map(|(x, y)| (x_of(*x), y_of(*y)))
                .collect(),
        })
        .collect();

    let x_ticks = spec
        .x_ticks
        .iter()
        .enumerate()
        .filter(|(_, label)| !label.is_empty())
        .map(|(idx, label)| AxisTick {
            position: x_of(idx as f64),
            label: label.clone(),
        })
        .collect();

    let y_ticks = (0..=Y_TICK_COUNT)
        .map(|step| {
            let value = spec.y_min + (y_top - spec.y_min) * step as f64 / Y_TICK_COUNT as f64;
            AxisTick {
                position: y_of(value),
                label: format_number_with_dots(value, 0),
            }
        })
        .collect();

    ChartLayout {
        width,
        height,
        plot,
        lines,
        x_ticks,
        y_ticks,
    }
}

struct LegendEntry {
    line_y: f64,
    text_y: f64,
    color: String,
    dash: &'static str,
    label: String,
}

#[component]
pub fn TrendChart(spec: ChartSpec, width: u32, height: u32) -> Element {
    let layout = layout_chart(&spec, f64::from(width), f64::from(height));
    let plot = layout.plot;
    let chart_width = layout.width;
    let chart_height = layout.height;
    let title_x = (plot.left + plot.right) / 2.0;
    let x_label_y = chart_height - 12.0;
    let y_label_x = 16.0;
    let y_label_y = (plot.top + plot.bottom) / 2.0;
    let y_tick_label_x = plot.left - 6.0;
    let x_tick_label_y = plot.bottom + 16.0;
    let legend_x = plot.right - 150.0;
    let legend_y = plot.top + 8.0;
    let legend_height = 24.0 + 18.0 * layout.lines.len() as f64;
    let legend_title_x = legend_x + 71.0;
    let legend_title_y = legend_y + 16.0;
    let legend_line_start = legend_x + 8.0;
    let legend_line_end = legend_x + 32.0;
    let legend_text_x = legend_x + 38.0;
    let y_label_transform = format!("rotate(-90 {y_label_x} {y_label_y})");

    let y_ticks: Vec<(f64, f64, String)> = layout
        .y_ticks
        .iter()
        .map(|tick| (tick.position, tick.position + 4.0, tick.label.clone()))
        .collect();
    let x_ticks: Vec<(f64, String)> = layout
        .x_ticks
        .iter()
        .map(|tick| (tick.position, tick.label.clone()))
        .collect();
    let polylines: Vec<(String, String, &'static str)> = layout
        .lines
        .iter()
        .map(|line| {
            (
                line.svg_points(),
                line.color.clone(),
                line.dash.unwrap_or("none"),
            )
        })
        .collect();
    let legend: Vec<LegendEntry> = layout
        .lines
        .iter()
        .enumerate()
        .map(|(idx, line)| LegendEntry {
            line_y: legend_y + 30.0 + 18.0 * idx as f64,
            text_y: legend_y + 34.0 + 18.0 * idx as f64,
            color: line.color.clone(),
            dash: line.dash.unwrap_or("none"),
            label: line.label.clone(),
        })
        .collect();
    let grid = spec.grid;

    rsx! {
        svg {
            width: "{chart_width}",
            height: "{chart_height}",
            view_box: "0 0 {chart_width} {chart_height}",
            style: "max-width: 100%; height: auto; background: #fff;",

            text {
                x: "{title_x}",
                y: "22",
                text_anchor: "middle",
                font_size: "15",
                font_weight: "600",
                "{spec.title}"
            }

            for (position, label_y, label) in y_ticks {
                if grid {
                    line {
                        x1: "{plot.left}",
                        y1: "{position}",
                        x2: "{plot.right}",
                        y2: "{position}",
                        stroke: "#e6e6e6",
                    }
                }
                text {
                    x: "{y_tick_label_x}",
                    y: "{label_y}",
                    text_anchor: "end",
                    font_size: "11",
                    fill: "#444",
                    "{label}"
                }
            }

            for (position, label) in x_ticks {
                if grid {
                    line {
                        x1: "{position}",
                        y1: "{plot.top}",
                        x2: "{position}",
                        y2: "{plot.bottom}",
                        stroke: "#e6e6e6",
                    }
                }
                text {
                    x: "{position}",
                    y: "{x_tick_label_y}",
                    text_anchor: "middle",
                    font_size: "11",
                    fill: "#444",
                    "{label}"
                }
            }

            line {
                x1: "{plot.left}",
                y1: "{plot.bottom}",
                x2: "{plot.right}",
                y2: "{plot.bottom}",
                stroke: "#333",
            }
            line {
                x1: "{plot.left}",
                y1: "{plot.top}",
                x2: "{plot.left}",
                y2: "{plot.bottom}",
                stroke: "#333",
            }

            for (points, color, dash) in polylines {
                polyline {
                    points: "{points}",
                    fill: "none",
                    stroke: "{color}",
                    stroke_width: "2",
                    stroke_dasharray: dash,
                }
            }

            text {
                x: "{title_x}",
                y: "{x_label_y}",
                text_anchor: "middle",
                font_size: "12",
                "{spec.x_label}"
            }
            text {
                x: "{y_label_x}",
                y: "{y_label_y}",
                text_anchor: "middle",
                font_size: "12",
                transform: "{y_label_transform}",
                "{spec.y_label}"
            }

            g {
                rect {
                    x: "{legend_x}",
                    y: "{legend_y}",
                    width: "142",
                    height: "{legend_height}",
                    fill: "#fff",
                    stroke: "#ccc",
                    rx: "4",
                }
                text {
                    x: "{legend_title_x}",
                    y: "{legend_title_y}",
                    text_anchor: "middle",
                    font_size: "11",
                    font_weight: "600",
                    "{spec.legend_title}"
                }
                for entry in legend {
                    line {
                        x1: "{legend_line_start}",
                        y1: "{entry.line_y}",
                        x2: "{legend_line_end}",
                        y2: "{entry.line_y}",
                        stroke: "{entry.color}",
                        stroke_width: "2",
                        stroke_dasharray: entry.dash,
                    }
                    text {
                        x: "{legend_text_x}",
                        y: "{entry.text_y}",
                        font_size: "11",
                        "{entry.label}"
                    }
                }
            }
        }
    }
}
