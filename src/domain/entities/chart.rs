#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub style: LineStyle,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Renderer-agnostic description of the monthly units chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub series: Vec<ChartSeries>,
    pub x_ticks: Vec<String>,
    pub y_min: f64,
    pub y_max: f64,
    pub grid: bool,
    pub trend: Option<LinearFit>,
}

impl ChartSpec {
    pub fn point_count(&self) -> usize {
        self.x_ticks.len()
    }
}
