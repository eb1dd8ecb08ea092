#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    NonPositiveUnits,
    ZeroRevenue,
}

impl ExclusionReason {
    pub fn describe(&self) -> &'static str {
        match self {
            ExclusionReason::NonPositiveUnits => "unidades vendidas <= 0",
            ExclusionReason::ZeroRevenue => "ingreso total = 0",
        }
    }
}

/// Per-row fields derived from one record of a product subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRow {
    pub year: i32,
    pub month: u32,
    pub units_sold: f64,
    pub profit: f64,
    pub average_price: Option<f64>,
    pub margin: Option<f64>,
    pub exclusion: Option<ExclusionReason>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub units_sold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualAggregate {
    pub year: i32,
    pub average_price: Option<f64>,
    pub margin: Option<f64>,
    pub units_sold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    NoValidRows,
    NoPriorYear,
    UndefinedChange,
}

impl UnavailableReason {
    pub fn describe(&self) -> &'static str {
        match self {
            UnavailableReason::NoValidRows => "sin filas válidas",
            UnavailableReason::NoPriorYear => "sin datos del año anterior",
            UnavailableReason::UndefinedChange => "variación indefinida",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Available(f64),
    Unavailable(UnavailableReason),
}

impl MetricValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Available(value) => Some(*value),
            MetricValue::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedRow {
    /// Position of the row inside the product subset.
    pub position: usize,
    pub reason: ExclusionReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductMetrics {
    pub product: String,
    pub row_count: usize,
    pub average_price: MetricValue,
    pub average_price_yoy_pct: MetricValue,
    pub average_margin: MetricValue,
    pub average_margin_yoy_pct: MetricValue,
    pub total_units: f64,
    pub average_units: f64,
    pub units_yoy_pct: MetricValue,
    pub excluded_rows: Vec<ExcludedRow>,
}
