pub mod chart;
pub mod metrics;
pub mod sales;
