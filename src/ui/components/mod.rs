pub mod dropdown;
pub mod metric_card;
pub mod product_card;
pub mod trend_chart;
