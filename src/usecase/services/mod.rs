pub mod dashboard_service;
pub mod import_service;
pub mod metric_service;
pub mod trend_service;
