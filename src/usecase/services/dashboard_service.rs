use tracing::{debug, warn};

use crate::domain::entities::chart::ChartSpec;
use crate::domain::entities::metrics::ProductMetrics;
use crate::domain::entities::sales::{
    distinct_in_order, BranchFilter, SalesRecord, SalesTable, ALL_BRANCHES_LABEL,
};
use crate::domain::error::ProductError;
use crate::usecase::services::metric_service::{compute_metrics, monthly_aggregate};
use crate::usecase::services::trend_service::build_trend_chart;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductReport {
    pub metrics: ProductMetrics,
    pub chart: ChartSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPanel {
    pub product: String,
    pub outcome: Result<ProductReport, ProductError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub heading: String,
    pub row_count: usize,
    pub products: Vec<ProductPanel>,
}

/// "Todas" followed by each branch in order of first appearance.
pub fn branch_options(table: &SalesTable) -> Vec<String> {
    std::iter::once(ALL_BRANCHES_LABEL.to_string())
        .chain(table.branches())
        .collect()
}

pub fn product_names(rows: &[&SalesRecord]) -> Vec<String> {
    distinct_in_order(rows.iter().map(|record| record.product.as_str()))
}

pub fn filter_by_branch<'a>(table: &'a SalesTable, filter: &BranchFilter) -> Vec<&'a SalesRecord> {
    table
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}

pub fn product_subset<'a>(rows: &[&'a SalesRecord], product: &str) -> Vec<&'a SalesRecord> {
    rows.iter()
        .copied()
        .filter(|record| record.product == product)
        .collect()
}

pub fn dashboard_heading(filter: &BranchFilter) -> String {
    match filter {
        BranchFilter::All => "Datos de Todas las Sucursales".to_string(),
        BranchFilter::Branch(name) => format!("Datos de {name}"),
    }
}

pub fn build_product_report(
    product: &str,
    subset: &[&SalesRecord],
) -> Result<ProductReport, ProductError> {
    let metrics = compute_metrics(product, subset)?;
    let monthly = monthly_aggregate(subset);
    let chart = build_trend_chart(product, &monthly);
    Ok(ProductReport { metrics, chart })
}

/// One full pass over an immutable table for the selected branch.
pub fn compute(table: &SalesTable, filter: &BranchFilter) -> DashboardView {
    let rows = filter_by_branch(table, filter);
    let products = product_names(&rows)
        .into_iter()
        .map(|product| {
            let subset = product_subset(&rows, &product);
            let outcome = build_product_report(&product, &subset);
            if let Err(err) = &outcome {
                warn!(product = %product, error = %err, "product report failed");
            }
            ProductPanel { product, outcome }
        })
        .collect::<Vec<_>>();

    debug!(
        branch = filter.label(),
        rows = rows.len(),
        products = products.len(),
        "computed dashboard"
    );

    DashboardView {
        heading: dashboard_heading(filter),
        row_count: rows.len(),
        products,
    }
}
