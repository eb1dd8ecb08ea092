use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::entities::metrics::{
    AnnualAggregate, DerivedRow, ExcludedRow, ExclusionReason, MetricValue, MonthlyAggregate,
    ProductMetrics, UnavailableReason,
};
use crate::domain::entities::sales::SalesRecord;
use crate::domain::error::ProductError;

pub fn derive_row(record: &SalesRecord) -> DerivedRow {
    let profit = record.total_revenue - record.total_cost;
    let exclusion = if record.units_sold <= 0.0 {
        Some(ExclusionReason::NonPositiveUnits)
    } else if record.total_revenue == 0.0 {
        Some(ExclusionReason::ZeroRevenue)
    } else {
        None
    };
    let (average_price, margin) = match exclusion {
        Some(_) => (None, None),
        None => (
            Some(record.total_revenue / record.units_sold),
            Some(profit / record.total_revenue * 100.0),
        ),
    };

    DerivedRow {
        year: record.year,
        month: record.month,
        units_sold: record.units_sold,
        profit,
        average_price,
        margin,
        exclusion,
    }
}

pub fn derive_rows(subset: &[&SalesRecord]) -> Vec<DerivedRow> {
    subset.iter().map(|record| derive_row(record)).collect()
}

/// Units summed per (year, month), oldest first.
pub fn monthly_aggregate(subset: &[&SalesRecord]) -> Vec<MonthlyAggregate> {
    let mut by_period: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in subset {
        *by_period.entry(record.period()).or_insert(0.0) += record.units_sold;
    }
    by_period
        .into_iter()
        .map(|((year, month), units_sold)| MonthlyAggregate {
            year,
            month,
            units_sold,
        })
        .collect()
}

#[derive(Default)]
struct YearAccumulator {
    price_sum: f64,
    price_count: usize,
    margin_sum: f64,
    margin_count: usize,
    units_sold: f64,
}

fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

pub fn annual_aggregate(rows: &[DerivedRow]) -> Vec<AnnualAggregate> {
    let mut by_year: BTreeMap<i32, YearAccumulator> = BTreeMap::new();
    for row in rows {
        let acc = by_year.entry(row.year).or_default();
        acc.units_sold += row.units_sold;
        if let Some(price) = row.average_price {
            acc.price_sum += price;
            acc.price_count += 1;
        }
        if let Some(margin) = row.margin {
            acc.margin_sum += margin;
            acc.margin_count += 1;
        }
    }
    by_year
        .into_iter()
        .map(|(year, acc)| AnnualAggregate {
            year,
            average_price: mean(acc.price_sum, acc.price_count),
            margin: mean(acc.margin_sum, acc.margin_count),
            units_sold: acc.units_sold,
        })
        .collect()
}

/// Mean of the period-over-period percentage changes of a yearly series.
///
/// Pairs with a missing value or a zero base are skipped. A mean that
/// overflows is reported as an undefined change.
pub fn mean_pct_change(values: &[Option<f64>]) -> MetricValue {
    if values.len() < 2 {
        return MetricValue::Unavailable(UnavailableReason::NoPriorYear);
    }

    let changes: Vec<f64> = values
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(previous), Some(current)) if previous != 0.0 => {
                Some((current - previous) / previous * 100.0)
            }
            _ => None,
        })
        .filter(|change| change.is_finite())
        .collect();

    match mean(changes.iter().sum(), changes.len()).filter(|value| value.is_finite()) {
        Some(value) => MetricValue::Available(value),
        None => MetricValue::Unavailable(UnavailableReason::UndefinedChange),
    }
}

fn mean_metric(values: impl Iterator<Item = f64>) -> MetricValue {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    match mean(sum, count) {
        Some(value) => MetricValue::Available(value),
        None => MetricValue::Unavailable(UnavailableReason::NoValidRows),
    }
}

fn ensure_finite(product: &str, field: &'static str, value: f64) -> Result<f64, ProductError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProductError::NonFiniteAggregate {
            product: product.to_string(),
            field,
        })
    }
}

fn ensure_finite_metric(
    product: &str,
    field: &'static str,
    metric: MetricValue,
) -> Result<MetricValue, ProductError> {
    if let MetricValue::Available(value) = metric {
        ensure_finite(product, field, value)?;
    }
    Ok(metric)
}

pub fn compute_metrics(
    product: &str,
    subset: &[&SalesRecord],
) -> Result<ProductMetrics, ProductError> {
    if subset.is_empty() {
        return Err(ProductError::EmptySubset(product.to_string()));
    }

    let rows = derive_rows(subset);
    let annual = annual_aggregate(&rows);

    let excluded_rows: Vec<ExcludedRow> = rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| {
            row.exclusion
                .map(|reason| ExcludedRow { position, reason })
        })
        .collect();
    if !excluded_rows.is_empty() {
        warn!(
            product,
            excluded = excluded_rows.len(),
            "rows excluded from price and margin"
        );
    }

    let average_price = mean_metric(rows.iter().filter_map(|row| row.average_price));
    let average_margin = mean_metric(rows.iter().filter_map(|row| row.margin));
    let total_units = ensure_finite(
        product,
        "total_units",
        rows.iter().map(|row| row.units_sold).sum(),
    )?;
    let average_units = total_units / rows.len() as f64;

    let yearly_prices: Vec<Option<f64>> = annual.iter().map(|year| year.average_price).collect();
    let yearly_margins: Vec<Option<f64>> = annual.iter().map(|year| year.margin).collect();
    let yearly_units: Vec<Option<f64>> = annual.iter().map(|year| Some(year.units_sold)).collect();

    let metrics = ProductMetrics {
        product: product.to_string(),
        row_count: rows.len(),
        average_price: ensure_finite_metric(product, "average_price", average_price)?,
        average_price_yoy_pct: mean_pct_change(&yearly_prices),
        average_margin: ensure_finite_metric(product, "average_margin", average_margin)?,
        average_margin_yoy_pct: mean_pct_change(&yearly_margins),
        total_units,
        average_units,
        units_yoy_pct: mean_pct_change(&yearly_units),
        excluded_rows,
    };
    debug!(
        product,
        rows = metrics.row_count,
        years = annual.len(),
        profit = rows.iter().map(|row| row.profit).sum::<f64>(),
        "computed product metrics"
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32, units: f64, revenue: f64, cost: f64) -> SalesRecord {
        SalesRecord {
            branch: "Norte".to_string(),
            product: "A".to_string(),
            year,
            month,
            units_sold: units,
            total_revenue: revenue,
            total_cost: cost,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn derive_row_computes_price_profit_and_margin() {
        let row = derive_row(&record(2023, 1, 4.0, 200.0, 150.0));

        assert_eq!(row.average_price, Some(50.0));
        assert_eq!(row.profit, 50.0);
        assert_eq!(row.margin, Some(25.0));
        assert_eq!(row.exclusion, None);
    }

    #[test]
    fn derive_row_flags_zero_units_and_zero_revenue() {
        let zero_units = derive_row(&record(2023, 1, 0.0, 100.0, 10.0));
        assert_eq!(zero_units.exclusion, Some(ExclusionReason::NonPositiveUnits));
        assert_eq!(zero_units.average_price, None);
        assert_eq!(zero_units.margin, None);

        let zero_revenue = derive_row(&record(2023, 1, 5.0, 0.0, 10.0));
        assert_eq!(zero_revenue.exclusion, Some(ExclusionReason::ZeroRevenue));
        assert_eq!(zero_revenue.profit, -10.0);
        assert_eq!(zero_revenue.average_price, None);
    }

    #[test]
    fn monthly_aggregate_sums_branches_and_sorts_periods() {
        let rows = vec![
            record(2023, 2, 5.0, 1.0, 1.0),
            record(2022, 12, 1.0, 1.0, 1.0),
            record(2023, 2, 7.0, 1.0, 1.0),
            record(2023, 1, 3.0, 1.0, 1.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let monthly = monthly_aggregate(&subset);

        let periods: Vec<(i32, u32, f64)> = monthly
            .iter()
            .map(|entry| (entry.year, entry.month, entry.units_sold))
            .collect();
        assert_eq!(
            periods,
            vec![(2022, 12, 1.0), (2023, 1, 3.0), (2023, 2, 12.0)]
        );
    }

    #[test]
    fn worked_example_units_and_yoy() {
        let rows = vec![
            record(2022, 1, 10.0, 100.0, 50.0),
            record(2022, 2, 20.0, 200.0, 100.0),
            record(2023, 1, 15.0, 150.0, 75.0),
            record(2023, 2, 25.0, 250.0, 125.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let annual = annual_aggregate(&derive_rows(&subset));
        let units: Vec<(i32, f64)> = annual.iter().map(|a| (a.year, a.units_sold)).collect();
        assert_eq!(units, vec![(2022, 30.0), (2023, 40.0)]);

        let metrics = compute_metrics("A", &subset).expect("metrics should compute");
        assert_eq!(metrics.total_units, 70.0);
        assert_eq!(metrics.average_units, 17.5);
        assert_close(
            metrics.units_yoy_pct.value().expect("units yoy should exist"),
            (40.0 - 30.0) / 30.0 * 100.0,
        );
        assert_eq!(metrics.average_price, MetricValue::Available(10.0));
        assert_eq!(metrics.average_price_yoy_pct, MetricValue::Available(0.0));
        assert_eq!(metrics.average_margin, MetricValue::Available(50.0));
    }

    #[test]
    fn zero_revenue_row_is_excluded_from_price_but_counted_in_units() {
        let rows = vec![
            record(2023, 1, 10.0, 100.0, 60.0),
            record(2023, 2, 5.0, 0.0, 10.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let metrics = compute_metrics("A", &subset).expect("metrics should compute");

        assert_eq!(metrics.average_price, MetricValue::Available(10.0));
        assert_eq!(metrics.average_margin, MetricValue::Available(40.0));
        assert_eq!(metrics.total_units, 15.0);
        assert_eq!(
            metrics.excluded_rows,
            vec![ExcludedRow {
                position: 1,
                reason: ExclusionReason::ZeroRevenue
            }]
        );
    }

    #[test]
    fn single_year_reports_no_prior_year_for_every_change() {
        let rows = vec![
            record(2023, 1, 10.0, 100.0, 60.0),
            record(2023, 2, 12.0, 130.0, 60.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let metrics = compute_metrics("A", &subset).expect("metrics should compute");

        let no_prior = MetricValue::Unavailable(UnavailableReason::NoPriorYear);
        assert_eq!(metrics.average_price_yoy_pct, no_prior);
        assert_eq!(metrics.average_margin_yoy_pct, no_prior);
        assert_eq!(metrics.units_yoy_pct, no_prior);
    }

    #[test]
    fn all_rows_excluded_reports_price_and_margin_unavailable() {
        let rows = vec![
            record(2022, 1, 0.0, 100.0, 60.0),
            record(2023, 1, 4.0, 0.0, 60.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let metrics = compute_metrics("A", &subset).expect("metrics should compute");

        let no_rows = MetricValue::Unavailable(UnavailableReason::NoValidRows);
        assert_eq!(metrics.average_price, no_rows);
        assert_eq!(metrics.average_margin, no_rows);
        assert_eq!(
            metrics.average_price_yoy_pct,
            MetricValue::Unavailable(UnavailableReason::UndefinedChange)
        );
        assert_eq!(metrics.total_units, 4.0);
        assert_eq!(metrics.excluded_rows.len(), 2);
    }

    #[test]
    fn mean_pct_change_averages_period_changes() {
        let value = mean_pct_change(&[Some(100.0), Some(110.0), Some(99.0)]);

        // +10% then -10%
        assert_close(value.value().expect("change should exist"), 0.0);
    }

    #[test]
    fn mean_pct_change_skips_zero_base_and_missing_years() {
        assert_eq!(
            mean_pct_change(&[Some(0.0), Some(10.0)]),
            MetricValue::Unavailable(UnavailableReason::UndefinedChange)
        );
        assert_eq!(
            mean_pct_change(&[Some(0.0), Some(10.0), Some(15.0)]),
            MetricValue::Available(50.0)
        );
        assert_eq!(
            mean_pct_change(&[Some(10.0), None, Some(20.0)]),
            MetricValue::Unavailable(UnavailableReason::UndefinedChange)
        );
        assert_eq!(
            mean_pct_change(&[Some(10.0)]),
            MetricValue::Unavailable(UnavailableReason::NoPriorYear)
        );
    }

    #[test]
    fn compute_metrics_rejects_empty_subset() {
        let err = compute_metrics("A", &[]).expect_err("empty subset should fail");
        assert_eq!(err, ProductError::EmptySubset("A".to_string()));
    }

    #[test]
    fn compute_metrics_rejects_overflowing_units() {
        let rows = vec![
            record(2023, 1, f64::MAX, 100.0, 60.0),
            record(2023, 2, f64::MAX, 100.0, 60.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let err = compute_metrics("A", &subset).expect_err("overflow should fail");

        assert_eq!(
            err,
            ProductError::NonFiniteAggregate {
                product: "A".to_string(),
                field: "total_units",
            }
        );
    }

    #[test]
    fn mean_pct_change_reports_overflowing_mean_as_undefined() {
        let value = mean_pct_change(&[Some(1.0), Some(1e306), Some(1.0), Some(1e306)]);

        assert_eq!(
            value,
            MetricValue::Unavailable(UnavailableReason::UndefinedChange)
        );
    }

    #[test]
    fn compute_metrics_never_publishes_infinite_units_yoy() {
        let rows = vec![
            record(2020, 1, 1.0, 1.0, 0.0),
            record(2021, 1, 1e306, 1e306, 0.0),
            record(2022, 1, 0.0, 0.0, 0.0),
            record(2023, 1, 1.0, 1.0, 0.0),
            record(2024, 1, 1e306, 1e306, 0.0),
        ];
        let subset: Vec<&SalesRecord> = rows.iter().collect();

        let metrics = compute_metrics("A", &subset).expect("metrics should compute");

        assert!(metrics.total_units.is_finite());
        assert_eq!(
            metrics.units_yoy_pct,
            MetricValue::Unavailable(UnavailableReason::UndefinedChange)
        );
        assert_eq!(metrics.average_price_yoy_pct, MetricValue::Available(0.0));
        assert_eq!(metrics.average_margin_yoy_pct, MetricValue::Available(0.0));
    }
}
