use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::entities::sales::{SalesRecord, SalesTable};
use crate::domain::error::ImportError;

pub const COL_BRANCH: &str = "Sucursal";
pub const COL_PRODUCT: &str = "Producto";
pub const COL_YEAR: &str = "Año";
pub const COL_MONTH: &str = "Mes";
pub const COL_UNITS: &str = "Unidades_vendidas";
pub const COL_REVENUE: &str = "Ingreso_total";
pub const COL_COST: &str = "Costo_total";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_BRANCH,
    COL_PRODUCT,
    COL_YEAR,
    COL_MONTH,
    COL_UNITS,
    COL_REVENUE,
    COL_COST,
];

struct ColumnIndex {
    branch: usize,
    product: usize,
    year: usize,
    month: usize,
    units: usize,
    revenue: usize,
    cost: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let positions: Vec<Option<usize>> = REQUIRED_COLUMNS
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|header| normalize_header(header) == *name)
            })
            .collect();

        match positions.as_slice() {
            &[Some(branch), Some(product), Some(year), Some(month), Some(units), Some(revenue), Some(cost)] => {
                Ok(Self {
                    branch,
                    product,
                    year,
                    month,
                    units,
                    revenue,
                    cost,
                })
            }
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(&positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(ImportError::MissingColumns(missing))
            }
        }
    }
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

fn cell<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

fn invalid_number(record: &StringRecord, column: &str, value: &str) -> ImportError {
    ImportError::InvalidNumber {
        line: line_of(record),
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(record: &StringRecord, idx: usize, column: &str) -> Result<f64, ImportError> {
    let raw = cell(record, idx);
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_number(record, column, raw))
}

// Accepts "2023" as well as "2023.0", which spreadsheet exports often produce.
fn parse_integer(record: &StringRecord, idx: usize, column: &str) -> Result<i64, ImportError> {
    let raw = cell(record, idx);
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .map(|value| value as i64)
        .ok_or_else(|| invalid_number(record, column, raw))
}

fn parse_record(record: &StringRecord, columns: &ColumnIndex) -> Result<SalesRecord, ImportError> {
    let year = parse_integer(record, columns.year, COL_YEAR)?;
    let month = parse_integer(record, columns.month, COL_MONTH)?;
    let (year, month) = match (i32::try_from(year), u32::try_from(month)) {
        (Ok(year), Ok(month)) if NaiveDate::from_ymd_opt(year, month, 1).is_some() => {
            (year, month)
        }
        _ => {
            return Err(ImportError::InvalidPeriod {
                line: line_of(record),
                year: year.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                month: month.clamp(0, u32::MAX as i64) as u32,
            })
        }
    };

    Ok(SalesRecord {
        branch: cell(record, columns.branch).to_string(),
        product: cell(record, columns.product).to_string(),
        year,
        month,
        units_sold: parse_f64(record, columns.units, COL_UNITS)?,
        total_revenue: parse_f64(record, columns.revenue, COL_REVENUE)?,
        total_cost: parse_f64(record, columns.cost, COL_COST)?,
    })
}

pub fn read_sales_csv<R: Read>(source: R) -> Result<SalesTable, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    if headers.is_empty() || headers.iter().all(|header| normalize_header(header).is_empty()) {
        return Err(ImportError::EmptyFile);
    }

    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(parse_record(&record, &columns)?);
    }

    let table = SalesTable::new(records);
    if table.is_empty() {
        return Err(ImportError::NoRows);
    }

    Ok(table)
}

pub fn load_sales_csv(csv_path: &Path) -> Result<SalesTable, ImportError> {
    let file = File::open(csv_path)?;
    read_sales_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Sucursal,Producto,Año,Mes,Unidades_vendidas,Ingreso_total,Costo_total";

    #[test]
    fn read_sales_csv_parses_typed_rows() {
        let text = format!("{HEADER}\nNorte,Café,2023,1,10,1500.5,900\nSur,Té,2023,2,4,200,120\n");

        let table = read_sales_csv(text.as_bytes()).expect("csv should parse");

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.branch, "Norte");
        assert_eq!(first.product, "Café");
        assert_eq!(first.period(), (2023, 1));
        assert_eq!(first.units_sold, 10.0);
        assert_eq!(first.total_revenue, 1500.5);
        assert_eq!(first.total_cost, 900.0);
    }

    #[test]
    fn read_sales_csv_finds_columns_by_name_and_ignores_extras() {
        let text = "\u{feff}Mes, Año ,Extra,Producto,Sucursal,Costo_total,Ingreso_total,Unidades_vendidas\n\
                    3,2022,x,A,Centro,5,10,2\n";

        let table = read_sales_csv(text.as_bytes()).expect("reordered csv should parse");

        let record = &table.records()[0];
        assert_eq!(record.period(), (2022, 3));
        assert_eq!(record.branch, "Centro");
        assert_eq!(record.units_sold, 2.0);
        assert_eq!(record.total_cost, 5.0);
    }

    #[test]
    fn read_sales_csv_accepts_float_formatted_periods() {
        let text = format!("{HEADER}\nNorte,A,2023.0,12.0,1,1,1\n");

        let table = read_sales_csv(text.as_bytes()).expect("float periods should parse");

        assert_eq!(table.records()[0].period(), (2023, 12));
    }

    #[test]
    fn read_sales_csv_reports_missing_columns() {
        let text = "Sucursal,Producto,Año\nNorte,A,2023\n";

        let err = read_sales_csv(text.as_bytes()).expect_err("missing columns should fail");

        match err {
            ImportError::MissingColumns(missing) => {
                assert_eq!(
                    missing,
                    vec!["Mes", "Unidades_vendidas", "Ingreso_total", "Costo_total"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_sales_csv_rejects_empty_input() {
        let err = read_sales_csv("".as_bytes()).expect_err("empty input should fail");
        assert!(matches!(err, ImportError::EmptyFile), "unexpected error: {err:?}");

        let err = read_sales_csv(format!("{HEADER}\n").as_bytes())
            .expect_err("header-only input should fail");
        assert!(matches!(err, ImportError::NoRows), "unexpected error: {err:?}");
    }

    #[test]
    fn read_sales_csv_reports_line_of_non_numeric_value() {
        let text = format!("{HEADER}\nNorte,A,2023,1,10,100,50\nNorte,A,2023,2,diez,100,50\n");

        let err = read_sales_csv(text.as_bytes()).expect_err("non-numeric units should fail");

        match err {
            ImportError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, COL_UNITS);
                assert_eq!(value, "diez");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_sales_csv_rejects_non_finite_numbers() {
        let text = format!("{HEADER}\nNorte,A,2023,1,NaN,100,50\n");

        let err = read_sales_csv(text.as_bytes()).expect_err("NaN should be rejected");

        assert!(
            matches!(err, ImportError::InvalidNumber { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn read_sales_csv_rejects_out_of_range_month() {
        let text = format!("{HEADER}\nNorte,A,2023,13,1,100,50\n");

        let err = read_sales_csv(text.as_bytes()).expect_err("month 13 should fail");

        match err {
            ImportError::InvalidPeriod { line, year, month } => {
                assert_eq!((line, year, month), (2, 2023, 13));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_sales_csv_rejects_ragged_rows() {
        let text = format!("{HEADER}\nNorte,A,2023,1,1\n");

        let err = read_sales_csv(text.as_bytes()).expect_err("short row should fail");

        assert!(matches!(err, ImportError::Csv(_)), "unexpected error: {err:?}");
    }
}
