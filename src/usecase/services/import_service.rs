use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::domain::entities::sales::SalesTable;
use crate::domain::error::ImportError;
use crate::infra::import::csv::load_sales_csv;

#[derive(Debug, Clone)]
pub struct ImportResult {
    pub table: Arc<SalesTable>,
    pub source_name: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    pub fn import_csv(&self, path: &Path) -> Result<ImportResult, ImportError> {
        let started = Instant::now();
        let table = load_sales_csv(path)?;
        let source_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("datos.csv")
            .to_string();
        let row_count = table.len();

        info!(
            file = %path.display(),
            rows = row_count,
            branches = table.branches().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "imported sales csv"
        );

        Ok(ImportResult {
            table: Arc::new(table),
            source_name,
            row_count,
        })
    }
}
