//! Error types for loading and computing the dashboard.

use thiserror::Error;

/// Reasons an uploaded file cannot become a sales table.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be opened or read.
    #[error("no se pudo leer el archivo: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the content.
    #[error("CSV inválido: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row.
    #[error("el archivo está vacío")]
    EmptyFile,

    /// The header row is present but no data rows follow.
    #[error("el archivo no contiene filas de datos")]
    NoRows,

    /// Required headers are absent.
    #[error("faltan columnas requeridas: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A numeric column holds something that is not a finite number.
    #[error("línea {line}: valor no numérico en '{column}': '{value}'")]
    InvalidNumber {
        /// 1-based line in the file, header included.
        line: u64,
        /// Column header.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// Year and month do not form a calendar month.
    #[error("línea {line}: período inválido {year}-{month}")]
    InvalidPeriod {
        /// 1-based line in the file, header included.
        line: u64,
        /// Parsed year.
        year: i32,
        /// Parsed month.
        month: u32,
    },
}

/// Failure computing one product; other products still render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductError {
    /// No rows for the product after filtering.
    #[error("sin filas para el producto '{0}'")]
    EmptySubset(String),

    /// An aggregate overflowed to a non-finite value.
    #[error("valor no finito en '{field}' para el producto '{product}'")]
    NonFiniteAggregate {
        /// Product name.
        product: String,
        /// Aggregate that overflowed.
        field: &'static str,
    },
}
