//! Error types for the displacement pipeline

use thiserror::Error;

/// Errors raised while reading the three source tables.
///
/// Any of these aborts model construction; nothing is partially loaded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Sheet '{sheet}' has no header row at index {row}")]
    MissingHeaderRow { sheet: String, row: usize },

    #[error("Sheet '{sheet}' is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },

    #[error("Sheet '{sheet}' defines joint '{name}' on story '{story}' more than once")]
    DuplicateKey {
        sheet: String,
        name: String,
        story: String,
    },

    #[error("Workbook error: {0}")]
    Workbook(String),
}

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum VizError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Column '{column}' row {row} holds non-numeric value '{value}'")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row label {0} has no counterpart in the source table")]
    UnalignedRow(usize),

    #[error("Scale factor {0} is outside the allowed range 1..=10")]
    InvalidScale(u32),

    #[error("Unknown displacement direction '{0}' (expected Ux, Uy or Uz)")]
    UnknownDirection(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VizError {
    /// True when the error came from reading the workbook.
    pub fn is_load_error(&self) -> bool {
        matches!(self, VizError::Load(_))
    }
}

/// Result type for pipeline operations
pub type VizResult<T> = Result<T, VizError>;
