use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Data integrity error at credit note row {row}: {details}")]
    DataIntegrity { row: usize, details: String },

    #[error("Missing column '{column}' in {dataset} record set")]
    MissingColumn { dataset: String, column: String },

    #[error("Invalid amount '{value}' in {dataset} record set at row {row}")]
    InvalidAmount {
        dataset: String,
        row: usize,
        value: String,
    },

    #[error("Amount overflow while totalling '{key}'")]
    AmountOverflow { key: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
