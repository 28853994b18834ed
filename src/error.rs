use std::path::PathBuf;
use thiserror::Error;

use crate::plan::ValidationError;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Data directory not found at {0}. Run 'indexplan init' to create it.")]
    DataDirNotFound(PathBuf),

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write data file {path}: {source}")]
    DataWrite {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("No project selected. Pass --project or set default_project in config.toml")]
    NoProject,

    #[error("Project '{0}' not found in config.toml")]
    ProjectNotFound(String),

    #[error("Unit '{0}' not found in commitments.toml")]
    UnitNotFound(String),

    #[error("Client '{0}' has no commitment in this project")]
    ClientNotFound(String),

    #[error("Installment {0} does not exist for this project")]
    InstallmentNotFound(u32),

    #[error("Cannot add an installment after number {0}")]
    InstallmentNumberOverflow(u32),

    #[error("Payment amount must be greater than zero")]
    InvalidPaymentAmount,

    #[error("Exchange rate must be greater than zero")]
    InvalidExchangeRate,

    #[error("Specify either --unit or --client to identify the payer")]
    MissingPayer,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("{0} validation issue(s) found")]
    ValidationFailed(usize),

    #[error("Invalid plan data: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
