use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report is invalid: {0}")]
    InvalidReport(String),

    #[error("Report lists no browsers")]
    EmptyReport,

    #[error("Stylesheet not found in report: {0}")]
    MissingStylesheet(String),

    #[error("No issues to export")]
    NoIssues,
}

pub type Result<T> = std::result::Result<T, CompatViewError>;
