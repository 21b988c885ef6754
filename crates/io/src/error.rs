use thiserror::Error;

/// Failure to obtain the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is absent from the header row or the query result.
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("environment variable {0} is not set (database connection string)")]
    MissingDatabaseUrl(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Config(#[from] nameqa_audit::AuditError),
}

/// Failure to write a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
