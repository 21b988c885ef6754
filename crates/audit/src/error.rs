use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (bad identifier, empty vocabulary entry, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// A check id that is not in the catalog.
    #[error("unknown check: {0}")]
    UnknownCheck(String),
}
