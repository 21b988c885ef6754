use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::catalog::CheckId;
use crate::error::AuditError;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_CHUNK_SIZE: usize = 50_000;
pub const DEFAULT_TABLE: &str = "bn_200";
pub const DEFAULT_DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DEFAULT_REPORT_PATH: &str = "db_qa_checks_all_rows_output.xlsx";

static SQL_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").unwrap());

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Checks to run, in any order. Empty means all of them.
    #[serde(default)]
    pub checks: Vec<String>,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub report: ReportConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Csv,
    Postgres,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// CSV file, relative to the config file.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Column giving the paged query a stable order.
    #[serde(default)]
    pub order_by: Option<String>,
    /// Environment variable holding the connection string.
    #[serde(default = "default_database_url_env")]
    pub database_url_env: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.into()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_database_url_env() -> String {
    DEFAULT_DATABASE_URL_ENV.into()
}

impl SourceConfig {
    pub fn csv(path: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Csv,
            path: Some(path.into()),
            table: default_table(),
            chunk_size: default_chunk_size(),
            order_by: None,
            database_url_env: default_database_url_env(),
        }
    }

    pub fn postgres(table: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Postgres,
            path: None,
            table: table.into(),
            chunk_size: default_chunk_size(),
            order_by: None,
            database_url_env: default_database_url_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: String,
    #[serde(default)]
    pub json: Option<String>,
}

fn default_report_path() -> String {
    DEFAULT_REPORT_PATH.into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            json: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing + validation
// ---------------------------------------------------------------------------

impl AuditConfig {
    pub fn from_toml(input: &str) -> Result<Self, AuditError> {
        let config: AuditConfig =
            toml::from_str(input).map_err(|e| AuditError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        self.selected_checks()?;

        for (set, entries) in [
            ("designations", &self.vocabulary.designations),
            ("suffixes", &self.vocabulary.suffixes),
        ] {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(AuditError::ConfigValidation(format!(
                    "vocabulary.{set} contains an empty entry"
                )));
            }
            if let Some(e) = entries.iter().find(|e| e.trim() != e.as_str()) {
                return Err(AuditError::ConfigValidation(format!(
                    "vocabulary.{set} entry '{e}' has surrounding whitespace"
                )));
            }
        }

        if let Some(ref source) = self.source {
            source.validate()?;
        }

        if self.report.path.trim().is_empty() {
            return Err(AuditError::ConfigValidation("report.path is empty".into()));
        }

        Ok(())
    }

    /// Checks to run, in catalog order. All checks when none are listed.
    pub fn selected_checks(&self) -> Result<Vec<CheckId>, AuditError> {
        if self.checks.is_empty() {
            return Ok(CheckId::all().to_vec());
        }
        let mut wanted = self
            .checks
            .iter()
            .map(|c| CheckId::parse(c))
            .collect::<Result<Vec<_>, _>>()?;
        wanted.sort();
        wanted.dedup();
        Ok(wanted)
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), AuditError> {
        match self.kind {
            SourceKind::Csv => {
                if self.path.as_deref().map_or(true, |p| p.trim().is_empty()) {
                    return Err(AuditError::ConfigValidation(
                        "source.path is required for a csv source".into(),
                    ));
                }
            }
            SourceKind::Postgres => {
                if self.chunk_size == 0 {
                    return Err(AuditError::ConfigValidation(
                        "source.chunk_size must be greater than 0".into(),
                    ));
                }
                check_identifier("source.table", &self.table)?;
                if let Some(ref col) = self.order_by {
                    check_identifier("source.order_by", col)?;
                }
                if self.database_url_env.trim().is_empty() {
                    return Err(AuditError::ConfigValidation(
                        "source.database_url_env is empty".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Table and column names are spliced into SQL, so only plain (optionally
/// schema-qualified) identifiers are allowed.
pub fn check_identifier(field: &str, value: &str) -> Result<(), AuditError> {
    if SQL_IDENT.is_match(value) {
        Ok(())
    } else {
        Err(AuditError::ConfigValidation(format!(
            "{field} '{value}' is not a valid SQL identifier"
        )))
    }
}
