//! `nameqa-audit`: rule engine for parsed person-name datasets.
//!
//! Pure engine crate: receives a materialized record sequence, returns one
//! result set per check. No CLI, file or database dependencies.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod model;
pub mod nickname;
pub mod text;
pub mod validators;
pub mod vocabulary;

pub use catalog::{CheckId, CheckKind};
pub use config::AuditConfig;
pub use engine::run;
pub use error::AuditError;
pub use model::{AuditResult, CheckResult, Record};
pub use vocabulary::Vocabulary;
