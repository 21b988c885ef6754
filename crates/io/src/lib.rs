// Dataset loading and report output

pub mod csv;
pub mod error;
pub mod json;
pub mod postgres;
pub mod xlsx;

pub use error::{LoadError, ReportError};
