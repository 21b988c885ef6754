//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: pipelines gate on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (unspecified)                         |
//! | 2    | CLI usage error (bad args, unreadable config file)  |
//! | 3    | Invalid config (parse or validation failure)        |
//! | 4    | Dataset could not be loaded (CSV or database)       |
//! | 5    | Report could not be written (XLSX or JSON)          |
//! | 6    | Findings present and `--fail-on-findings` was given |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting flags, unreadable config file.
pub const EXIT_USAGE: u8 = 2;

/// Config file failed to parse or validate (unknown check, bad identifier).
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Dataset load failed: unreadable CSV, missing column, missing
/// connection string, database error.
pub const EXIT_LOAD: u8 = 4;

/// Writing the XLSX or JSON report failed.
pub const EXIT_REPORT: u8 = 5;

/// At least one check produced rows and `--fail-on-findings` was set.
pub const EXIT_FINDINGS: u8 = 6;
