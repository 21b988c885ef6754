//! `nameqa run` and `nameqa validate` - config-driven audit runs.

use std::path::{Path, PathBuf};

use clap::Args;

use nameqa_audit::config::{SourceConfig, SourceKind};
use nameqa_audit::{AuditConfig, AuditResult, Record};
use nameqa_io::postgres;

use crate::exit_codes::EXIT_FINDINGS;
use crate::CliError;

#[derive(Args)]
pub struct RunArgs {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read the dataset from a CSV file
    #[arg(long, conflicts_with = "table")]
    pub csv: Option<PathBuf>,

    /// Read the dataset from a PostgreSQL table (optionally schema-qualified)
    #[arg(long)]
    pub table: Option<String>,

    /// Rows fetched per database page
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Column that gives database paging a stable order
    #[arg(long)]
    pub order_by: Option<String>,

    /// Path of the XLSX report
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the full result as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Also write the full result as JSON to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Run only this check (repeatable); see `nameqa checks`
    #[arg(long = "check", value_name = "ID")]
    pub checks: Vec<String>,

    /// Exit with code 6 when any check produced rows
    #[arg(long)]
    pub fail_on_findings: bool,
}

/// Where the records come from once config and flags are merged.
enum Dataset {
    Csv(PathBuf),
    Postgres(SourceConfig),
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let (mut config, base_dir) = match args.config {
        Some(ref path) => (read_config(path)?, config_dir(path)),
        None => (AuditConfig::default(), PathBuf::from(".")),
    };

    let dataset = apply_overrides(&mut config, &base_dir, &args)?;
    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;

    let records = load_dataset(&dataset)?;
    let result = nameqa_audit::run(&config, &records).map_err(|e| CliError::config(e.to_string()))?;

    let xlsx_path = PathBuf::from(&config.report.path);
    let export = nameqa_io::xlsx::export(&result, &xlsx_path).map_err(CliError::report)?;
    tracing::debug!(summary = %export.summary(), "report export finished");

    if let Some(ref json_path) = config.report.json {
        nameqa_io::json::export(&result, Path::new(json_path)).map_err(CliError::report)?;
    }

    if args.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    print_summary(&result);

    if args.fail_on_findings && result.total_rows() > 0 {
        tracing::warn!(rows = result.total_rows(), "findings present with --fail-on-findings");
        return Err(CliError::new(
            EXIT_FINDINGS,
            format!("{} finding(s) across {} check(s)", result.total_rows(), result.checks.len()),
        ));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let checks = config
        .selected_checks()
        .map_err(|e| CliError::config(e.to_string()))?;

    let source = match config.source {
        Some(ref s) => s.kind.to_string(),
        None => "postgres (default)".to_string(),
    };
    eprintln!(
        "valid: {} check(s), source: {}, report: {}",
        checks.len(),
        source,
        config.report.path,
    );
    Ok(())
}

fn read_config(path: &Path) -> Result<AuditConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::usage(format!("cannot read config {}: {e}", path.display())))?;
    AuditConfig::from_toml(&config_str).map_err(|e| {
        CliError::config(format!("{}: {e}", path.display()))
            .with_hint("run `nameqa checks` for the list of check ids")
    })
}

/// Relative paths inside a config file resolve against its directory.
fn config_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Fold command-line flags into the loaded config. Flags win.
fn apply_overrides(
    config: &mut AuditConfig,
    base_dir: &Path,
    args: &RunArgs,
) -> Result<Dataset, CliError> {
    if !args.checks.is_empty() {
        config.checks = args.checks.clone();
    }
    if let Some(ref output) = args.output {
        config.report.path = output.display().to_string();
    }
    if let Some(ref json_output) = args.json_output {
        config.report.json = Some(json_output.display().to_string());
    }

    if let Some(ref csv) = args.csv {
        if args.chunk_size.is_some() || args.order_by.is_some() {
            return Err(CliError::usage(
                "--chunk-size and --order-by only apply to a database source",
            ));
        }
        config.source = Some(SourceConfig::csv(csv.display().to_string()));
        return Ok(Dataset::Csv(csv.clone()));
    }

    let mut source = match (config.source.take(), &args.table) {
        (Some(s), Some(table)) if s.kind == SourceKind::Postgres => SourceConfig {
            table: table.clone(),
            ..s
        },
        (_, Some(table)) => SourceConfig::postgres(table.clone()),
        (Some(s), None) => s,
        (None, None) => SourceConfig::postgres(nameqa_audit::config::DEFAULT_TABLE),
    };

    if source.kind == SourceKind::Csv {
        if args.chunk_size.is_some() || args.order_by.is_some() {
            return Err(CliError::usage(
                "--chunk-size and --order-by only apply to a database source",
            ));
        }
        let path = source.path.clone().unwrap_or_default();
        config.source = Some(source);
        return Ok(Dataset::Csv(base_dir.join(path)));
    }

    if let Some(chunk_size) = args.chunk_size {
        source.chunk_size = chunk_size;
    }
    if let Some(ref order_by) = args.order_by {
        source.order_by = Some(order_by.clone());
    }
    config.source = Some(source.clone());
    Ok(Dataset::Postgres(source))
}

fn load_dataset(dataset: &Dataset) -> Result<Vec<Record>, CliError> {
    match dataset {
        Dataset::Csv(path) => {
            tracing::info!(path = %path.display(), "loading dataset from CSV");
            nameqa_io::csv::load(path).map_err(CliError::load)
        }
        Dataset::Postgres(source) => {
            tracing::info!(
                table = %source.table,
                chunk_size = source.chunk_size,
                "loading dataset from PostgreSQL"
            );
            source
                .validate()
                .map_err(|e| CliError::config(e.to_string()))?;
            let url = postgres::database_url(source).map_err(CliError::load)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| CliError::general(format!("cannot start async runtime: {e}")))?;
            runtime
                .block_on(postgres::load(source, &url))
                .map_err(CliError::load)
        }
    }
}

/// Human summary to stderr, one line per check.
fn print_summary(result: &AuditResult) {
    for check in &result.checks {
        eprintln!("  {:<28} {:>6} row(s)", check.label, check.rows.len());
    }
    let s = &result.summary;
    eprintln!(
        "{} record(s) audited, {} distinct people flagged",
        s.records, s.total_flagged,
    );
}
