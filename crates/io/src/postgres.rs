//! Paged PostgreSQL dataset loading.
//!
//! Rows are fetched `chunk_size` at a time with OFFSET/LIMIT until an empty
//! page comes back. Every column is cast to text so numeric ids and other
//! non-string values arrive in their string form.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use nameqa_audit::config::{check_identifier, SourceConfig};
use nameqa_audit::model::{Record, RECORD_COLUMNS};

use crate::error::LoadError;

/// Read the connection string from the configured environment variable.
pub fn database_url(source: &SourceConfig) -> Result<String, LoadError> {
    std::env::var(&source.database_url_env)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| LoadError::MissingDatabaseUrl(source.database_url_env.clone()))
}

/// Connect, fetch every page, and close the pool whether or not the fetch
/// succeeded.
pub async fn load(source: &SourceConfig, database_url: &str) -> Result<Vec<Record>, LoadError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    let result = fetch_all(&pool, source).await;
    pool.close().await;
    result
}

/// Fetch all pages from an open pool.
pub async fn fetch_all(pool: &PgPool, source: &SourceConfig) -> Result<Vec<Record>, LoadError> {
    let sql = page_query(&source.table, source.order_by.as_deref())?;
    let limit = i64::try_from(source.chunk_size).unwrap_or(i64::MAX);

    let mut records = Vec::new();
    loop {
        let offset = records.len();
        let rows = sqlx::query(&sql)
            .bind(offset as i64)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        if rows.is_empty() {
            break;
        }

        for row in &rows {
            let mut record = Record::default();
            for (idx, &name) in RECORD_COLUMNS.iter().enumerate() {
                let value: Option<String> = row.try_get(idx)?;
                record.set(name, value.filter(|v| !v.is_empty()));
            }
            records.push(record);
        }

        tracing::info!(from = offset, to = records.len(), table = %source.table, "loaded rows");
    }

    tracing::info!(rows = records.len(), table = %source.table, "dataset loaded");
    Ok(records)
}

/// Build the paged SELECT. `$1` is the offset, `$2` the page size.
///
/// OFFSET paging needs the same row order on every page. Without an explicit
/// `order_by` the rows are ordered by all selected columns; rows equal on
/// every column are indistinguishable, so that order is stable.
pub fn page_query(table: &str, order_by: Option<&str>) -> Result<String, LoadError> {
    check_identifier("table", table)?;
    let columns = RECORD_COLUMNS
        .iter()
        .map(|c| format!("CAST({col} AS TEXT) AS {col}", col = quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");

    let order = match order_by {
        Some(col) => {
            check_identifier("order_by", col)?;
            quote_ident(col)
        }
        None => {
            tracing::debug!(table, "no order_by configured, ordering pages by every column");
            RECORD_COLUMNS
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ")
        }
    };

    Ok(format!(
        "SELECT {columns} FROM {} ORDER BY {order} OFFSET $1 LIMIT $2",
        quote_ident(table)
    ))
}

/// Double-quote each dot-separated part of an already validated identifier.
fn quote_ident(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("\"{part}\""))
        .collect::<Vec<_>>()
        .join(".")
}
