use std::collections::{BTreeMap, HashSet};
use std::thread;
use std::time::Instant;

use crate::catalog::{CheckId, CheckKind};
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::model::{AuditMeta, AuditResult, AuditSummary, CheckResult, CheckRows, Record};
use crate::validators::{flag_records, person_key};
use crate::vocabulary::Vocabulary;

/// Run the configured checks over a fully loaded record set.
pub fn run(config: &AuditConfig, records: &[Record]) -> Result<AuditResult, AuditError> {
    let checks = config.selected_checks()?;
    let results = run_checks(&checks, &config.vocabulary, records);
    let summary = compute_summary(records.len(), &results);

    tracing::info!(
        records = summary.records,
        checks = results.len(),
        flagged = summary.total_flagged,
        "audit finished"
    );

    Ok(AuditResult {
        meta: AuditMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        checks: results,
    })
}

/// Evaluate each check on its own scoped thread against the same records.
/// Results come back in the order of `checks`, whatever order the threads
/// finish in.
pub fn run_checks(checks: &[CheckId], vocab: &Vocabulary, records: &[Record]) -> Vec<CheckResult> {
    thread::scope(|scope| {
        let handles: Vec<_> = checks
            .iter()
            .map(|&id| scope.spawn(move || run_check(id, vocab, records)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

/// Evaluate a single check.
pub fn run_check(id: CheckId, vocab: &Vocabulary, records: &[Record]) -> CheckResult {
    let start = Instant::now();

    let rows = match id.kind() {
        CheckKind::Group(detect) => CheckRows::Groups(detect(records)),
        CheckKind::Record(rule) => CheckRows::Records(flag_records(records, vocab, rule)),
    };

    tracing::debug!(
        check = %id,
        rows = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "check finished"
    );

    CheckResult {
        id,
        label: id.label().to_string(),
        description: id.description().to_string(),
        columns: id.columns().into_iter().map(String::from).collect(),
        rows,
    }
}

pub fn compute_summary(records: usize, results: &[CheckResult]) -> AuditSummary {
    let mut check_counts = BTreeMap::new();
    let mut flagged: HashSet<&str> = HashSet::new();

    for result in results {
        check_counts.insert(result.id.to_string(), result.rows.len());
        if let CheckRows::Records(rows) = &result.rows {
            flagged.extend(rows.iter().map(|r| person_key(r.personal_linkedin_url.as_deref())));
        }
    }

    AuditSummary {
        records,
        total_flagged: flagged.len(),
        check_counts,
    }
}
