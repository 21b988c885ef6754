//! Per-record name parse checks.
//!
//! Each check is a pure predicate over one record; `true` means flagged.
//! Blank and absent fields are interchangeable everywhere.

use std::collections::HashSet;

use crate::model::{FlaggedRecord, ParsedField, Record};
use crate::nickname::extract_nicknames;
use crate::text::{field_text, is_blank, words};
use crate::vocabulary::Vocabulary;

/// Signature shared by all record checks.
pub type RecordRule = fn(&Record, &Vocabulary) -> bool;

/// Number of non-blank parsed fields.
pub fn filled_parsed_count(r: &Record) -> usize {
    ParsedField::ALL
        .iter()
        .filter(|f| !is_blank(r.parsed(**f)))
        .count()
}

/// Multi-word name, fewer than two parsed fields filled.
pub fn low_parse_count(r: &Record, _: &Vocabulary) -> bool {
    words(r.name.as_deref()).len() > 1 && filled_parsed_count(r) < 2
}

/// Name present, nothing parsed.
pub fn all_parse_missing(r: &Record, _: &Vocabulary) -> bool {
    !is_blank(r.name.as_deref()) && filled_parsed_count(r) == 0
}

/// A parsed value that does not occur (case-sensitive substring) in the
/// trimmed raw name.
pub fn values_not_in_name(r: &Record, _: &Vocabulary) -> bool {
    let name = field_text(r.name.as_deref());
    ParsedField::ALL.iter().any(|f| {
        let value = field_text(r.parsed(*f));
        !value.is_empty() && !name.contains(value)
    })
}

/// A title or suffix sitting in the wrong column.
pub fn misplaced_titles(r: &Record, vocab: &Vocabulary) -> bool {
    let in_name_part = ParsedField::NAME_PARTS
        .iter()
        .any(|f| vocab.is_title(field_text(r.parsed(*f))));

    in_name_part
        || vocab.is_suffix(field_text(r.designation.as_deref()))
        || vocab.is_designation(field_text(r.suffix.as_deref()))
}

/// A bracketed or quoted nickname from the raw name copied into a parsed
/// field. Titles are exempt.
pub fn nickname_issues(r: &Record, vocab: &Vocabulary) -> bool {
    let Some(name) = r.name.as_deref() else {
        return false;
    };
    let nicknames = extract_nicknames(name);
    if nicknames.is_empty() {
        return false;
    }

    ParsedField::ALL.iter().any(|f| {
        let value = field_text(r.parsed(*f));
        nicknames.contains(value) && !vocab.is_title(value)
    })
}

/// First and last name reversed relative to the raw word order. Only the
/// first and last raw tokens are compared.
pub fn name_swapped(r: &Record, _: &Vocabulary) -> bool {
    if is_blank(r.name.as_deref()) || is_blank(r.first_name.as_deref()) || is_blank(r.last_name.as_deref()) {
        return false;
    }
    let tokens = words(r.name.as_deref());
    match (tokens.first(), tokens.last()) {
        (Some(first_token), Some(last_token)) if tokens.len() >= 2 => {
            field_text(r.first_name.as_deref()) == *last_token
                && field_text(r.last_name.as_deref()) == *first_token
        }
        _ => false,
    }
}

/// Identity of a person for deduplication: the exact
/// `personal_linkedin_url`, with every blank value sharing one key.
pub fn person_key(url: Option<&str>) -> &str {
    if is_blank(url) {
        ""
    } else {
        url.unwrap_or_default()
    }
}

/// Apply a rule to every record, keeping the first match per
/// `personal_linkedin_url` in input order.
pub fn flag_records(records: &[Record], vocab: &Vocabulary, rule: RecordRule) -> Vec<FlaggedRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();
    for r in records {
        if rule(r, vocab) && seen.insert(person_key(r.personal_linkedin_url.as_deref())) {
            rows.push(FlaggedRecord::from(r));
        }
    }
    rows
}
