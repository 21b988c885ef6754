use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::CheckId;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One person entry: the raw name, its parsed fields and the company identity
/// fields. Every value is kept exactly as loaded; blank handling happens in
/// the predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub personal_linkedin_url: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub suffix: Option<String>,
    pub company_linkedin_url: Option<String>,
    pub company_website: Option<String>,
    pub forage_company_id: Option<String>,
}

/// Column names in load order.
pub const RECORD_COLUMNS: [&str; 10] = [
    "company_linkedin_url",
    "forage_company_id",
    "company_website",
    "personal_linkedin_url",
    "name",
    "first_name",
    "middle_name",
    "last_name",
    "designation",
    "suffix",
];

impl Record {
    /// Set a field by its column name. Returns false for unknown columns.
    pub fn set(&mut self, column: &str, value: Option<String>) -> bool {
        let slot = match column {
            "personal_linkedin_url" => &mut self.personal_linkedin_url,
            "name" => &mut self.name,
            "first_name" => &mut self.first_name,
            "middle_name" => &mut self.middle_name,
            "last_name" => &mut self.last_name,
            "designation" => &mut self.designation,
            "suffix" => &mut self.suffix,
            "company_linkedin_url" => &mut self.company_linkedin_url,
            "company_website" => &mut self.company_website,
            "forage_company_id" => &mut self.forage_company_id,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn parsed(&self, field: ParsedField) -> Option<&str> {
        match field {
            ParsedField::FirstName => self.first_name.as_deref(),
            ParsedField::MiddleName => self.middle_name.as_deref(),
            ParsedField::LastName => self.last_name.as_deref(),
            ParsedField::Designation => self.designation.as_deref(),
            ParsedField::Suffix => self.suffix.as_deref(),
        }
    }
}

/// The five outputs of the upstream name parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedField {
    FirstName,
    MiddleName,
    LastName,
    Designation,
    Suffix,
}

impl ParsedField {
    pub const ALL: [ParsedField; 5] = [
        Self::FirstName,
        Self::MiddleName,
        Self::LastName,
        Self::Designation,
        Self::Suffix,
    ];

    /// The person-name parts (no titles).
    pub const NAME_PARTS: [ParsedField; 3] = [Self::FirstName, Self::MiddleName, Self::LastName];
}

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

/// A company key mapped to more than one distinct company identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroupRow {
    pub key: String,
    /// Distinct identifiers in first-seen order, joined with `", "`.
    pub forage_company_ids: String,
}

impl DuplicateGroupRow {
    pub fn cells(&self) -> Vec<&str> {
        vec![self.key.as_str(), self.forage_company_ids.as_str()]
    }
}

/// The report columns of a flagged record, with original values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedRecord {
    pub personal_linkedin_url: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub suffix: Option<String>,
}

impl FlaggedRecord {
    pub fn cells(&self) -> Vec<&str> {
        [
            &self.personal_linkedin_url,
            &self.name,
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            &self.designation,
            &self.suffix,
        ]
        .into_iter()
        .map(|v| v.as_deref().unwrap_or(""))
        .collect()
    }
}

impl From<&Record> for FlaggedRecord {
    fn from(r: &Record) -> Self {
        Self {
            personal_linkedin_url: r.personal_linkedin_url.clone(),
            name: r.name.clone(),
            first_name: r.first_name.clone(),
            middle_name: r.middle_name.clone(),
            last_name: r.last_name.clone(),
            designation: r.designation.clone(),
            suffix: r.suffix.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum CheckRows {
    Groups(Vec<DuplicateGroupRow>),
    Records(Vec<FlaggedRecord>),
}

impl CheckRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Groups(rows) => rows.len(),
            Self::Records(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row cells in column order, blanks for absent values.
    pub fn cell_rows(&self) -> Vec<Vec<&str>> {
        match self {
            Self::Groups(rows) => rows.iter().map(DuplicateGroupRow::cells).collect(),
            Self::Records(rows) => rows.iter().map(FlaggedRecord::cells).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One check's result set, ready for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: CheckId,
    pub label: String,
    pub description: String,
    pub columns: Vec<String>,
    pub rows: CheckRows,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub records: usize,
    /// Distinct people flagged by at least one record check.
    pub total_flagged: usize,
    pub check_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub meta: AuditMeta,
    pub summary: AuditSummary,
    pub checks: Vec<CheckResult>,
}

impl AuditResult {
    pub fn check(&self, id: CheckId) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// Number of rows across all result sets.
    pub fn total_rows(&self) -> usize {
        self.checks.iter().map(|c| c.rows.len()).sum()
    }
}
