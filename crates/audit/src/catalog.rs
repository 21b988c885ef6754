//! The eight checks in report order, with their sheet labels and the
//! descriptions shown next to each result set.

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::mapping::{self, GroupRule};
use crate::validators::{self, RecordRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    CompanyUrlDups,
    CompanyWebDups,
    LowParseCount,
    AllParseMissing,
    ValuesNotInName,
    MisplacedTitles,
    NicknameIssues,
    NameSwapped,
}

#[derive(Debug, Clone, Copy)]
pub enum CheckKind {
    /// Company key grouped over the whole record set.
    Group(GroupRule),
    /// Per-record predicate.
    Record(RecordRule),
}

/// Columns of the record checks' result rows.
pub const RECORD_RESULT_COLUMNS: [&str; 7] = [
    "personal_linkedin_url",
    "name",
    "first_name",
    "middle_name",
    "last_name",
    "designation",
    "suffix",
];

impl CheckId {
    pub fn all() -> [CheckId; 8] {
        [
            Self::CompanyUrlDups,
            Self::CompanyWebDups,
            Self::LowParseCount,
            Self::AllParseMissing,
            Self::ValuesNotInName,
            Self::MisplacedTitles,
            Self::NicknameIssues,
            Self::NameSwapped,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyUrlDups => "company_url_dups",
            Self::CompanyWebDups => "company_web_dups",
            Self::LowParseCount => "low_parse_count",
            Self::AllParseMissing => "all_parse_missing",
            Self::ValuesNotInName => "values_not_in_name",
            Self::MisplacedTitles => "misplaced_titles",
            Self::NicknameIssues => "nickname_issues",
            Self::NameSwapped => "name_swapped",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AuditError> {
        Self::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AuditError::UnknownCheck(s.to_string()))
    }

    /// Worksheet label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyUrlDups => "Task 1 (CompanyLiUrl_Dups)",
            Self::CompanyWebDups => "Task 2 (CompanyWeb_Dups)",
            Self::LowParseCount => "Task 3 (Low Parse Count)",
            Self::AllParseMissing => "Task 4 (All Parse Missing)",
            Self::ValuesNotInName => "Task 5 (Values Not in Name)",
            Self::MisplacedTitles => "Task 6 (Misplaced Titles)",
            Self::NicknameIssues => "Task 7 (Nickname Issues)",
            Self::NameSwapped => "Task 8 (Name Swapped)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CompanyUrlDups => {
                "Task 1: Shows company_linkedin_url values that are mapped to multiple forage_company_id values. \
                 Helps identify duplicate or inconsistent company LinkedIn URL mappings."
            }
            Self::CompanyWebDups => {
                "Task 2: Shows cleaned company_website values that are mapped to multiple forage_company_id values. \
                 Helps identify duplicate or inconsistent company website mappings."
            }
            Self::LowParseCount => {
                "Task 3: Rows where the name has more than one word, but fewer than two of the parsed fields \
                 (first, middle, last, designation, suffix) are filled. Indicates poor name parsing."
            }
            Self::AllParseMissing => {
                "Task 4: Rows where the name is present but all five parsed fields \
                 (first, middle, last, designation, suffix) are empty. Indicates failed name parsing."
            }
            Self::ValuesNotInName => {
                "Task 5: Rows where any parsed value (first, middle, last, designation, suffix) is not present \
                 in the name string. Indicates possible parsing errors."
            }
            Self::MisplacedTitles => {
                "Task 6: Rows where designation or suffix values are found in the wrong columns \
                 (e.g., in first/middle/last name). Indicates misplaced titles."
            }
            Self::NicknameIssues => {
                "Task 7: Rows where a nickname (in parentheses, quotes, etc.) appears in a parsed field \
                 where it shouldn't. Indicates nickname parsing issues."
            }
            Self::NameSwapped => {
                "Task 8: Rows where first and last names are swapped compared to the order in the name field. \
                 Indicates swapped name parsing."
            }
        }
    }

    pub fn kind(&self) -> CheckKind {
        match self {
            Self::CompanyUrlDups => CheckKind::Group(mapping::detect_url_mapping),
            Self::CompanyWebDups => CheckKind::Group(mapping::detect_website_mapping),
            Self::LowParseCount => CheckKind::Record(validators::low_parse_count),
            Self::AllParseMissing => CheckKind::Record(validators::all_parse_missing),
            Self::ValuesNotInName => CheckKind::Record(validators::values_not_in_name),
            Self::MisplacedTitles => CheckKind::Record(validators::misplaced_titles),
            Self::NicknameIssues => CheckKind::Record(validators::nickname_issues),
            Self::NameSwapped => CheckKind::Record(validators::name_swapped),
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Self::CompanyUrlDups => vec!["company_linkedin_url", "forage_company_ids"],
            Self::CompanyWebDups => vec!["cleaned_company_website", "forage_company_ids"],
            _ => RECORD_RESULT_COLUMNS.to_vec(),
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
