use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DESIGNATIONS: [&str; 4] = ["CEO", "Founder", "Manager", "PhD"];
pub const DEFAULT_SUFFIXES: [&str; 4] = ["Jr", "Sr", "II", "III"];

/// Closed sets of known titles and name suffixes. Membership is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default = "default_designations")]
    pub designations: BTreeSet<String>,
    #[serde(default = "default_suffixes")]
    pub suffixes: BTreeSet<String>,
}

fn default_designations() -> BTreeSet<String> {
    DEFAULT_DESIGNATIONS.iter().map(|s| s.to_string()).collect()
}

fn default_suffixes() -> BTreeSet<String> {
    DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            designations: default_designations(),
            suffixes: default_suffixes(),
        }
    }
}

impl Vocabulary {
    pub fn new<D, S>(designations: D, suffixes: S) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            designations: designations.into_iter().map(Into::into).collect(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_designation(&self, token: &str) -> bool {
        self.designations.contains(token)
    }

    pub fn is_suffix(&self, token: &str) -> bool {
        self.suffixes.contains(token)
    }

    /// Member of either set.
    pub fn is_title(&self, token: &str) -> bool {
        self.is_designation(token) || self.is_suffix(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let v = Vocabulary::default();
        assert!(v.is_designation("CEO"));
        assert!(v.is_suffix("III"));
        assert!(v.is_title("PhD"));
        assert!(!v.is_title("Dr"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let v = Vocabulary::default();
        assert!(!v.is_designation("ceo"));
        assert!(!v.is_suffix("JR"));
    }

    #[test]
    fn custom_sets() {
        let v = Vocabulary::new(["CTO"], ["Esq"]);
        assert!(v.is_designation("CTO"));
        assert!(!v.is_designation("CEO"));
        assert!(v.is_suffix("Esq"));
    }
}
