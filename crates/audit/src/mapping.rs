//! Duplicate mapping detection: company keys mapped to more than one
//! distinct `forage_company_id`.

use std::collections::{HashMap, HashSet};

use crate::model::{DuplicateGroupRow, Record};
use crate::text::{field_text, is_blank, normalize_website};

/// Signature shared by the group detectors.
pub type GroupRule = fn(&[Record]) -> Vec<DuplicateGroupRow>;

/// Grouping key used for a blank company LinkedIn URL.
pub const BLANK_URL_KEY: &str = "None";

/// Group by exact `company_linkedin_url`. Blank URLs form their own group.
pub fn detect_url_mapping(records: &[Record]) -> Vec<DuplicateGroupRow> {
    group_distinct_ids(records.iter().map(|r| {
        let url = r.company_linkedin_url.as_deref();
        let key = if is_blank(url) {
            BLANK_URL_KEY.to_string()
        } else {
            url.unwrap_or_default().to_string()
        };
        (key, r.forage_company_id.as_deref())
    }))
}

/// Group by normalized `company_website`. Normalization happens before
/// grouping, so differently-cased or slashed spellings merge.
pub fn detect_website_mapping(records: &[Record]) -> Vec<DuplicateGroupRow> {
    group_distinct_ids(records.iter().map(|r| {
        (
            normalize_website(r.company_website.as_deref()),
            r.forage_company_id.as_deref(),
        )
    }))
}

/// Collect distinct ids per key (first-seen order for both keys and ids) and
/// keep only keys with more than one id. Blank ids are not counted.
fn group_distinct_ids<'a, I>(pairs: I) -> Vec<DuplicateGroupRow>
where
    I: Iterator<Item = (String, Option<&'a str>)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    // ordered ids plus a membership set, so large groups stay linear
    let mut groups: Vec<(String, Vec<&'a str>, HashSet<&'a str>)> = Vec::new();

    for (key, id) in pairs {
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, Vec::new(), HashSet::new()));
                groups.len() - 1
            }
        };

        let id = field_text(id);
        if id.is_empty() {
            continue;
        }
        let (_, ids, seen) = &mut groups[slot];
        if seen.insert(id) {
            ids.push(id);
        }
    }

    groups
        .into_iter()
        .filter(|(_, ids, _)| ids.len() > 1)
        .map(|(key, ids, _)| DuplicateGroupRow {
            key,
            forage_company_ids: ids.join(", "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(url: Option<&str>, website: Option<&str>, id: Option<&str>) -> Record {
        Record {
            company_linkedin_url: url.map(Into::into),
            company_website: website.map(Into::into),
            forage_company_id: id.map(Into::into),
            ..Record::default()
        }
    }

    #[test]
    fn url_with_two_ids_flagged() {
        let records = vec![
            company(Some("A"), None, Some("1")),
            company(Some("A"), None, Some("2")),
        ];
        let rows = detect_url_mapping(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "A");
        assert_eq!(rows[0].forage_company_ids, "1, 2");
    }

    #[test]
    fn same_id_repeated_not_flagged() {
        let records = vec![
            company(Some("A"), None, Some("7")),
            company(Some("A"), None, Some("7")),
            company(Some("A"), None, Some("7")),
        ];
        assert!(detect_url_mapping(&records).is_empty());
    }

    #[test]
    fn ids_in_first_seen_order() {
        let records = vec![
            company(Some("A"), None, Some("9")),
            company(Some("A"), None, Some("3")),
            company(Some("A"), None, Some("9")),
            company(Some("A"), None, Some("5")),
        ];
        assert_eq!(detect_url_mapping(&records)[0].forage_company_ids, "9, 3, 5");
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let records = vec![
            company(Some("z"), None, Some("1")),
            company(Some("a"), None, Some("1")),
            company(Some("z"), None, Some("2")),
            company(Some("a"), None, Some("2")),
        ];
        let keys: Vec<_> = detect_url_mapping(&records).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn blank_urls_group_together() {
        let records = vec![
            company(None, None, Some("1")),
            company(Some("  "), None, Some("2")),
        ];
        let rows = detect_url_mapping(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, BLANK_URL_KEY);
    }

    #[test]
    fn url_grouping_is_exact() {
        let records = vec![
            company(Some("https://linkedin.com/company/a"), None, Some("1")),
            company(Some("https://linkedin.com/company/A"), None, Some("2")),
        ];
        assert!(detect_url_mapping(&records).is_empty());
    }

    #[test]
    fn blank_ids_not_counted() {
        let records = vec![
            company(Some("A"), None, Some("1")),
            company(Some("A"), None, None),
            company(Some("A"), None, Some(" ")),
        ];
        assert!(detect_url_mapping(&records).is_empty());
    }

    #[test]
    fn websites_merge_after_normalization() {
        let records = vec![
            company(None, Some("https://www.Example.com/"), Some("1")),
            company(None, Some("example.com"), Some("2")),
        ];
        let rows = detect_website_mapping(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "example.com");
        assert_eq!(rows[0].forage_company_ids, "1, 2");
    }

    #[test]
    fn large_blank_group_keeps_every_id_once() {
        let records: Vec<Record> = (0..60_000)
            .flat_map(|i| {
                let id = i.to_string();
                [
                    company(None, None, Some(id.as_str())),
                    company(None, Some(" "), Some(id.as_str())),
                ]
            })
            .collect();

        let start = std::time::Instant::now();
        let rows = detect_website_mapping(&records);
        assert!(start.elapsed() < std::time::Duration::from_secs(2));

        assert_eq!(rows.len(), 1);
        let ids: Vec<&str> = rows[0].forage_company_ids.split(", ").collect();
        assert_eq!(ids.len(), 60_000);
        assert_eq!(ids[0], "0");
        assert_eq!(ids[59_999], "59999");
    }

    #[test]
    fn blank_websites_group_as_none() {
        let records = vec![
            company(None, None, Some("1")),
            company(None, Some(""), Some("2")),
        ];
        let rows = detect_website_mapping(&records);
        assert_eq!(rows[0].key, "none");
    }
}
