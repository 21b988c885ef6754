//! Field normalization shared by the checks.
//!
//! A value is blank when it is absent or only whitespace; every helper here
//! treats the two the same way.

/// Grouping key used for a blank website.
pub const BLANK_WEBSITE_KEY: &str = "none";

/// Trimmed field text, `""` for absent values.
pub fn field_text(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or("")
}

pub fn is_blank(value: Option<&str>) -> bool {
    field_text(value).is_empty()
}

/// Whitespace-separated tokens of a raw name. Empty for a blank name.
pub fn words(value: Option<&str>) -> Vec<&str> {
    value.map(|v| v.split_whitespace().collect()).unwrap_or_default()
}

/// Normalize a company website into its grouping key.
///
/// Lower-cases, strips a leading `http://` or `https://` (plus an optional
/// `www.` right after it) and a single trailing `/`. Blank values become
/// [`BLANK_WEBSITE_KEY`].
pub fn normalize_website(value: Option<&str>) -> String {
    if is_blank(value) {
        return BLANK_WEBSITE_KEY.to_string();
    }
    let lower = value.unwrap_or_default().to_lowercase();

    let mut rest = lower.as_str();
    if let Some(stripped) = rest
        .strip_prefix("https://")
        .or_else(|| rest.strip_prefix("http://"))
    {
        rest = stripped.strip_prefix("www.").unwrap_or(stripped);
    }
    rest.strip_suffix('/').unwrap_or(rest).to_string()
}
