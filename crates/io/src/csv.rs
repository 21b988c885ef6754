// CSV dataset loading

use std::path::Path;

use nameqa_audit::model::{Record, RECORD_COLUMNS};

use crate::error::LoadError;

/// Load every record from a CSV file with a header row, in file order.
pub fn load(path: &Path) -> Result<Vec<Record>, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = header_delimiter(&content);
    let records = load_from_str(&content, delimiter)?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded CSV dataset");
    Ok(records)
}

/// Parse records from CSV text. Columns are located by header name; extra
/// columns are ignored and empty cells load as absent.
pub fn load_from_str(content: &str, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let columns = RECORD_COLUMNS
        .iter()
        .map(|&name| {
            headers
                .iter()
                .position(|h| h == name)
                .map(|idx| (name, idx))
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::default();
        for &(name, idx) in &columns {
            let value = row.get(idx).filter(|v| !v.is_empty()).map(str::to_string);
            record.set(name, value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Candidate field delimiters, in tie-break order.
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Pick the delimiter by the header row alone: the candidate that splits it
/// into the most known column names wins, comma on a tie or no match.
fn header_delimiter(content: &str) -> u8 {
    let header = content
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .unwrap_or_default();

    let known = |delim: u8| {
        header
            .split(char::from(delim))
            .map(|h| h.trim().trim_matches('"'))
            .filter(|h| RECORD_COLUMNS.contains(h))
            .count()
    };

    DELIMITERS
        .iter()
        .copied()
        .fold((b',', 0), |best, delim| {
            let hits = known(delim);
            if hits > best.1 {
                (delim, hits)
            } else {
                best
            }
        })
        .0
}

/// Read a file as text. A UTF-8 or UTF-16 byte order mark decides the
/// encoding; otherwise UTF-8 is tried and Windows-1252 (Excel's usual CSV
/// export encoding) is the fallback.
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode(&bytes))
}

fn decode(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "company_linkedin_url,forage_company_id,company_website,personal_linkedin_url,name,first_name,middle_name,last_name,designation,suffix";

    #[test]
    fn loads_in_file_order() {
        let csv = format!(
            "{HEADER}\n\
             A,1,a.com,u1,John Smith,John,,Smith,,\n\
             A,2,a.com,u2,Smith Jane,Jane,,Smith,CEO,\n"
        );
        let records = load_from_str(&csv, b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].personal_linkedin_url.as_deref(), Some("u1"));
        assert_eq!(records[0].middle_name, None);
        assert_eq!(records[1].designation.as_deref(), Some("CEO"));
        assert_eq!(records[1].forage_company_id.as_deref(), Some("2"));
    }

    #[test]
    fn columns_found_by_name() {
        let csv = "suffix,name,extra,first_name,middle_name,last_name,designation,personal_linkedin_url,forage_company_id,company_website,company_linkedin_url\n\
                   Jr,Bob Lee Jr,x,Bob,,Lee,,u9,7,b.com,B\n";
        let records = load_from_str(csv, b',').unwrap();
        assert_eq!(records[0].suffix.as_deref(), Some("Jr"));
        assert_eq!(records[0].company_linkedin_url.as_deref(), Some("B"));
    }

    #[test]
    fn whitespace_cells_are_kept() {
        let csv = format!("{HEADER}\nA,1,a.com,u1,Ann Lee,  ,,Lee,,\n");
        let records = load_from_str(&csv, b',').unwrap();
        assert_eq!(records[0].first_name.as_deref(), Some("  "));
    }

    #[test]
    fn short_rows_load_as_absent() {
        let csv = format!("{HEADER}\nA,1,a.com,u1,Ann Lee\n");
        let records = load_from_str(&csv, b',').unwrap();
        assert_eq!(records[0].name.as_deref(), Some("Ann Lee"));
        assert_eq!(records[0].suffix, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = load_from_str("name,first_name\nA,B\n", b',').unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "company_linkedin_url"));
    }

    #[test]
    fn semicolon_file_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        let body = format!("\u{feff}{}\nA;1;a.com;u1;Ann Lee;Ann;;Lee;;\n", HEADER.replace(',', ";"));
        fs::write(&path, body).unwrap();

        let records = load(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_linkedin_url.as_deref(), Some("A"));
        assert_eq!(records[0].last_name.as_deref(), Some("Lee"));
    }

    #[test]
    fn windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        let mut bytes = format!("{HEADER}\nA,1,a.com,u1,Ren").into_bytes();
        bytes.push(0xE9); // é in Windows-1252
        bytes.extend_from_slice(b" Roy,Ren\xE9,,Roy,,\n");
        fs::write(&path, bytes).unwrap();

        let records = load(&path).unwrap();
        assert_eq!(records[0].name.as_deref(), Some("René Roy"));
        assert_eq!(records[0].first_name.as_deref(), Some("René"));
    }

    #[test]
    fn delimiter_from_header_names() {
        assert_eq!(header_delimiter(&HEADER.replace(',', "\t")), b'\t');
        assert_eq!(header_delimiter(&HEADER.replace(',', "|")), b'|');
        // semicolons inside a comma header do not win
        let header = format!("{HEADER},\"notes; misc\"");
        assert_eq!(header_delimiter(&header), b',');
        assert_eq!(header_delimiter("a;b;c"), b',');
        assert_eq!(header_delimiter(""), b',');
    }

    #[test]
    fn utf16_file_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("utf16.csv");
        let text = format!("{HEADER}\nA,1,a.com,u1,Zoë Roy,Zoë,,Roy,,\n");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        let records = load(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name.as_deref(), Some("Zoë"));
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/nonexistent/people.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/people.csv"));
    }
}
