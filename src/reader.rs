//! Preamble removal and positional record access for DKB exports.
//!
//! Every DKB export starts with a few lines of account metadata before the
//! actual column header. The amount of metadata varies per layout and per
//! export (some files carry a date-range line, some a balance line), so the
//! transaction region is found by looking for the column header itself.

use csv::ReaderBuilder;

use crate::error::{ConvertError, Result};

/// Cuts the metadata preamble off a decoded export and returns the region
/// strictly after the column header line.
///
/// The header is the first line containing both "Betrag" and
/// "Wertstellung"; these two appear in the column headers of all known
/// layouts and in none of the preamble lines.
pub fn find_transaction_lines(content: &str) -> Result<&str> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        offset += line.len();
        if line.contains("Betrag") && line.contains("Wertstellung") {
            return Ok(&content[offset..]);
        }
    }
    Err(ConvertError::NoHeaderLine)
}

/// One data row, bound to a layout's column names for access by name.
#[derive(Debug)]
pub struct SourceRecord {
    row: usize,
    names: &'static [&'static str],
    values: csv::StringRecord,
}

impl SourceRecord {
    /// 1-based position of this row within the transaction region.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Field value by column name. Rows too short for the requested
    /// column fail here, not at parse time.
    pub fn field(&self, name: &'static str) -> Result<&str> {
        self.names
            .iter()
            .position(|n| *n == name)
            .and_then(|index| self.values.get(index))
            .ok_or(ConvertError::MissingField {
                row: self.row,
                field: name,
            })
    }
}

/// Lazily yields the rows of a transaction region in the DKB dialect
/// (`;` delimiter, `"` quotes). Row shape is not validated here; short
/// rows surface as errors on field access.
pub fn source_records<'a>(
    region: &'a str,
    names: &'static [&'static str],
) -> impl Iterator<Item = Result<SourceRecord>> + 'a {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(region.as_bytes())
        .into_records()
        .enumerate()
        .map(move |(i, record)| {
            let values = record?;
            Ok(SourceRecord {
                row: i + 1,
                names,
                values,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &["datum", "text", "betrag"];

    #[test]
    fn test_find_transaction_lines_cuts_preamble() {
        let content = "\"Kontonummer:\";\"123 / Girokonto\"\n\
                       \n\
                       \"Buchungstag\";\"Wertstellung\";\"Betrag (EUR)\"\n\
                       \"01.02.2020\";\"01.02.2020\";\"-10,00\"\n\
                       \"02.02.2020\";\"03.02.2020\";\"25,00\"\n";
        let region = find_transaction_lines(content).unwrap();
        assert_eq!(region.lines().count(), 2);
        assert!(region.starts_with("\"01.02.2020\""));
    }

    #[test]
    fn test_find_transaction_lines_header_is_last_line() {
        let content = "preamble\n\"Wertstellung\";\"Betrag\"";
        assert_eq!(find_transaction_lines(content).unwrap(), "");
    }

    #[test]
    fn test_find_transaction_lines_ignores_single_marker_lines() {
        let content = "\"Betrag am Monatsende\";\"100\"\n\
                       \"Wertstellung folgt\"\n\
                       \"Wertstellung\";\"Betrag\"\n\
                       data\n";
        assert_eq!(find_transaction_lines(content).unwrap(), "data\n");
    }

    #[test]
    fn test_find_transaction_lines_without_header() {
        let err = find_transaction_lines("just\nsome\nlines\n").unwrap_err();
        assert!(matches!(err, ConvertError::NoHeaderLine));
        assert!(find_transaction_lines("").is_err());
    }

    #[test]
    fn test_source_records_bind_names() {
        let region = "\"01.02.2020\";\"Miete\";\"-500,00\"\n";
        let records: Vec<_> = source_records(region, NAMES).collect();
        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.row(), 1);
        assert_eq!(record.field("datum").unwrap(), "01.02.2020");
        assert_eq!(record.field("betrag").unwrap(), "-500,00");
    }

    #[test]
    fn test_source_records_row_numbers_increment() {
        let region = "a;b;c\nd;e;f\n";
        let rows: Vec<_> = source_records(region, NAMES)
            .map(|r| r.unwrap().row())
            .collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_short_row_fails_on_field_access() {
        let region = "\"01.02.2020\";\"Miete\"\n";
        let records: Vec<_> = source_records(region, NAMES).collect();
        let record = records[0].as_ref().unwrap();
        assert!(record.field("text").is_ok());
        let err = record.field("betrag").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingField { row: 1, field: "betrag" }
        ));
    }

    #[test]
    fn test_quoted_delimiter_stays_in_field() {
        let region = "\"01.02.2020\";\"Essen; Trinken\";\"-20,00\"\n";
        let records: Vec<_> = source_records(region, NAMES).collect();
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.field("text").unwrap(), "Essen; Trinken");
    }

    #[test]
    fn test_empty_region_yields_nothing() {
        assert_eq!(source_records("", NAMES).count(), 0);
    }
}
