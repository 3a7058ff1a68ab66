//! The HomeBank import schema and its CSV dialect.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

/// HomeBank paymode code for electronic payments.
pub const PAYMODE_ELECTRONIC_PAYMENT: u8 = 8;

/// HomeBank paymode code for credit card transactions.
pub const PAYMODE_CREDIT_CARD: u8 = 1;

/// One row of the HomeBank import CSV. Declaration order is column order:
/// date, paymode, info, payee, memo, amount, category, tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomebankRow {
    pub date: String,
    pub paymode: u8,
    pub info: String,
    pub payee: String,
    pub memo: String,
    pub amount: String,
    pub category: String,
    pub tags: String,
}

impl HomebankRow {
    /// Row with the always-empty columns (info, category, tags) blanked.
    pub fn new(date: String, paymode: u8, payee: String, memo: String, amount: String) -> Self {
        Self {
            date,
            paymode,
            info: String::new(),
            payee,
            memo,
            amount,
            category: String::new(),
            tags: String::new(),
        }
    }
}

/// CSV writer for the HomeBank dialect: `;` delimiter, minimal quoting,
/// no header row, UTF-8 without BOM.
pub fn homebank_writer<W: Write>(w: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(rows: &[HomebankRow]) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = homebank_writer(&mut buf);
            for row in rows {
                writer.serialize(row).unwrap();
            }
            writer.flush().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_column_order_and_delimiter() {
        let row = HomebankRow::new(
            "01-02-2023".to_string(),
            PAYMODE_ELECTRONIC_PAYMENT,
            "REWE Markt".to_string(),
            "Einkauf".to_string(),
            "-12,34".to_string(),
        );
        assert_eq!(write_to_string(&[row]), "01-02-2023;8;;REWE Markt;Einkauf;-12,34;;\n");
    }

    #[test]
    fn test_no_header_row() {
        let rows = vec![
            HomebankRow::new("01-01-2020".to_string(), 1, String::new(), "a".to_string(), "1".to_string()),
            HomebankRow::new("02-01-2020".to_string(), 1, String::new(), "b".to_string(), "2".to_string()),
        ];
        let out = write_to_string(&rows);
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("01-01-2020"));
    }

    #[test]
    fn test_quotes_only_when_needed() {
        let row = HomebankRow::new(
            "09-09-2021".to_string(),
            PAYMODE_CREDIT_CARD,
            String::new(),
            "Hotel; Stadt".to_string(),
            "-99,00".to_string(),
        );
        assert_eq!(write_to_string(&[row]), "09-09-2021;1;;;\"Hotel; Stadt\";-99,00;;\n");
    }
}
