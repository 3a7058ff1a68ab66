//! Per-layout row projection and the conversion pipeline.

use std::fs::File;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::encoding::decode_file;
use crate::error::{ConvertError, Result};
use crate::format::CsvFormat;
use crate::homebank::{
    homebank_writer, HomebankRow, PAYMODE_CREDIT_CARD, PAYMODE_ELECTRONIC_PAYMENT,
};
use crate::reader::{find_transaction_lines, source_records, SourceRecord};

/// Converts one DKB export into one HomeBank import file and returns the
/// number of rows written.
///
/// The whole file is decoded with the layout's encoding, the metadata
/// preamble is cut off, and every remaining row is projected and written.
/// Any row that cannot be projected aborts the conversion; a partially
/// written output file is left as-is.
pub fn convert(format: CsvFormat, input: &Path, output: &Path) -> Result<usize> {
    let spec = format.spec().ok_or(ConvertError::UnknownFormat)?;
    let content = decode_file(input, spec.encoding)?;
    let region = find_transaction_lines(&content)?;

    let mut writer = homebank_writer(File::create(output)?);
    let mut count = 0;
    for record in source_records(region, spec.field_names) {
        let row = (spec.project)(&record?)?;
        writer.serialize(&row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub(crate) fn project_cash(record: &SourceRecord) -> Result<HomebankRow> {
    Ok(HomebankRow::new(
        homebank_date(record, "buchungstag", "%d.%m.%Y")?,
        PAYMODE_ELECTRONIC_PAYMENT,
        record.field("beguenstigter")?.to_string(),
        record.field("verwendungszweck")?.to_string(),
        record.field("betrag")?.to_string(),
    ))
}

pub(crate) fn project_old_visa(record: &SourceRecord) -> Result<HomebankRow> {
    Ok(HomebankRow::new(
        homebank_date(record, "wertstellung", "%d.%m.%Y")?,
        PAYMODE_CREDIT_CARD,
        String::new(),
        record.field("beschreibung")?.to_string(),
        record.field("betrag")?.to_string(),
    ))
}

pub(crate) fn project_new_visa(record: &SourceRecord) -> Result<HomebankRow> {
    Ok(HomebankRow::new(
        homebank_date(record, "wertstellung", "%d.%m.%y")?,
        PAYMODE_CREDIT_CARD,
        String::new(),
        record.field("beschreibung")?.to_string(),
        strip_currency(record.field("betrag")?),
    ))
}

pub(crate) fn project_giro(record: &SourceRecord) -> Result<HomebankRow> {
    let payee = format!(
        "{} {}",
        record.field("zahlungsempfänger*in")?,
        record.field("IBAN")?
    );
    Ok(HomebankRow::new(
        homebank_date(record, "buchungsdatum", "%d.%m.%y")?,
        PAYMODE_ELECTRONIC_PAYMENT,
        payee,
        record.field("verwendungszweck")?.to_string(),
        strip_currency(record.field("betrag")?),
    ))
}

/// Reads a date field and rewrites it as dd-mm-YYYY for HomeBank.
/// Two-digit years land in the 1969..=2068 window.
fn homebank_date(record: &SourceRecord, field: &'static str, format: &str) -> Result<String> {
    let value = record.field(field)?.trim();
    let date =
        NaiveDate::parse_from_str(value, format).map_err(|source| ConvertError::BadDate {
            row: record.row(),
            value: value.to_string(),
            source,
        })?;
    let date = if format.ends_with("%y") {
        posix_century(date)
    } else {
        date
    };
    Ok(date.format("%d-%m-%Y").to_string())
}

/// chrono resolves `%y` into 1970..=2069; DKB two-digit years follow the
/// POSIX window (00..=68 are 20xx, 69..=99 are 19xx), so 69 means 1969.
/// 2069 is not a leap year and every date in it exists in 1969 too.
fn posix_century(date: NaiveDate) -> NaiveDate {
    if date.year() == 2069 {
        date.with_year(1969).unwrap_or(date)
    } else {
        date
    }
}

/// Removes the Euro sign the 2023 portal puts into amount columns and
/// trims the leftover whitespace. Digits and separators stay untouched.
fn strip_currency(amount: &str) -> String {
    amount.replace('€', "").trim().to_string()
}
