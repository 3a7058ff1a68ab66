//! The known DKB export layouts and first-line format detection.

use std::fmt;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8_INIT, WINDOWS_1252_INIT};

use crate::convert::{project_cash, project_giro, project_new_visa, project_old_visa};
use crate::encoding::decode_first_line;
use crate::error::Result;
use crate::homebank::HomebankRow;
use crate::reader::SourceRecord;

/// The CSV layouts DKB has exported over the years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvFormat {
    /// Cash account reports from the pre-2023 web portal (ISO-8859-1).
    Cash,
    /// Visa account reports from the pre-2023 web portal (ISO-8859-1).
    OldVisa,
    /// Giro and Tagesgeld reports from the 2023 web portal (UTF-8, BOM).
    Giro,
    /// Visa reports from the 2023 web portal (UTF-8, BOM).
    NewVisa,
    /// Auto-detection failed.
    Unknown,
}

/// Projection of one source row into the HomeBank schema.
pub type ProjectFn = fn(&SourceRecord) -> Result<HomebankRow>;

/// Everything the pipeline needs to know about one layout.
pub struct FormatSpec {
    pub format: CsvFormat,
    /// Literal prefix of the first file line, CSV quotes included.
    pub signature: &'static str,
    /// Positional column names of one data row.
    pub field_names: &'static [&'static str],
    /// Encoding DKB writes this layout in. ISO-8859-1 files are decoded
    /// with the windows-1252 superset.
    pub encoding: &'static Encoding,
    /// Output file name when the caller does not pick one.
    pub default_output: &'static str,
    pub project: ProjectFn,
}

/// Layout table. Detection tries the signatures in this order and the
/// first match wins; no signature is a prefix of another.
pub static FORMATS: [FormatSpec; 4] = [
    FormatSpec {
        format: CsvFormat::OldVisa,
        signature: "\"Kreditkarte:\"",
        field_names: &[
            "abgerechnet",
            "wertstellung",
            "belegdatum",
            "beschreibung",
            "betrag",
            "urspruenglicherBetrag",
        ],
        encoding: &WINDOWS_1252_INIT,
        default_output: "visaHomebank.csv",
        project: project_old_visa,
    },
    FormatSpec {
        format: CsvFormat::Cash,
        signature: "\"Kontonummer:\"",
        field_names: &[
            "buchungstag",
            "wertstellung",
            "buchungstext",
            "beguenstigter",
            "verwendungszweck",
            "kontonummer",
            "blz",
            "betrag",
            "glaeubigerID",
            "mandatsreferenz",
            "kundenreferenz",
        ],
        encoding: &WINDOWS_1252_INIT,
        default_output: "cashHomebank.csv",
        project: project_cash,
    },
    FormatSpec {
        format: CsvFormat::Giro,
        signature: "\"Girokonto\"",
        field_names: &[
            "buchungsdatum",
            "wertstellung",
            "status",
            "zahlungspflichtige*r",
            "zahlungsempfänger*in",
            "verwendungszweck",
            "umsatztyp",
            "IBAN",
            "betrag",
            "gläubiger-id",
            "mandatsreferenz",
            "kundenreferenz",
        ],
        encoding: &UTF_8_INIT,
        default_output: "giroHomebank.csv",
        project: project_giro,
    },
    FormatSpec {
        format: CsvFormat::NewVisa,
        signature: "\"Karte\"",
        field_names: &[
            "belegdatum",
            "wertstellung",
            "status",
            "beschreibung",
            "umsatztyp",
            "betrag",
            "fremdwaehrungsbetrag",
        ],
        encoding: &UTF_8_INIT,
        default_output: "visaHomebank.csv",
        project: project_new_visa,
    },
];

impl CsvFormat {
    /// Detects the layout from the first line of `path`. An unrecognized
    /// first line is [`CsvFormat::Unknown`], not an error.
    pub fn detect(path: &Path) -> Result<CsvFormat> {
        let first_line = decode_first_line(path)?;
        for spec in &FORMATS {
            if first_line.starts_with(spec.signature) {
                return Ok(spec.format);
            }
        }
        Ok(CsvFormat::Unknown)
    }

    /// The layout table entry, `None` for [`CsvFormat::Unknown`].
    pub fn spec(self) -> Option<&'static FormatSpec> {
        FORMATS.iter().find(|spec| spec.format == self)
    }
}

impl fmt::Display for CsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CsvFormat::Cash => "cash",
            CsvFormat::OldVisa => "old visa",
            CsvFormat::Giro => "giro",
            CsvFormat::NewVisa => "new visa",
            CsvFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
