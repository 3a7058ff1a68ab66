//! dkb2homebank — convert CSV exports from DKB (Deutsche Kreditbank)
//! online banking into the CSV format HomeBank imports.
//!
//! DKB has shipped four export layouts over the years: cash and Visa
//! reports from the pre-2023 web portal (ISO-8859-1) and giro and Visa
//! reports from the 2023 portal (UTF-8 with BOM). The layout is detected
//! from the first line of the file, the metadata preamble above the column
//! header is cut off, and every transaction row is projected into the fixed
//! eight-column HomeBank schema.

pub mod convert;
pub mod encoding;
pub mod error;
pub mod format;
pub mod homebank;
pub mod reader;

pub use convert::convert;
pub use error::{ConvertError, Result};
pub use format::{CsvFormat, FormatSpec, FORMATS};
pub use homebank::HomebankRow;
