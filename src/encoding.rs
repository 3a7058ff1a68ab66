//! Text encoding handling for DKB exports.
//!
//! Exports from the old banking portal are ISO-8859-1, the 2023 portal
//! writes UTF-8 with a BOM. The first line is enough to tell them apart:
//! it is trial-decoded against the candidate list and the first encoding
//! that reports no errors wins.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8_INIT, WINDOWS_1252_INIT};

use crate::error::{ConvertError, Result};

/// Candidate encodings in trial order. Windows-1252 assigns a character to
/// every byte, so the trial cannot run off the end of the list.
pub static ENCODING_CANDIDATES: [&Encoding; 2] = [&UTF_8_INIT, &WINDOWS_1252_INIT];

/// Picks the first candidate that decodes the opening line of `path`
/// without errors.
pub fn resolve_encoding(path: &Path) -> Result<&'static Encoding> {
    let line = read_first_line(path)?;
    match first_clean_candidate(&line) {
        Some(encoding) => Ok(encoding),
        None => Err(ConvertError::Decode {
            path: path.to_path_buf(),
            encoding: "any candidate encoding",
        }),
    }
}

/// Returns the opening line of `path`, decoded via [`resolve_encoding`]'s
/// trial. A UTF-8 BOM is not part of the line.
pub fn decode_first_line(path: &Path) -> Result<String> {
    let encoding = resolve_encoding(path)?;
    let line = read_first_line(path)?;
    let (decoded, _, _) = encoding.decode(&line);
    Ok(decoded.into_owned())
}

/// Decodes the whole file with the given encoding, strictly: malformed
/// input is an error, never replaced behind the caller's back.
pub fn decode_file(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    let (decoded, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ConvertError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }
    Ok(decoded.into_owned())
}

fn first_clean_candidate(line: &[u8]) -> Option<&'static Encoding> {
    for encoding in ENCODING_CANDIDATES {
        let (_, _, had_errors) = encoding.decode(line);
        if !had_errors {
            return Some(encoding);
        }
    }
    None
}

/// Raw bytes of the first line, without the trailing line break.
fn read_first_line(path: &Path) -> Result<Vec<u8>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    while line.last() == Some(&b'\n') || line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(line)
}
