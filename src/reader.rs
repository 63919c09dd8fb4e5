use crate::error::Errors;

use std::fs;
use std::path::Path;

/// Reads the raw sales data file and returns cleaned lines: whitespace
/// trimmed, blank lines removed, and a leading header row (recognized by the
/// literal `TransactionID` token) skipped.
///
/// A missing or unreadable file is reported as [`Errors::SourceUnavailable`];
/// the caller decides whether that is fatal. Decoding cannot fail: input is
/// read as UTF-8 with a Windows-1252 fallback, which accepts any byte
/// sequence.
pub fn read_sales_lines(path: impl AsRef<Path>) -> Result<Vec<String>, Errors> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|_| Errors::SourceUnavailable(path.display().to_string()))?;
    Ok(clean_lines(&decode(bytes)))
}

// Try UTF-8 first; on failure, recover the buffer from the error and fall
// back to Windows-1252, which also covers Latin-1 era exports.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

fn clean_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() {
                None
            } else if i == 0 && line.contains("TransactionID") {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}
