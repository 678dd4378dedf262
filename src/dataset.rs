//! CSV dataset loading.
//!
//! The dataset is plain comma-separated text whose first line is a header.
//! Each following row reads `countryCode,cityName,population`; further
//! columns are ignored and every field is trimmed. Rows are fed to a
//! [`CityIndex`] in file order, so a repeated `(city, country)` pair ends up
//! with its last population.
//!
//! Malformed rows are skipped, never fatal: the load reports how many were
//! dropped and logs each one with its line number. That includes rows that
//! are not valid UTF-8; they are dropped rather than decoded lossily.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::error::DatasetError;
use crate::index::CityIndex;
use crate::key::normalize;

/// Row counts from one load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Opens `path` and loads it into `index`.
///
/// # Errors
///
/// [`DatasetError::Io`] if the file cannot be opened or read, and
/// [`DatasetError::Empty`] if it has no header line.
pub fn load_path<I: CityIndex>(path: impl AsRef<Path>, index: &mut I) -> Result<LoadReport, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::io(Some(path.to_path_buf()), e))?;
    let report = load_rows(BufReader::new(file), index).map_err(|e| match e {
        DatasetError::Io { source, .. } => DatasetError::io(Some(path.to_path_buf()), source),
        other => other,
    })?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "dataset loaded"
    );
    Ok(report)
}

/// Loads rows from any buffered reader into `index`.
///
/// ```
/// use std::io::Cursor;
/// use citycache::dataset::load_reader;
/// use citycache::index::{CityIndex, CityTrie};
/// use citycache::key::normalize;
///
/// let csv = "code,city,population\njp,Tokyo,37400000\n";
/// let mut trie = CityTrie::new();
/// let report = load_reader(Cursor::new(csv), &mut trie).unwrap();
/// assert_eq!(report.loaded, 1);
/// assert_eq!(trie.search(&normalize("tokyo", "JP")), Some("37400000"));
/// ```
///
/// # Errors
///
/// Same as [`load_path`], with no path attached to I/O errors.
pub fn load_reader<R: BufRead, I: CityIndex>(reader: R, index: &mut I) -> Result<LoadReport, DatasetError> {
    let report = load_rows(reader, index)?;
    info!(loaded = report.loaded, skipped = report.skipped, "dataset loaded");
    Ok(report)
}

fn load_rows<R: BufRead, I: CityIndex>(mut reader: R, index: &mut I) -> Result<LoadReport, DatasetError> {
    let mut buf = Vec::new();
    if read_row(&mut reader, &mut buf)? == 0 {
        return Err(DatasetError::Empty);
    }

    let mut report = LoadReport::default();
    // Header is line 1.
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if read_row(&mut reader, &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(line = line_no, "skipping dataset row that is not valid UTF-8");
            report.skipped += 1;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some((country, city, population)) => {
                index.insert(normalize(city, country), population.to_owned());
                report.loaded += 1;
            },
            None => {
                warn!(line = line_no, "skipping malformed dataset row");
                report.skipped += 1;
            },
        }
    }
    Ok(report)
}

fn read_row<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize, DatasetError> {
    reader
        .read_until(b'\n', buf)
        .map_err(|e| DatasetError::io(None, e))
}

/// Splits a row into `(country, city, population)`.
fn parse_row(line: &str) -> Option<(&str, &str, &str)> {
    let mut fields = line.split(',').map(str::trim);
    let country = fields.next()?;
    let city = fields.next()?;
    let population = fields.next()?;
    if city.is_empty() {
        return None;
    }
    Some((country, city, population))
}
