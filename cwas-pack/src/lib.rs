//! Packing of annotated variant tables into in-memory records
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This crate is the boundary between the files produced upstream
//! (an annotated, tab-separated variant table and a gene matrix) and the
//! categorization core. Rows are never copied: a `VariantRecord` borrows
//! every field straight from the line it was parsed from, and the column
//! positions it needs are resolved once from the header by `ColumnLayout`.

use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use config::{COMMENT, FIELD_SEPARATOR};
use thiserror::Error;

pub mod gene;
pub mod record;

pub use gene::GeneMatrix;
pub use record::{ColumnLayout, IndicatorFlags, VariantRecord};

/// errors raised while packing tables
#[derive(Debug, Error)]
pub enum PackError {
    #[error("ERROR: table has no header line")]
    MissingHeader,
    #[error("ERROR: required column {0:?} is absent from the table header")]
    MissingColumn(String),
    #[error("ERROR: column {0:?} is claimed by more than one field")]
    ColumnClash(String),
    #[error("ERROR: gene matrix header has no category columns")]
    NoCategories,
    #[error("ERROR: {count} indicator columns requested but only {max} fit in an annotation int")]
    TooManyIndicators { count: usize, max: usize },
    #[error("ERROR: line {line} has {found} fields, expected at least {expected}")]
    ShortRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("ERROR: could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// read a whole file into memory
pub fn reader<P: AsRef<Path> + Debug>(file: P) -> Result<String, PackError> {
    let wrap = |source| PackError::Io {
        path: format!("{:?}", file),
        source,
    };

    let mut handle = File::open(file.as_ref()).map_err(wrap)?;
    let mut contents = String::new();
    handle.read_to_string(&mut contents).map_err(wrap)?;

    Ok(contents)
}

/// split a table into its header and its numbered data lines
///
/// Leading `#`-prefixed lines are metadata, except the last one directly
/// above the data, which is taken as the header when it carries
/// tab-separated fields (the `#CHROM`-style convention). Blank and `#` lines inside the body are
/// dropped. Line numbers are 1-based positions in the original contents.
pub fn split_table(contents: &str) -> Result<(&str, Vec<(usize, &str)>), PackError> {
    let mut lines = contents.lines().enumerate().peekable();
    let mut header = None;

    while let Some((_, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("##") {
            continue;
        }

        if let Some(stripped) = line.strip_prefix(COMMENT) {
            let next_is_meta = matches!(lines.peek(), Some((_, next)) if next.starts_with(COMMENT));
            if next_is_meta || !stripped.contains(FIELD_SEPARATOR) {
                continue;
            }
            header = Some(stripped);
        } else {
            header = Some(line);
        }
        break;
    }

    let header = header.ok_or(PackError::MissingHeader)?;
    let body = lines
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with(COMMENT))
        .map(|(idx, line)| (idx + 1, line))
        .collect();

    Ok((header, body))
}

/// truthiness of an indicator cell
///
/// Non-zero numbers and `true` (any case) are truthy; empty cells, `NA`,
/// `.` and anything unparsable are not.
#[inline(always)]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        return true;
    }

    match value.parse::<f64>() {
        Ok(number) => number != 0.0 && !number.is_nan(),
        Err(_) => false,
    }
}
