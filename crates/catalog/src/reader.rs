//! Delimited-file catalog reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::point::Point;

/// Number of leading fields every record must carry: id, label, x, y, z.
const N_FIELDS: usize = 5;

/// Configuration for reading a catalog from delimited text.
///
/// The [`Default`] implementation reads comma-separated files such as
///
/// ```text
/// StarID,ProperName,X,Y,Z
/// 0,Sol,0,0,0
/// 1,,282.43485,0.00449,5.36884
/// ```
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    delimiter: char,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl ReaderConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDelimiter`] if the delimiter is not a
    /// single ASCII character, is the quote character, or is a line break.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let d = self.delimiter;
        if !d.is_ascii() || matches!(d, '"' | '\n' | '\r') {
            return Err(CatalogError::InvalidDelimiter { delimiter: d });
        }
        Ok(())
    }
}

/// Read a catalog from a delimited file on disk.
///
/// # Errors
///
/// Returns [`CatalogError::FileNotFound`] if `path` does not exist,
/// [`CatalogError::InvalidDelimiter`] for an unusable configuration, and
/// any error [`parse_catalog`] reports for the file contents.
pub fn read_catalog(path: &Path, config: &ReaderConfig) -> Result<Catalog, CatalogError> {
    config.validate()?;

    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| CatalogError::Csv {
        reason: format!("failed to open {}: {e}", path.display()),
    })?;
    let catalog = parse_catalog(file, config)?;

    info!(path = %path.display(), n_points = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Parse a catalog from any reader of delimited text.
///
/// Each non-blank record becomes one [`Point`] from its first five fields
/// (`id, label, x, y, z`); extra fields are ignored. A first record whose
/// `x`, `y` and `z` fields are all non-numeric is taken to be a header and
/// skipped. Fields may
/// be double-quoted, so labels can contain the delimiter.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRecord`] for a record with too few fields
/// or a coordinate that is not a finite number, and [`CatalogError::Csv`]
/// for failures of the underlying reader.
pub fn parse_catalog<R: Read>(reader: R, config: &ReaderConfig) -> Result<Catalog, CatalogError> {
    config.validate()?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(config.delimiter as u8)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut seen_record = false;

    for result in rdr.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);

        if !seen_record {
            seen_record = true;
            if is_header(&record) {
                debug!(line, "skipping header row");
                continue;
            }
        }

        points.push(point_from_record(&record, line)?);
    }

    Ok(Catalog::new(points))
}

/// A header names every coordinate column, so none of `x, y, z` is numeric.
/// A record with only some coordinates unparseable is a bad data row.
fn is_header(record: &csv::StringRecord) -> bool {
    (2..N_FIELDS).all(|i| record.get(i).is_some_and(|f| f.parse::<f64>().is_err()))
}

fn point_from_record(record: &csv::StringRecord, line: u64) -> Result<Point, CatalogError> {
    if record.len() < N_FIELDS {
        return Err(CatalogError::InvalidRecord {
            line,
            reason: format!("expected {N_FIELDS} fields, got {}", record.len()),
        });
    }

    let mut coords = [0.0; 3];
    for (axis, (slot, name)) in coords.iter_mut().zip(["x", "y", "z"]).enumerate() {
        let raw = &record[2 + axis];
        let value: f64 = raw.parse().map_err(|_| CatalogError::InvalidRecord {
            line,
            reason: format!("{name} is not a number: {raw:?}"),
        })?;
        if !value.is_finite() {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: format!("{name} is not finite: {raw:?}"),
            });
        }
        *slot = value;
    }

    Ok(Point::new(&record[0], &record[1], coords))
}
