// 📂 CSV Extractor
// Reads the product catalog, validates row shape, skips malformed rows

use crate::error::{EtlError, RowError};
use crate::product::{Product, INPUT_COLUMNS};
use csv::{ByteRecord, ReaderBuilder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// EXTRACTION TYPES
// ============================================================================

/// A structurally valid data row, fields trimmed but not yet parsed
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line_number: u64,
    pub fields: Vec<String>,
    pub raw_line: String,
}

/// A data row that was dropped, and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line_number: u64,
    pub raw_line: String,
    pub reason: RowError,
}

#[derive(Debug, Clone, Default)]
pub struct RawExtraction {
    /// First non-blank line, trimmed fields
    pub header: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub header: Option<Vec<String>>,
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedRow>,
}

impl Extraction {
    /// Data rows seen, valid or not. Header and blank lines excluded.
    pub fn rows_read(&self) -> usize {
        self.products.len() + self.skipped.len()
    }
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct CsvExtractor {
    path: PathBuf,
    delimiter: u8,
}

impl CsvExtractor {
    pub fn new<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvExtractor {
            path: path.as_ref().to_path_buf(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the header and every row with the right number of fields.
    ///
    /// No quoting: a delimiter inside a field always splits it.
    pub fn extract_rows(&self) -> Result<RawExtraction, EtlError> {
        if !self.path.exists() {
            return Err(EtlError::InputNotFound {
                path: self.path.clone(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|source| EtlError::InputRead {
                path: self.path.clone(),
                source,
            })?;

        let mut extraction = RawExtraction::default();
        let mut record = ByteRecord::new();

        loop {
            let has_more = reader
                .read_byte_record(&mut record)
                .map_err(|source| EtlError::InputRead {
                    path: self.path.clone(),
                    source,
                })?;
            if !has_more {
                break;
            }

            let line_number = record.position().map(|p| p.line()).unwrap_or(0);
            let raw_line = self.raw_line(&record);

            if is_blank(&record) {
                continue;
            }

            if extraction.header.is_none() {
                let header: Vec<String> = raw_line
                    .split(self.delimiter as char)
                    .map(|f| f.trim().to_string())
                    .collect();
                if header.len() != INPUT_COLUMNS {
                    warn!(
                        "Header has {} columns, expected {}",
                        header.len(),
                        INPUT_COLUMNS
                    );
                }
                extraction.header = Some(header);
                continue;
            }

            let fields = match decode_fields(&record) {
                Some(fields) => fields,
                None => {
                    extraction.skip(line_number, raw_line, RowError::InvalidEncoding);
                    continue;
                }
            };

            if fields.len() != INPUT_COLUMNS {
                let reason = RowError::FieldCount {
                    expected: INPUT_COLUMNS,
                    found: fields.len(),
                };
                extraction.skip(line_number, raw_line, reason);
                continue;
            }

            extraction.rows.push(RawRow {
                line_number,
                fields,
                raw_line,
            });
        }

        Ok(extraction)
    }

    /// Read and parse products. Invalid rows are skipped with a warning.
    pub fn extract(&self) -> Result<Extraction, EtlError> {
        let raw = self.extract_rows()?;

        let mut extraction = Extraction {
            header: raw.header,
            products: Vec::with_capacity(raw.rows.len()),
            skipped: raw.skipped,
        };

        for row in raw.rows {
            match Product::from_fields(&row.fields) {
                Ok(product) => extraction.products.push(product),
                Err(reason) => {
                    warn!(
                        line = row.line_number,
                        "Skipping row with invalid data ({}): {}", reason, row.raw_line
                    );
                    extraction.skipped.push(SkippedRow {
                        line_number: row.line_number,
                        raw_line: row.raw_line,
                        reason,
                    });
                }
            }
        }

        // Structural and parse skips were collected separately
        extraction.skipped.sort_by_key(|s| s.line_number);

        info!(
            "Extracted {} products from {} ({} skipped)",
            extraction.products.len(),
            self.path.display(),
            extraction.skipped.len()
        );

        Ok(extraction)
    }

    fn raw_line(&self, record: &ByteRecord) -> String {
        let bytes: Vec<&[u8]> = record.iter().collect();
        String::from_utf8_lossy(&bytes.join(&self.delimiter)).into_owned()
    }
}

impl RawExtraction {
    fn skip(&mut self, line_number: u64, raw_line: String, reason: RowError) {
        warn!(
            line = line_number,
            "Skipping invalid row ({}): {}", reason, raw_line
        );
        self.skipped.push(SkippedRow {
            line_number,
            raw_line,
            reason,
        });
    }
}

fn is_blank(record: &ByteRecord) -> bool {
    record.len() <= 1 && record.iter().all(|f| f.iter().all(u8::is_ascii_whitespace))
}

fn decode_fields(record: &ByteRecord) -> Option<Vec<String>> {
    record
        .iter()
        .map(|f| std::str::from_utf8(f).ok().map(|s| s.trim().to_string()))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
