// 💾 CSV Loader
// Writes the transformed catalog atomically: temp file, fsync, rename

use crate::error::EtlError;
use crate::product::Product;
use crate::transformer::OUTPUT_HEADER;
use csv::{QuoteStyle, WriterBuilder};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows written, header excluded
    pub rows_written: usize,
    pub bytes_written: usize,
    /// Hex SHA-256 of the output file
    pub sha256: String,
}

pub struct CsvLoader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P, delimiter: u8) -> Self {
        CsvLoader {
            path: path.as_ref().to_path_buf(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write header plus one line per product, replacing any existing file.
    pub fn load(&self, products: &[Product]) -> Result<LoadReport, EtlError> {
        let bytes = self.serialize(products)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let sha256 = format!("{:x}", hasher.finalize());

        self.write_atomically(&bytes).map_err(|source| EtlError::OutputWrite {
            path: self.path.clone(),
            source,
        })?;

        info!(
            "Loaded {} products to {}",
            products.len(),
            self.path.display()
        );

        Ok(LoadReport {
            rows_written: products.len(),
            bytes_written: bytes.len(),
            sha256,
        })
    }

    fn serialize(&self, products: &[Product]) -> Result<Vec<u8>, EtlError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(OUTPUT_HEADER)
            .map_err(|e| self.output_error(e.into()))?;

        for product in products {
            let record = product
                .to_record()
                .ok_or_else(|| EtlError::Untransformed { id: product.id })?;
            writer
                .write_record(&record)
                .map_err(|e| self.output_error(e.into()))?;
        }

        writer.into_inner().map_err(|e| {
            let cause = e.error();
            self.output_error(io::Error::new(cause.kind(), cause.to_string()))
        })
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        debug!("Writing temp file {}", temp_path.display());

        let result = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Hidden sibling of the output, so the rename stays on one filesystem
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.csv".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }

    fn output_error(&self, source: io::Error) -> EtlError {
        EtlError::OutputWrite {
            path: self.path.clone(),
            source,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
