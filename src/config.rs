// ⚙️ Pipeline Configuration
// Input/output paths and delimiter, optionally loaded from JSON

use anyhow::{bail, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "CATALOG_ETL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Field delimiter for both input and output
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/products.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/transformed_products.csv")
}

fn default_delimiter() -> char {
    ','
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: default_input_path(),
            output_path: default_output_path(),
            delimiter: default_delimiter(),
        }
    }
}

impl PipelineConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_path: P, output_path: Q) -> Self {
        PipelineConfig {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
            delimiter: default_delimiter(),
        }
    }

    /// Builder pattern: override the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load config from a JSON file; missing keys use the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: PipelineConfig =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Config file from `CATALOG_ETL_CONFIG` if set, defaults otherwise.
    /// Only a config file needs validating; the defaults are always valid.
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PipelineConfig::from_file(PathBuf::from(path)),
            None => Ok(PipelineConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter_byte().is_none() {
            bail!("Delimiter {:?} must be a single ASCII character", self.delimiter);
        }
        if self.input_path == self.output_path {
            bail!(
                "Input and output paths must differ: {}",
                self.input_path.display()
            );
        }
        Ok(())
    }

    /// Delimiter as a byte, None when it is not ASCII
    pub fn delimiter_byte(&self) -> Option<u8> {
        if self.delimiter.is_ascii() {
            Some(self.delimiter as u8)
        } else {
            None
        }
    }
}
