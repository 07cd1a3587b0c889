// 🔄 ETL Orchestrator
// Extract → Transform → Load, one sequential pass, then a run summary

use crate::config::PipelineConfig;
use crate::error::EtlError;
use crate::extractor::CsvExtractor;
use crate::loader::CsvLoader;
use crate::transformer::ProductTransformer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, info};
use uuid::Uuid;

// ============================================================================
// RUN STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Extracting,
    Transforming,
    Loading,
    Summarized,
    /// Terminal: input missing/unreadable or output unwritable
    Failed,
}

impl RunState {
    pub fn name(&self) -> &str {
        match self {
            RunState::Idle => "Idle",
            RunState::Extracting => "Extracting",
            RunState::Transforming => "Transforming",
            RunState::Loading => "Loading",
            RunState::Summarized => "Summarized",
            RunState::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Summarized | RunState::Failed)
    }
}

// ============================================================================
// RUN SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Data rows only, header excluded
    pub rows_read: usize,
    pub rows_transformed: usize,
    pub rows_skipped: usize,

    pub output_path: PathBuf,
    pub output_sha256: String,
}

impl RunSummary {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn print(&self) {
        println!("\n=== ETL Pipeline Summary ===");
        println!("Rows read: {}", self.rows_read);
        println!("Rows transformed: {}", self.rows_transformed);
        println!("Rows skipped: {}", self.rows_skipped);
        println!("Output path: {}", self.output_path.display());
        println!("ETL process completed successfully!");
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct EtlPipeline {
    config: PipelineConfig,
    transformer: ProductTransformer,
    state: RunState,
}

impl EtlPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        EtlPipeline {
            config,
            transformer: ProductTransformer::standard(),
            state: RunState::Idle,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the pipeline once. On success the summary has been printed.
    ///
    /// A failure in any stage leaves the state at `Failed` and the output
    /// file untouched.
    pub fn run(&mut self) -> Result<RunSummary, EtlError> {
        match self.execute() {
            Ok(summary) => {
                summary.print();
                self.advance(RunState::Summarized);
                Ok(summary)
            }
            Err(err) => {
                error!("ETL run failed in {} stage: {}", self.state.name(), err);
                self.advance(RunState::Failed);
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> Result<RunSummary, EtlError> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();

        info!(%run_id, "Starting ETL pipeline");

        // 1. Extract
        self.advance(RunState::Extracting);
        let delimiter = self
            .config
            .delimiter_byte()
            .ok_or(EtlError::InvalidDelimiter(self.config.delimiter))?;
        let extraction = CsvExtractor::new(&self.config.input_path, delimiter).extract()?;
        let rows_read = extraction.rows_read();
        let rows_skipped = extraction.skipped.len();

        // 2. Transform
        self.advance(RunState::Transforming);
        let products = self.transformer.transform_all(extraction.products);
        info!("Transformed {} products", products.len());

        // 3. Load
        self.advance(RunState::Loading);
        let report = CsvLoader::new(&self.config.output_path, delimiter).load(&products)?;

        Ok(RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            rows_read,
            rows_transformed: products.len(),
            rows_skipped,
            output_path: self.config.output_path.clone(),
            output_sha256: report.sha256,
        })
    }

    fn advance(&mut self, next: RunState) {
        debug!("Run state {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}

// ============================================================================
// TESTS
// ============================================================================
