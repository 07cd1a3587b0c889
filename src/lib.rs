// Catalog ETL - Core Library
// Extract a product catalog, apply business rules, load the result

pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod product;
pub mod transformer;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{EtlError, RowError};
pub use extractor::{CsvExtractor, Extraction, RawExtraction, RawRow, SkippedRow};
pub use loader::{CsvLoader, LoadReport};
pub use pipeline::{EtlPipeline, RunState, RunSummary};
pub use product::{round2, PriceRange, Product, INPUT_COLUMNS};
pub use transformer::{
    apply_category_discount, assign_price_range, normalize_name, recategorize_premium,
    ProductTransformer, TransformRule, OUTPUT_HEADER,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
