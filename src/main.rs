use anyhow::Result;

use catalog_etl::logging::init_logging;
use catalog_etl::{EtlPipeline, PipelineConfig, VERSION};

fn main() -> Result<()> {
    init_logging();

    println!("📦 Catalog ETL v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = PipelineConfig::load()?;

    let mut pipeline = EtlPipeline::new(config);

    if let Err(err) = pipeline.run() {
        eprintln!("❌ Error: {}", err);
        eprintln!("   {}", err.hint());
        std::process::exit(1);
    }

    Ok(())
}
