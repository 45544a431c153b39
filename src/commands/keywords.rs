use anyhow::Result;
use tracing::info;

use kitchenware_insights::analysis::sentiment::keyword_counts;
use kitchenware_insights::Config;

use crate::cli::KeywordsArgs;

pub fn run(config: &Config, args: KeywordsArgs) -> Result<()> {
    let catalog = super::load_catalog(&args.data.data, config)?;
    let descriptions = catalog.records().iter().map(|r| r.description.as_str());
    let counts = keyword_counts(descriptions, &args.keywords);
    info!(keywords = counts.len(), "keyword counts computed");

    super::write_json(&counts)
}
