use anyhow::Result;
use tracing::info;

use kitchenware_insights::view::build_catalog_overview;
use kitchenware_insights::Config;

use crate::cli::OverviewArgs;

pub fn run(config: &Config, args: OverviewArgs) -> Result<()> {
    let catalog = super::load_catalog(&args.data.data, config)?;
    let overview = build_catalog_overview(config, &catalog);
    info!(
        products = overview.summary.products,
        categories = overview.summary.categories,
        "catalog overview rendered"
    );

    super::write_json(&overview)
}
