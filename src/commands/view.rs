use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};

use kitchenware_insights::analysis::selection::search_to_selection;
use kitchenware_insights::view::{build_product_view, ViewRequest};
use kitchenware_insights::Config;

use crate::cli::ViewArgs;

pub fn run(config: &Config, args: ViewArgs) -> Result<()> {
    let catalog = super::load_catalog(&args.data.data, config)?;
    if args.search.is_some() {
        let matched = search_to_selection(&catalog, args.search.as_deref());
        debug!(matched = ?matched, "search box lookup");
    }

    let request = ViewRequest {
        asin: args.asin.as_deref(),
        search: args.search.as_deref(),
        end_date: args.end_date.unwrap_or_else(|| Local::now().date_naive()),
    };

    let view = build_product_view(config, &catalog, &request)
        .context("failed to build product view")?;
    info!(
        asin = %view.asin,
        selection = view.selection.as_str(),
        category = %view.metrics.category,
        peers = view.metrics.peer_count,
        no_regret = view.metrics.no_regret,
        "product view rendered"
    );

    super::write_json(&view)
}
