use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "kitchenware-insights",
    version,
    about = "Product analytics and dashboard view-models for kitchenware listings"
)]
pub struct Cli {
    /// YAML settings file; built-in defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the view-model for one product as JSON.
    View(ViewArgs),
    /// Render the catalog-wide landing view as JSON.
    Overview(OverviewArgs),
    /// Count descriptions mentioning each keyword.
    Keywords(KeywordsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(long, default_value = "data/amazon_kitchenware.csv")]
    pub data: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long)]
    pub asin: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    /// Last day of the synthesized price history (defaults to today).
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Args, Debug, Clone)]
pub struct KeywordsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long = "keyword", required = true)]
    pub keywords: Vec<String>,
}
