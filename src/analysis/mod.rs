pub mod enrichment;
pub mod history;
pub mod metrics;
pub mod overview;
pub mod selection;
pub mod sentiment;
pub mod stats;
