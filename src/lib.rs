pub mod analysis;
pub mod config;
pub mod data;
pub mod types;
pub mod view;

pub use config::Config;
pub use data::{Catalog, ProductRecord};
