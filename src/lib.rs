pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod write;

pub use config::Config;
pub use error::TransformError;
pub use pipeline::{clean_campaign_data, run, RunSummary};
