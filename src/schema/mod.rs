pub mod aliases;
pub mod columns;
pub mod types;

pub use aliases::{canonical_name, resolve_headers, COLUMN_ALIASES};
pub use types::{TableSpec, CAMPAIGN, CLIENT, ECONOMICS, OUTPUT_TABLES};
