pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod oracle;
pub mod query;
pub mod report;
pub mod rules;
pub mod session;
pub mod util;
pub mod validate;
