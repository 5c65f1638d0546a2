#[allow(clippy::module_inception)]
pub mod error;
pub mod ingest;
pub mod rule;

pub use error::{CliError, ConfigError};
pub use ingest::IngestError;
pub use rule::RuleError;
