pub mod extract;
pub mod http_client;
pub mod service;

pub use http_client::{HttpClient, OracleHttpError};
pub use service::OpenAiOracle;
