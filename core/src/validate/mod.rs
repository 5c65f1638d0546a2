//! Multi-pass validation: per-entity structure, cross references, business logic.
//!
//! Every pass is a pure function returning its own findings; nothing here
//! returns an error.

pub mod business;
pub mod cross_ref;
pub mod entity;
pub mod thresholds;

mod sink;
mod tally;
mod validator;

pub use thresholds::ValidationThresholds;
pub use validator::DataValidator;
