pub mod dataset;
pub mod entity;
pub mod finding;
pub mod record;
pub mod value;

pub use dataset::Dataset;
pub use entity::{CanonicalField, EntityKind};
pub use finding::{Finding, FindingKind, Severity};
pub use record::{Client, Record, Task, Worker, DEFAULT_GROUP_TAG};
