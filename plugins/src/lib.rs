pub mod factory;
pub mod oracle;
