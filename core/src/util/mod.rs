mod id_gen;

pub use id_gen::{generate_modification_id, generate_rule_id, generate_rule_id_at};
