//! Declarative allocation rules and the session rule book.

mod assist;
mod book;
mod model;

pub use assist::{recommend_rules, text_to_rule};
pub use book::{RuleBook, RulePatch};
pub use model::{
    Impact, Rule, RuleDraft, RuleRecommendation, RuleType, DEFAULT_RULE_PRIORITY,
    MAX_RULE_PRIORITY, MIN_RULE_PRIORITY,
};
