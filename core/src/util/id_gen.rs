use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

/// Format: rule-{YYYYMMDDHHmmss}-{random8}
pub fn generate_rule_id() -> String {
    generate_rule_id_at(Local::now())
}

pub fn generate_rule_id_at<Tz: TimeZone>(at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    stamped_id("rule", at)
}

/// Format: mod-{YYYYMMDDHHmmss}-{random8}
pub fn generate_modification_id() -> String {
    stamped_id("mod", Local::now())
}

fn stamped_id<Tz: TimeZone>(prefix: &str, at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let ts = at.format("%Y%m%d%H%M%S");
    let uuid = Uuid::new_v4().simple().to_string();
    let suffix = &uuid[..8];
    format!("{}-{}-{}", prefix, ts, suffix)
}
