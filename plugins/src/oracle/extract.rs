//! Pulling a JSON document out of free-form completion text.

use anyhow::{anyhow, Context};
use regex::Regex;
use serde_json::Value;

const OBJECT_PATTERN: &str = r"\{[\s\S]*\}";
const ARRAY_PATTERN: &str = r"\[[\s\S]*\]";

/// The outermost `{...}` (or `[...]`) span of `text`, parsed as JSON. A span
/// that fails to parse is retried once with control characters and trailing
/// commas removed.
pub fn extract_json(text: &str, want_array: bool) -> anyhow::Result<Value> {
    let pattern = if want_array { ARRAY_PATTERN } else { OBJECT_PATTERN };
    let re = Regex::new(pattern)?;
    let span = re
        .find(text)
        .ok_or_else(|| anyhow!("no JSON {} in reply", if want_array { "array" } else { "object" }))?
        .as_str();

    match serde_json::from_str(span) {
        Ok(v) => Ok(v),
        Err(first) => {
            let cleaned = clean(span)?;
            serde_json::from_str(&cleaned)
                .with_context(|| format!("reply JSON unparsable after cleanup: {first}"))
        }
    }
}

fn clean(span: &str) -> anyhow::Result<String> {
    let controls = Regex::new(r"[\x{00}-\x{1F}\x{7F}-\x{9F}]")?;
    let trailing_obj = Regex::new(r",\s*\}")?;
    let trailing_arr = Regex::new(r",\s*\]")?;
    let s = controls.replace_all(span, "");
    let s = trailing_obj.replace_all(&s, "}");
    Ok(trailing_arr.replace_all(&s, "]").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_inside_prose_and_fences() {
        let text = "Sure! Here it is:\n```json\n{\"Client ID\": \"ClientID\"}\n```\nAnything else?";
        assert_eq!(
            extract_json(text, false).unwrap(),
            json!({"Client ID": "ClientID"})
        );
    }

    #[test]
    fn trailing_commas_are_repaired() {
        let text = "[{\"type\": \"loadLimit\", \"priority\": 3,},]";
        assert_eq!(
            extract_json(text, true).unwrap(),
            json!([{"type": "loadLimit", "priority": 3}])
        );
    }

    #[test]
    fn no_json_is_an_error() {
        assert!(extract_json("I cannot help with that.", false).is_err());
        assert!(extract_json("{ not json at all", false).is_err());
    }
}
