//! Loose readers over untyped cell values.
//!
//! Records keep whatever the transformer produced, so a field declared as a
//! list may still hold a bare string and a numeric field may hold text. The
//! validators read values exclusively through these helpers.

use serde_json::Value;

/// Absent, null, or a string that is empty after trimming.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Interpret a cell as a finite number. Numeric strings are accepted.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Finite float parse of a trimmed string.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Coerce to a string list: lists pass through (elements stringified),
/// delimiter-separated strings are split on `,` and `;`, anything else is
/// empty. Never fails.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.trim().to_string()),
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => split_delimited(s),
        _ => Vec::new(),
    }
}

/// Integer prefix of a string (`"3a"` is 3, `" -2.9"` is -2), as phase and
/// slot cells are read. `None` when no digit leads.
pub fn parse_leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[..digits]
        .parse::<f64>()
        .ok()
        .map(|n| sign * n)
        .filter(|f| f.is_finite())
}

/// Phase or slot numbers of a list-like cell. Numbers pass through, strings
/// contribute their integer prefix, everything else is dropped.
pub fn number_list(value: Option<&Value>) -> Vec<f64> {
    let element = |v: &Value| match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    };
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(element).collect(),
        other => string_list(other)
            .iter()
            .filter_map(|s| parse_leading_int(s))
            .collect(),
    }
}

/// Split on comma or semicolon, trimming parts and dropping empties.
pub fn split_delimited(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a cell for use inside a message.
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Integral values print without a fractional part.
pub fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}
