//! Best-effort cleanup of JSON returned by language models.
//!
//! Models asked for "only JSON" still wrap it in markdown fences, add prose
//! around it, leave trailing commas, put raw newlines inside strings or stop
//! mid-object. [`repair_json`] fixes those cases without attempting to be a
//! general JSON5 parser.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?i:json)?").expect("code fence pattern is valid"));

/// Parses `text` as a JSON value, repairing it first if the raw text is not
/// valid JSON.
pub fn parse_lenient(text: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(text.trim()) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str(&repair_json(text)),
    }
}

pub fn repair_json(text: &str) -> String {
    let without_fences = CODE_FENCE.replace_all(text, "");
    let object = extract_object(&without_fences);
    let cleaned = clean_tokens(object);
    close_unbalanced(&cleaned)
}

/// Span from the first `{` to the last `}`; from the first `{` to the end
/// when the object was cut off.
fn extract_object(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(start) = trimmed.find('{') else {
        return trimmed;
    };

    match trimmed.rfind('}') {
        Some(end) if end > start => &trimmed[start..=end],
        _ => &trimmed[start..],
    }
}

/// Drops commas that directly precede `}` or `]` and escapes raw line breaks
/// inside string literals.
fn clean_tokens(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
                out.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\r' => {}
                '\t' => out.push_str("\\t"),
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Appends whatever closing quote and brackets a truncated document is
/// missing, innermost first.
fn close_unbalanced(json: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in json.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.last() == Some(&ch) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    if stack.is_empty() && !in_string {
        return json.to_string();
    }

    let mut out = json.trim_end().to_string();
    if in_string {
        out.push('"');
    }
    if out.ends_with(',') {
        out.pop();
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
