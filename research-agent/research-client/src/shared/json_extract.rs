/// Best-effort JSON recovery from free-form model replies
///
/// Order of attempts:
/// 1. the first fenced code block (```` ```json ```` or bare ```` ``` ````)
/// 2. the greedy span from the first `{` to the last `}`, then the first
///    balanced object if the greedy span over-captured
/// 3. the whole reply
///
/// Only JSON objects count as recovered. When every attempt fails the
/// fallback record from [`StructuredReply::fallback`] is returned, so this
/// never fails.

use regex::Regex;
use serde_json::Value;

use super::reply::StructuredReply;

lazy_static::lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("fenced block pattern");
    static ref GREEDY_OBJECT: Regex =
        Regex::new(r"\{[\s\S]*\}").expect("greedy object pattern");
}

/// Recover a structured reply from `text`
pub fn extract_json(text: &str) -> StructuredReply {
    if let Some(reply) = from_fenced_block(text) {
        return reply;
    }
    if let Some(reply) = from_object_span(text) {
        return reply;
    }
    if let Some(reply) = parse_object(text) {
        return reply;
    }

    tracing::warn!(
        "[JSON] Could not recover JSON from reply ({} chars), using fallback record",
        text.chars().count()
    );
    StructuredReply::fallback(text)
}

fn parse_object(candidate: &str) -> Option<StructuredReply> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(StructuredReply::from_map(map)),
        _ => None,
    }
}

fn from_fenced_block(text: &str) -> Option<StructuredReply> {
    let block = FENCED_BLOCK.captures(text)?.get(1)?;
    let reply = parse_object(block.as_str());
    if reply.is_none() {
        tracing::debug!("[JSON] Fenced block present but not a JSON object");
    }
    reply
}

fn from_object_span(text: &str) -> Option<StructuredReply> {
    let span = GREEDY_OBJECT.find(text)?;
    if let Some(reply) = parse_object(span.as_str()) {
        return Some(reply);
    }

    tracing::debug!("[JSON] Greedy object span did not parse, scanning for balanced objects");
    balanced_object_spans(text).into_iter().find_map(parse_object)
}

/// Every balanced `{...}` span in `text`, ordered by where it opens.
///
/// One pass with a stack of open braces. Quotes are only tracked while an
/// object is open, so braces inside JSON strings are ignored while
/// apostrophes and quotes in the surrounding prose are not.
pub fn balanced_object_spans(text: &str) -> Vec<&str> {
    let mut open: Vec<usize> = Vec::new();
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(i),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans.into_iter().map(|(start, end)| &text[start..end]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_ordered_by_opening_brace() {
        let text = r#"{"a": {"b": 1}} trailing {"c": 2}"#;
        assert_eq!(
            balanced_object_spans(text),
            vec![r#"{"a": {"b": 1}}"#, r#"{"b": 1}"#, r#"{"c": 2}"#]
        );
    }

    #[test]
    fn test_spans_ignore_braces_in_strings() {
        let text = r#"{"a": "}{ \" }"} rest"#;
        assert_eq!(balanced_object_spans(text), vec![r#"{"a": "}{ \" }"}"#]);
    }

    #[test]
    fn test_unclosed_brace_does_not_hide_later_objects() {
        assert_eq!(balanced_object_spans(r#"{broken {"a": 1}"#), vec![r#"{"a": 1}"#]);
        assert!(balanced_object_spans(r#"{"a": 1"#).is_empty());
        assert!(balanced_object_spans("} no objects {").is_empty());
    }

    #[test]
    fn test_many_unclosed_braces() {
        let text = format!("{}{}", "{".repeat(20_000), r#"{"ok": true}"#);
        let spans = balanced_object_spans(&text);
        assert_eq!(spans, vec![r#"{"ok": true}"#]);
        assert_eq!(extract_json(&text).get("ok"), Some(&Value::Bool(true)));
    }
}
