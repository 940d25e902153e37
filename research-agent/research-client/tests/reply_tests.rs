/// Tests for per-field defaulting on structured replies

use research_client::shared::reply::{prose_field, string_list_field, text_field};
use research_client::{extract_json, StructuredReply};
use serde_json::{json, Map, Value};

fn reply(value: Value) -> StructuredReply {
    match value {
        Value::Object(map) => StructuredReply::from_map(map),
        _ => panic!("test replies must be objects"),
    }
}

#[test]
fn test_text_or_uses_default_for_missing_blank_or_mistyped() {
    let r = reply(json!({"title": "   ", "summary": 12, "intro": "Hello"}));
    assert_eq!(r.text_or("title", "fallback"), "fallback");
    assert_eq!(r.text_or("summary", "fallback"), "fallback");
    assert_eq!(r.text_or("missing", "fallback"), "fallback");
    assert_eq!(r.text_or("intro", "fallback"), "Hello");
}

#[test]
fn test_prose_or_renders_lists_as_bullets() {
    let r = reply(json!({"key_findings": ["one", "two"], "empty": []}));
    assert_eq!(r.prose_or("key_findings", "x"), "- one\n- two");
    assert_eq!(r.prose_or("empty", "x"), "x");
}

#[test]
fn test_strings_or_keeps_strings_and_numbers() {
    let r = reply(json!({"time_range": [2019, "2024", null, {"a": 1}], "domains": "Physics"}));
    assert_eq!(r.strings_or("time_range", vec![]), vec!["2019", "2024"]);
    // not an array
    assert_eq!(r.strings_or("domains", vec!["General".to_string()]), vec!["General"]);
}

#[test]
fn test_objects_skips_non_objects() {
    let r = reply(json!({"key_findings": [{"finding": "a"}, "stray", {"finding": "b"}]}));
    let items = r.objects("key_findings");
    assert_eq!(items.len(), 2);
    assert_eq!(text_field(items[1], "finding").as_deref(), Some("b"));
    assert!(r.objects("missing").is_empty());
}

#[test]
fn test_fallback_record_defaults_every_field() {
    let r = extract_json("no structure here");
    assert!(r.is_fallback());
    assert_eq!(r.text_or("title", "Research on x"), "Research on x");
    assert_eq!(r.strings_or("subtopics", vec!["x".to_string()]), vec!["x"]);
    assert!(r.objects("key_findings").is_empty());
}

#[test]
fn test_free_helpers_on_plain_maps() {
    let mut map = Map::new();
    map.insert("a".to_string(), json!(["x"]));
    assert_eq!(prose_field(&map, "a").as_deref(), Some("- x"));
    assert_eq!(string_list_field(&map, "b"), None);
}

#[test]
fn test_model_supplied_error_key_is_not_a_fallback() {
    let r = reply(json!({"error": "rate limited"}));
    assert!(!r.is_fallback());
}
