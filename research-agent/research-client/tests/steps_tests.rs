/// Tests for how each pipeline step turns a reply into records

mod common;

use common::{document, INSIGHT_REPLY, PLAN_REPLY, SYNTHESIS_REPLY};
use research_client::findings::findings_from_reply;
use research_client::insights::enhance_synthesis;
use research_client::planning::topic_from_plan;
use research_client::synthesis::{covered_documents, default_synthesis, synthesis_from_reply};
use research_client::{extract_json, ResearchFinding, ResearchScope, ResearchTopic, RunContext};

fn topic(query: &str, subtopics: &[&str]) -> ResearchTopic {
    ResearchTopic {
        id: "topic_1".to_string(),
        query: query.to_string(),
        subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        keywords: vec!["qubit".to_string()],
        scope: ResearchScope::default(),
    }
}

fn finding(id: &str, source: &str) -> ResearchFinding {
    ResearchFinding {
        id: id.to_string(),
        content: format!("finding {}", id),
        source_documents: vec![source.to_string()],
        confidence: 0.8,
        tags: Vec::new(),
    }
}

#[test]
fn test_topic_from_plan_reads_every_field() {
    let topic = topic_from_plan(&extract_json(PLAN_REPLY), "ignored", "topic_7".to_string());

    assert_eq!(topic.id, "topic_7");
    assert_eq!(topic.query, "quantum computing and AI");
    assert_eq!(topic.subtopics, vec!["quantum computing", "AI"]);
    assert_eq!(topic.keywords, vec!["qubit", "machine learning"]);
    assert_eq!(topic.scope.time_range, ("2019".to_string(), "2024".to_string()));
    assert_eq!(topic.scope.domains, vec!["Physics", "Computer Science"]);
}

#[test]
fn test_topic_from_plan_defaults_missing_fields() {
    let plan = extract_json(r#"{"subtopics": ["only one"], "scope": {"time_range": ["2021"]}}"#);
    let topic = topic_from_plan(&plan, "solar cells and batteries", "topic_1".to_string());

    assert_eq!(topic.query, "solar cells and batteries");
    assert_eq!(topic.subtopics, vec!["only one"]);
    assert_eq!(topic.keywords, vec!["solar", "cells", "and", "batteries"]);
    assert_eq!(topic.scope, ResearchScope::default());
}

#[test]
fn test_topic_from_fallback_record() {
    let topic = topic_from_plan(&extract_json("no plan"), "solar cells and batteries", "topic_1".to_string());
    assert_eq!(topic.subtopics, vec!["solar cells", "batteries"]);
}

#[test]
fn test_findings_from_reply_defaults_and_clamps() {
    let reply = extract_json(
        r#"{"key_findings": [{"finding": "Quantum speedup.", "confidence": 1.7}, {"confidence": 0.4}, {"finding": "Plain."}]}"#,
    );
    let doc = document("doc_x", "Paper");
    let findings = findings_from_reply(&reply, &doc, &topic("quantum", &["quantum", "biology"]));

    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0].id, "finding_doc_x_0");
    assert_eq!(findings[0].confidence, 1.0);
    assert_eq!(findings[0].tags, vec!["quantum", "quantum"]);
    assert_eq!(findings[1].content, "No finding specified");
    assert_eq!(findings[1].confidence, 0.4);
    assert_eq!(findings[2].confidence, 0.7);
    assert!(findings.iter().all(|f| f.source_documents == vec!["doc_x".to_string()]));
}

#[test]
fn test_findings_from_reply_without_key_findings() {
    let doc = document("doc_x", "Paper");
    let findings = findings_from_reply(&extract_json("nothing useful"), &doc, &topic("batteries", &[]));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].content, "The document discusses batteries.");
}

#[test]
fn test_covered_documents_only_lists_retrieved_ids_once() {
    let mut ctx = RunContext::new();
    ctx.register_document(document("doc_a", "A"));
    ctx.register_document(document("doc_b", "B"));

    let findings = vec![
        finding("1", "doc_b"),
        finding("2", "doc_a"),
        finding("3", "doc_b"),
        finding("4", "doc_unknown"),
    ];
    assert_eq!(covered_documents(&findings, &ctx), vec!["doc_b", "doc_a"]);
}

#[test]
fn test_synthesis_from_reply_builds_findings_and_bibliography() {
    let mut ctx = RunContext::new();
    ctx.register_document(document("doc_a", "Qubit Error Correction"));
    let findings = vec![finding("1", "doc_a")];
    let t = topic("quantum", &["quantum computing"]);

    let synthesis = synthesis_from_reply(&extract_json(SYNTHESIS_REPLY), &findings, &t, &ctx, "synthesis_1".to_string());

    assert_eq!(synthesis.title, "Quantum Computing Meets AI");
    assert_eq!(synthesis.key_findings.len(), 2);
    assert_eq!(synthesis.key_findings[1].id, "syn_finding_0_1");
    assert_eq!(synthesis.key_findings[1].confidence, 0.9);
    assert_eq!(synthesis.key_findings[0].tags, vec!["quantum computing"]);
    assert_eq!(synthesis.document_coverage, vec!["doc_a"]);
    assert_eq!(
        synthesis.bibliography,
        vec!["Ada Lovelace, Alan Turing. (2023-05). Qubit Error Correction. Journal of Testing."]
    );
}

#[test]
fn test_synthesis_from_empty_reply_uses_subtopic_insights() {
    let ctx = RunContext::new();
    let t = topic("quantum", &["hardware", "software"]);
    let synthesis = synthesis_from_reply(&extract_json("{}"), &[], &t, &ctx, "synthesis_1".to_string());

    assert_eq!(synthesis.title, "Research on quantum");
    let contents: Vec<&str> = synthesis.key_findings.iter().map(|f| f.content.as_str()).collect();
    assert_eq!(contents, vec!["Key insight about hardware.", "Key insight about software."]);
    assert!(synthesis.document_coverage.is_empty());
}

#[test]
fn test_synthesis_with_no_insights_gets_default_finding() {
    let ctx = RunContext::new();
    let reply = extract_json(r#"{"synthesis_by_subtopic": [{"subtopic": "x", "key_insights": []}]}"#);
    let synthesis = synthesis_from_reply(&reply, &[], &topic("q", &["x"]), &ctx, "s".to_string());

    assert_eq!(synthesis.key_findings.len(), 1);
    assert_eq!(synthesis.key_findings[0].id, "syn_finding_default");
    assert_eq!(synthesis.key_findings[0].confidence, 0.7);
}

#[test]
fn test_enhance_synthesis_appends_and_registers_insights() {
    let mut ctx = RunContext::new();
    let mut base = default_synthesis(&topic("quantum", &["quantum"]));
    base.document_coverage = vec!["doc_a".to_string()];

    let enhanced = enhance_synthesis(&extract_json(INSIGHT_REPLY), &base, &mut ctx);

    assert_eq!(enhanced.key_findings.len(), base.key_findings.len() + 2);
    let pattern = &enhanced.key_findings[1];
    assert_eq!(pattern.id, "pattern_finding_0");
    assert_eq!(pattern.confidence, 0.85);
    assert_eq!(pattern.source_documents, vec!["doc_a"]);
    let application = &enhanced.key_findings[2];
    assert_eq!(application.id, "application_finding_0");
    assert_eq!(application.confidence, 0.8);

    assert_eq!(enhanced.future_directions, vec!["Fault-tolerant hybrid training."]);
    assert!(ctx.findings().contains_key("pattern_finding_0"));
    assert!(ctx.findings().contains_key("application_finding_0"));
    // the input synthesis is untouched
    assert_eq!(base.key_findings.len(), 1);
}

#[test]
fn test_enhance_synthesis_keeps_directions_without_replacement() {
    let mut ctx = RunContext::new();
    let base = default_synthesis(&topic("q", &[]));
    let enhanced = enhance_synthesis(&extract_json("nope"), &base, &mut ctx);
    assert_eq!(enhanced, base);
}

#[test]
fn test_registries_keep_the_first_record() {
    let mut ctx = RunContext::new();
    assert!(ctx.register_document(document("doc_a", "First")));
    assert!(!ctx.register_document(document("doc_a", "Second")));
    assert_eq!(ctx.document("doc_a").unwrap().title, "First");

    assert!(ctx.register_finding(finding("f", "doc_a")));
    let mut other = finding("f", "doc_a");
    other.content = "changed".to_string();
    assert!(!ctx.register_finding(other));
    assert_eq!(ctx.findings()["f"].content, "finding f");
}
