/// Synthesis and insight prompts

use serde_json::Value;

pub const SYNTHESIS_SYSTEM_PROMPT: &str =
    "You are a research synthesis assistant that integrates findings into coherent narratives.";

pub const SYNTHESIS_MAX_TOKENS: u32 = 4000;

pub const INSIGHT_SYSTEM_PROMPT: &str =
    "You are a research insight generator that identifies deeper patterns and connections.";

pub const INSIGHT_MAX_TOKENS: u32 = 3000;

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn get_synthesis_prompt(query: &str, subtopics: &[String], findings_data: &Value) -> String {
    format!(
        r#"Synthesize the following research findings into a coherent narrative.

RESEARCH QUESTION:
{}

SUBTOPICS:
{}

FINDINGS:
{}

Your task is to:
1. Create a comprehensive synthesis of these findings
2. Identify patterns, trends, and connections across findings
3. Note contradictions or inconsistencies between findings
4. Identify gaps in the research
5. Suggest potential directions for future research

Format your response as a valid JSON object with the following structure:
{{
    "title": "Title for the research synthesis",
    "executive_summary": "Brief summary of key insights",
    "synthesis_by_subtopic": [
        {{
            "subtopic": "Subtopic name",
            "synthesis": "Detailed synthesis of findings for this subtopic",
            "key_insights": ["insight1", "insight2"]
        }}
    ],
    "cross_cutting_themes": ["theme1", "theme2"],
    "contradictions": ["contradiction1", "contradiction2"],
    "research_gaps": ["gap1", "gap2"],
    "future_directions": ["direction1", "direction2"]
}}"#,
        query,
        subtopics.join(", "),
        pretty(findings_data)
    )
}

pub fn get_insight_prompt(query: &str, synthesis_data: &Value) -> String {
    format!(
        r#"Analyze this research synthesis to generate deeper insights and identify patterns
that may not be immediately obvious.

RESEARCH QUESTION:
{}

RESEARCH SYNTHESIS:
{}

Your task is to:
1. Identify non-obvious patterns or connections in the research
2. Suggest potential paradigm shifts or transformative ideas
3. Identify interdisciplinary connections
4. Suggest practical applications of the research findings
5. Provide a critical perspective on the limitations of current approaches

Format your response as a valid JSON object with the following structure:
{{
    "deeper_patterns": ["pattern1", "pattern2"],
    "transformative_ideas": ["idea1", "idea2"],
    "interdisciplinary_connections": ["connection1", "connection2"],
    "practical_applications": ["application1", "application2"],
    "critical_perspective": "Critical perspective on the research",
    "enhanced_future_directions": ["direction1", "direction2"]
}}"#,
        query,
        pretty(synthesis_data)
    )
}
