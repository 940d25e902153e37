/// Report formatting prompt

use serde_json::Value;

pub const REPORT_SYSTEM_PROMPT: &str =
    "You are a research report assistant that formats research findings into professional reports.";

pub const REPORT_MAX_TOKENS: u32 = 4000;

pub fn get_report_prompt(format_data: &Value) -> String {
    let data = serde_json::to_string_pretty(format_data).unwrap_or_else(|_| format_data.to_string());
    format!(
        r#"Format this research synthesis into a professional research report.

RESEARCH DATA:
{}

Create a comprehensive research report with the following sections:
1. Executive Summary
2. Introduction and Background
3. Methodology
4. Key Findings
5. Discussion and Implications
6. Research Gaps
7. Future Directions
8. Conclusion
9. Bibliography

Format your response as a valid JSON object that contains the complete text
for each section of the report:
{{
    "title": "Report title",
    "executive_summary": "Complete text for executive summary",
    "introduction": "Complete text for introduction",
    "methodology": "Complete text for methodology",
    "key_findings": "Complete text for key findings",
    "discussion": "Complete text for discussion",
    "research_gaps": "Complete text for research gaps",
    "future_directions": "Complete text for future directions",
    "conclusion": "Complete text for conclusion",
    "bibliography": ["citation1", "citation2"]
}}"#,
        data
    )
}
