/// Planning prompt: breaks the query into subtopics, keywords and scope

use crate::models::Depth;

pub const PLANNING_SYSTEM_PROMPT: &str =
    "You are a research planning assistant that creates comprehensive research plans.";

pub const PLANNING_MAX_TOKENS: u32 = 2000;

pub fn get_planning_prompt(query: &str, depth: Depth) -> String {
    format!(
        r#"Create a detailed research plan for the following query:

QUERY: {}
DEPTH: {}

Your task is to:
1. Break down this research question into clear subtopics
2. Identify key search terms and keywords for each subtopic
3. Define the scope of research (time period, domains, etc.)
4. Identify potential sources of information
5. Suggest a structured approach to investigate this topic

Format your response as a valid JSON object with the following structure:
{{
    "main_query": "The main research question",
    "subtopics": ["subtopic1", "subtopic2"],
    "keywords": ["keyword1", "keyword2"],
    "scope": {{
        "time_range": ["start_year", "end_year"],
        "domains": ["domain1", "domain2"],
        "excluded_areas": ["area1", "area2"]
    }},
    "potential_sources": ["source1", "source2"],
    "research_approach": "Description of the approach"
}}"#,
        query, depth
    )
}
