/// Research document model shared by every document source

use serde::{Deserialize, Serialize};

/// A research paper or article returned by a [`crate::DocumentSource`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchDocument {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    pub source: String,
    pub content: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl ResearchDocument {
    /// Bibliography entry: `Authors. (date). Title. Source.`
    ///
    /// A citation supplied by the source takes precedence.
    pub fn format_citation(&self) -> String {
        if let Some(citation) = self.citation.as_deref().filter(|c| !c.trim().is_empty()) {
            return citation.to_string();
        }
        format!(
            "{}. ({}). {}. {}.",
            self.authors.join(", "),
            self.publication_date,
            self.title,
            self.source
        )
    }
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
