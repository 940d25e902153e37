/// Mock academic database search
///
/// Stands in for a real academic search API: every keyword yields a handful
/// of journal results with randomized dates, venues and relevance scores.

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::document::{title_case, ResearchDocument};
use crate::source::{DocumentSource, SearchRequest};

const JOURNALS: &[&str] = &["Nature", "Science", "PNAS", "Cell", "The Lancet"];

#[derive(Debug, Clone)]
pub struct MockAcademicSearch {
    max_keywords: usize,
    results_per_keyword: usize,
}

impl Default for MockAcademicSearch {
    fn default() -> Self {
        Self {
            max_keywords: 3,
            results_per_keyword: 3,
        }
    }
}

impl MockAcademicSearch {
    pub fn new(max_keywords: usize, results_per_keyword: usize) -> Self {
        Self {
            max_keywords,
            results_per_keyword,
        }
    }

    /// Results for one keyword; `keyword_index` keeps ids unique across keywords
    fn query_keyword(&self, keyword: &str, keyword_index: usize, stamp: i64) -> Vec<ResearchDocument> {
        let mut rng = rand::rng();
        (0..self.results_per_keyword)
            .map(|i| {
                let abstract_text = format!(
                    "This paper investigates the latest developments in {keyword} from 2023-2024. \
                     We found significant results related to {keyword} that have implications \
                     for future research and applications."
                );
                ResearchDocument {
                    id: format!("doc_{}_{}_{}", stamp, keyword_index, i),
                    title: format!("Research on {}: Advances and Implications", title_case(keyword)),
                    authors: vec![
                        "J. Smith".to_string(),
                        "A. Johnson".to_string(),
                        "M. Williams".to_string(),
                    ],
                    publication_date: format!(
                        "202{}-{:02}",
                        rng.random_range(3..=4),
                        rng.random_range(1..=12)
                    ),
                    source: JOURNALS.choose(&mut rng).copied().unwrap_or("Nature").to_string(),
                    content: abstract_text.clone(),
                    abstract_text,
                    url: Some(format!(
                        "https://example.com/papers/{}{}",
                        keyword.replace(' ', "_"),
                        i
                    )),
                    citation: None,
                    relevance_score: Some(rng.random_range(0.7..0.99)),
                }
            })
            .collect()
    }
}

#[async_trait]
impl DocumentSource for MockAcademicSearch {
    fn name(&self) -> &'static str {
        "academic-search"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ResearchDocument>> {
        let stamp = chrono::Utc::now().timestamp();
        let documents: Vec<ResearchDocument> = request
            .keywords
            .iter()
            .take(self.max_keywords)
            .enumerate()
            .flat_map(|(k, keyword)| self.query_keyword(keyword, k, stamp))
            .collect();
        tracing::info!(
            "[ACADEMIC] {} results for keywords {:?}",
            documents.len(),
            request.keywords.iter().take(self.max_keywords).collect::<Vec<_>>()
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_only_first_three_keywords_are_searched() {
        let request = SearchRequest {
            query: "q".to_string(),
            keywords: ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let docs = MockAcademicSearch::default().search(&request).await.unwrap();
        assert_eq!(docs.len(), 9);

        let ids: HashSet<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), 9, "document ids must be unique across keywords");
        assert!(docs.iter().all(|d| !d.title.contains("D:")));
    }

    #[test]
    fn test_result_fields_stay_in_range() {
        let docs = MockAcademicSearch::new(1, 5).query_keyword("quantum annealing", 0, 42);
        for doc in &docs {
            let score = doc.relevance_score.unwrap();
            assert!((0.7..0.99).contains(&score));
            assert!(doc.publication_date.starts_with("2023-") || doc.publication_date.starts_with("2024-"));
            assert!(JOURNALS.contains(&doc.source.as_str()));
            assert_eq!(doc.title, "Research on Quantum Annealing: Advances and Implications");
        }
        assert_eq!(docs[4].url.as_deref(), Some("https://example.com/papers/quantum_annealing4"));
    }

    #[tokio::test]
    async fn test_ids_unique_with_many_keywords_and_results() {
        let request = SearchRequest {
            query: "q".to_string(),
            keywords: (0..12).map(|k| format!("keyword {}", k)).collect(),
            ..Default::default()
        };
        let docs = MockAcademicSearch::new(12, 12).search(&request).await.unwrap();
        assert_eq!(docs.len(), 144);

        let ids: HashSet<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
        // keyword 1 / result 11 and keyword 11 / result 1 stay distinct
        assert!(docs.iter().any(|d| d.id.ends_with("_1_11")));
        assert!(docs.iter().any(|d| d.id.ends_with("_11_1")));
    }

    #[tokio::test]
    async fn test_no_keywords_no_results() {
        let docs = MockAcademicSearch::default()
            .search(&SearchRequest::default())
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
