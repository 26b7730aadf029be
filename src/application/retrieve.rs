use crate::domain::entities::document::Document;
use crate::domain::error::DomainError;
use crate::domain::ports::document_repository::DocumentRepository;
use crate::domain::values::ranking::normalize_ranks;
use std::sync::Arc;

/// Keyword retrieval: full-text match, rank normalization, then resolution
/// of the ranked ids into full documents.
pub struct RetrieveUseCase {
    repo: Arc<dyn DocumentRepository>,
}

impl RetrieveUseCase {
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    /// Top documents for a query, best match first, at most `limit`.
    pub fn execute(&self, query: &str, limit: usize) -> Result<Vec<Document>, DomainError> {
        let ranking = self.search_with_ranking(query, limit)?;
        let ids: Vec<String> = ranking.into_iter().map(|(id, _)| id).collect();
        let mut docs = self.repo.fetch_by_ids(&ids)?;
        // fetch_by_ids preserves order; the truncate is a defensive bound.
        docs.truncate(limit);
        Ok(docs)
    }

    /// (document id, normalized rank) pairs in relevance order. Equal raw
    /// scores share a rank.
    pub fn search_with_ranking(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, usize)>, DomainError> {
        let scored = self.search_with_score(query, limit)?;
        let scores: Vec<f64> = scored.iter().map(|(_, score)| *score).collect();
        let ranks = normalize_ranks(&scores);
        Ok(scored
            .into_iter()
            .zip(ranks)
            .map(|((id, _), rank)| (id, rank))
            .collect())
    }

    /// Raw (document id, relevance score) pairs from the full-text engine,
    /// descending by score.
    pub fn search_with_score(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, f64)>, DomainError> {
        self.repo.search_with_score(query, limit)
    }
}
