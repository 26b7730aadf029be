use crate::domain::entities::collection::Collection;
use crate::domain::entities::document::Document;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct StoreStats {
    pub total_documents: usize,
    pub total_collections: usize,
    pub embedded_count: usize,
}

pub trait DocumentRepository: Send + Sync {
    /// Returns the collection with this name, creating it if absent.
    fn ensure_collection(
        &self,
        name: &str,
        metadata: &serde_json::Value,
    ) -> Result<Collection, DomainError>;

    /// Inserts all documents in a single transaction. All-or-nothing.
    fn insert_batch(&self, documents: &[Document]) -> Result<(), DomainError>;

    /// Full-text match returning (document id, relevance score) pairs,
    /// best first, at most `limit` of them.
    fn search_with_score(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, f64)>, DomainError>;

    /// Resolves ids to full documents, preserving the order of `ids`.
    /// Unknown ids are skipped.
    fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Document>, DomainError>;

    fn get_by_id(&self, id: &str) -> Result<Option<Document>, DomainError>;

    /// Dimension of embeddings already on disk, if any row has one.
    fn stored_dimension(&self) -> Result<Option<usize>, DomainError>;

    fn stats(&self) -> Result<StoreStats, DomainError>;
}
