pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::ingest::IngestUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::application::stats::StatsUseCase;
use crate::domain::entities::collection::Collection;
use crate::domain::entities::document::{Document, DocumentInput};
use crate::domain::error::DomainError;
use crate::domain::ports::document_repository::{DocumentRepository, StoreStats};
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::infrastructure::embeddings::noop::NoopProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::sqlite::document_repo::SqliteDocumentRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct Docstack {
    collection: Collection,
    retrieve_uc: RetrieveUseCase,
    ingest_uc: IngestUseCase,
    stats_uc: StatsUseCase,
    repo: Arc<dyn DocumentRepository>,
}

impl Docstack {
    /// Opens the store with the embedding provider configured via
    /// environment (`DOCSTACK_EMBEDDING_PROVIDER`, `DOCSTACK_EMBEDDING_API_KEY`,
    /// `DOCSTACK_EMBEDDING_MODEL`).
    pub fn new(db_path: &str, collection_name: &str) -> Result<Self, DomainError> {
        let provider =
            std::env::var("DOCSTACK_EMBEDDING_PROVIDER").unwrap_or_else(|_| "noop".into());
        let api_key = std::env::var("DOCSTACK_EMBEDDING_API_KEY").unwrap_or_default();
        let model = std::env::var("DOCSTACK_EMBEDDING_MODEL").ok();

        let embedder: Arc<dyn EmbeddingProvider> = match provider.as_str() {
            "openai" => Arc::new(OpenAiProvider::new(api_key, model)),
            _ => Arc::new(NoopProvider),
        };

        Self::with_providers(db_path, collection_name, embedder)
    }

    pub fn with_providers(
        db_path: &str,
        collection_name: &str,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let repo: Arc<dyn DocumentRepository> = Arc::new(SqliteDocumentRepo::new(conn));
        let collection = repo.ensure_collection(collection_name, &serde_json::json!({}))?;

        // Embedding dimension is fixed by whatever wrote first; warn when the
        // configured provider disagrees with what is on disk.
        let provider_dim = embedder.dimension();
        if provider_dim > 0 {
            if let Ok(Some(stored_dim)) = repo.stored_dimension() {
                if stored_dim != provider_dim {
                    eprintln!(
                        "WARNING: Stored embeddings have dimension {stored_dim} but the current provider reports {provider_dim}. New documents will not be comparable to existing ones."
                    );
                }
            }
        }

        Ok(Self {
            retrieve_uc: RetrieveUseCase::new(repo.clone()),
            ingest_uc: IngestUseCase::new(repo.clone(), embedder, collection.id.clone()),
            stats_uc: StatsUseCase::new(repo.clone()),
            collection,
            repo,
        })
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    // Delegating methods
    pub fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<Document>, DomainError> {
        self.retrieve_uc.execute(query, limit)
    }

    pub fn search_with_ranking(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, usize)>, DomainError> {
        self.retrieve_uc.search_with_ranking(query, limit)
    }

    pub fn search_with_score(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, f64)>, DomainError> {
        self.retrieve_uc.search_with_score(query, limit)
    }

    pub async fn ingest(&self, inputs: Vec<DocumentInput>) -> Result<Vec<Document>, DomainError> {
        self.ingest_uc.execute(inputs).await
    }

    pub fn get_document(&self, id: &str) -> Result<Option<Document>, DomainError> {
        self.repo.get_by_id(id)
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.stats_uc.stats()
    }
}
