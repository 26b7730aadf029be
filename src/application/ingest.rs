use crate::domain::entities::document::{Document, DocumentInput};
use crate::domain::error::DomainError;
use crate::domain::ports::document_repository::DocumentRepository;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use std::sync::Arc;

/// Document ingestion: one batch embedding call, then one transactional
/// multi-row insert. Any failure leaves the store untouched.
pub struct IngestUseCase {
    repo: Arc<dyn DocumentRepository>,
    embedder: Arc<dyn EmbeddingProvider>,
    collection_id: String,
}

impl IngestUseCase {
    pub fn new(
        repo: Arc<dyn DocumentRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        collection_id: String,
    ) -> Self {
        Self {
            repo,
            embedder,
            collection_id,
        }
    }

    pub async fn execute(&self, inputs: Vec<DocumentInput>) -> Result<Vec<Document>, DomainError> {
        if inputs.is_empty() {
            return Ok(vec![]);
        }

        let texts: Vec<String> = inputs.iter().map(|i| i.content.clone()).collect();
        let vectors = self
            .embedder
            .embed(&texts)
            .await
            .map_err(DomainError::Embedding)?;
        if vectors.len() != inputs.len() {
            return Err(DomainError::Embedding(format!(
                "Provider returned {} vectors for {} documents",
                vectors.len(),
                inputs.len()
            )));
        }

        // All non-empty vectors in a batch must agree on dimension.
        let mut dim: Option<usize> = None;
        for v in vectors.iter().filter(|v| !v.is_empty()) {
            match dim {
                None => dim = Some(v.len()),
                Some(d) if d != v.len() => {
                    return Err(DomainError::InvalidInput(format!(
                        "Mixed embedding dimensions in batch: {} vs {}",
                        d,
                        v.len()
                    )));
                }
                Some(_) => {}
            }
        }

        let documents: Vec<Document> = inputs
            .into_iter()
            .zip(vectors)
            .map(|(input, vector)| {
                Document::new(
                    self.collection_id.clone(),
                    input.content,
                    input.metadata,
                    (!vector.is_empty()).then_some(vector),
                )
            })
            .collect();

        self.repo.insert_batch(&documents)?;
        Ok(documents)
    }
}
