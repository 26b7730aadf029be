//! Shared test helpers.

use docstack::domain::ports::embedding_port::EmbeddingProvider;
use docstack::infrastructure::embeddings::noop::NoopProvider;
use docstack::Docstack;
use std::sync::Arc;

pub fn setup() -> Docstack {
    Docstack::with_providers(":memory:", "default", Arc::new(NoopProvider)).unwrap()
}

/// Deterministic provider producing fixed-dimension vectors, for tests that
/// need embeddings actually stored.
pub struct FixedProvider {
    pub dim: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for FixedProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        Ok(texts
            .iter()
            .map(|t| {
                let seed = t.len() as f32;
                (0..self.dim).map(|i| seed + i as f32).collect()
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

/// Provider whose vectors disagree on dimension within one batch.
pub struct MixedDimProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for MixedDimProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, _)| vec![0.0; if i % 2 == 0 { 4 } else { 8 }])
            .collect())
    }

    fn dimension(&self) -> usize {
        4
    }
}

/// Provider returning one vector regardless of how many texts were sent.
pub struct MiscountProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for MiscountProvider {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        Ok(vec![vec![0.0; 4]])
    }

    fn dimension(&self) -> usize {
        4
    }
}

/// Provider that always fails, for all-or-nothing ingestion tests.
pub struct FailingProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        Err("provider unavailable".into())
    }

    fn dimension(&self) -> usize {
        0
    }
}
