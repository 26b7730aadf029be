use crate::domain::ports::embedding_port::EmbeddingProvider;

pub struct NoopProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for NoopProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        // Empty vectors signal no embedding available; documents are still
        // stored and keyword-searchable.
        Ok(texts.iter().map(|_| vec![]).collect())
    }

    fn dimension(&self) -> usize {
        0
    }
}
