#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Batch text-to-vector conversion. One vector per input, same order.
    /// An empty vector means the provider declined to embed that input.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, String>;

    /// Dimensionality of produced vectors, 0 if the provider embeds nothing.
    fn dimension(&self) -> usize;
}
