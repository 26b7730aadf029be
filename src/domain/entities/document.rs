use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document: text content plus arbitrary JSON metadata and an
/// optional embedding vector. The embedding is absent when the configured
/// provider returns nothing (e.g. the no-op provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub collection_id: String,
    pub content: String,
    pub metadata: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        collection_id: String,
        content: String,
        metadata: serde_json::Value,
        embedding: Option<Vec<f32>>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            collection_id,
            content,
            metadata,
            embedding,
            created_at: Utc::now(),
        }
    }
}

/// Ingestion input: what the caller supplies before ids, timestamps and
/// embeddings are attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    pub content: String,
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,
}

fn default_metadata() -> serde_json::Value {
    serde_json::json!({})
}

impl DocumentInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: default_metadata(),
        }
    }

    pub fn with_metadata(content: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}
