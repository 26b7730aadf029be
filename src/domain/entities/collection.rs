use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named grouping of documents. Each retriever instance is bound to exactly
/// one collection, resolved at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: String, metadata: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            metadata,
            created_at: Utc::now(),
        }
    }
}
