use crate::domain::entities::collection::Collection;
use crate::domain::entities::document::Document;
use crate::domain::error::DomainError;
use crate::domain::ports::document_repository::{DocumentRepository, StoreStats};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

const SELECT_COLS: &str = "id, collection_id, content, metadata, embedding, created_at";

pub struct SqliteDocumentRepo {
    conn: Mutex<Connection>,
}

impl SqliteDocumentRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_document(row: &rusqlite::Row) -> Result<Document, rusqlite::Error> {
        let metadata_str: String = row.get(3)?;
        let blob: Option<Vec<u8>> = row.get(4)?;
        let created_str: String = row.get(5)?;

        Ok(Document {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            content: row.get(2)?,
            metadata: serde_json::from_str(&metadata_str)
                .unwrap_or_else(|_| serde_json::json!({})),
            embedding: blob.as_deref().map(deserialize_vector),
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

pub(crate) fn serialize_vector(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub(crate) fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Builds an FTS5 MATCH expression from free text. Tokens are quoted and
/// AND-ed, so every term must appear and FTS5 operator syntax in the input
/// is neutralized. No stopword filtering: connectives like "or" count as
/// terms. Returns None when the text contains no indexable tokens.
pub(crate) fn match_expression(raw: &str) -> Option<String> {
    let tokens: Vec<String> = raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" AND "))
    }
}

impl DocumentRepository for SqliteDocumentRepo {
    fn ensure_collection(
        &self,
        name: &str,
        metadata: &serde_json::Value,
    ) -> Result<Collection, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let existing = conn
            .query_row(
                "SELECT id, name, metadata, created_at FROM collections WHERE name = ?1",
                params![name],
                |row| {
                    let metadata_str: String = row.get(2)?;
                    let created_str: String = row.get(3)?;
                    Ok(Collection {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        metadata: serde_json::from_str(&metadata_str)
                            .unwrap_or_else(|_| serde_json::json!({})),
                        created_at: DateTime::parse_from_rfc3339(&created_str)
                            .map(|dt| dt.with_timezone(&chrono::Utc))
                            .unwrap_or_else(|_| chrono::Utc::now()),
                    })
                },
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if let Some(collection) = existing {
            return Ok(collection);
        }

        let collection = Collection::new(name.to_string(), metadata.clone());
        conn.execute(
            "INSERT INTO collections (id, name, metadata, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                collection.id,
                collection.name,
                serde_json::to_string(&collection.metadata).unwrap_or_default(),
                collection.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to create collection: {e}")))?;
        Ok(collection)
    }

    fn insert_batch(&self, documents: &[Document]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO documents (id, collection_id, content, metadata, embedding, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| DomainError::Database(e.to_string()))?;
            for doc in documents {
                stmt.execute(params![
                    doc.id,
                    doc.collection_id,
                    doc.content,
                    serde_json::to_string(&doc.metadata).unwrap_or_default(),
                    doc.embedding.as_deref().map(serialize_vector),
                    doc.created_at.to_rfc3339(),
                ])
                .map_err(|e| DomainError::Database(format!("Failed to insert document: {e}")))?;
            }
        }
        tx.commit()
            .map_err(|e| DomainError::Database(format!("Insert commit failed: {e}")))
    }

    fn search_with_score(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<(String, f64)>, DomainError> {
        let expr = match match_expression(query) {
            Some(expr) => expr,
            None => return Ok(vec![]),
        };

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        // bm25() is smaller-is-better; negate so higher score means more relevant.
        let mut stmt = conn
            .prepare(
                "SELECT d.id, -bm25(documents_fts) AS score
                 FROM documents_fts
                 JOIN documents d ON d.rowid = documents_fts.rowid
                 WHERE documents_fts MATCH ?1
                 ORDER BY score DESC
                 LIMIT ?2",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let pairs = stmt
            .query_map(params![expr, limit as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|e| DomainError::Database(format!("Search failed: {e}")))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(pairs)
    }

    fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Document>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM documents WHERE id = ?1");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            let doc = stmt
                .query_row(params![id], Self::row_to_document)
                .optional()
                .map_err(|e| DomainError::Database(e.to_string()))?;
            if let Some(doc) = doc {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Document>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sql = format!("SELECT {SELECT_COLS} FROM documents WHERE id = ?1");
        conn.query_row(&sql, params![id], Self::row_to_document)
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let bytes: Option<i64> = conn
            .query_row(
                "SELECT length(embedding) FROM documents WHERE embedding IS NOT NULL LIMIT 1",
                [],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(bytes.map(|b| b as usize / 4))
    }

    fn stats(&self) -> Result<StoreStats, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let total_documents: usize = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let total_collections: usize = conn
            .query_row("SELECT COUNT(*) FROM collections", [], |r| r.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let embedded_count: usize = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE embedding IS NOT NULL",
                [],
                |r| r.get(0),
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(StoreStats {
            total_documents,
            total_collections,
            embedded_count,
        })
    }
}
