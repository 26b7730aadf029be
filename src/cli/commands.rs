use crate::domain::entities::document::DocumentInput;
use crate::domain::error::DomainError;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docstack", about = "Keyword document retriever with full-text ranking")]
pub struct Cli {
    /// Collection to operate on (defaults to $DOCSTACK_COLLECTION, then "default")
    #[arg(long)]
    pub collection: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database schema and the collection if they do not exist
    Init,
    /// Ingest documents from JSON: an object or array of {content, metadata}
    Add {
        json: String,
    },
    /// Keyword search returning full documents, best match first
    Search {
        text: String,
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Print (id, normalized rank) pairs instead of full documents
        #[arg(long)]
        ranks: bool,
    },
    /// Fetch a single document by id
    Get {
        id: String,
    },
    /// Store counts
    Stats,
}

/// Parses the `add` payload: a single {content, metadata} object or an array
/// of them.
pub fn parse_inputs(json: &str) -> Result<Vec<DocumentInput>, DomainError> {
    let data: serde_json::Value =
        serde_json::from_str(json).map_err(|e| DomainError::Parse(e.to_string()))?;
    if data.is_array() {
        serde_json::from_value(data).map_err(|e| DomainError::Parse(e.to_string()))
    } else {
        serde_json::from_value(data)
            .map(|input| vec![input])
            .map_err(|e| DomainError::Parse(e.to_string()))
    }
}
