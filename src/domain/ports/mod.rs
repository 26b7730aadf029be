pub mod document_repository;
pub mod embedding_port;
