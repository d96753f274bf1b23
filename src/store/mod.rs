//! Document store seam.
//!
//! Services talk to storage through the [`DocumentStore`] trait only. The
//! production backend is MongoDB ([`MongoStore`]); the in-memory backend
//! ([`MemoryStore`]) implements the same observable semantics for local
//! development and the test suite.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::scroll::{Page, ValidatedScroll};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A syntactically valid cursor that no stored document carries. Carries
    /// the hex cursor value for the client-facing message.
    #[error("cursor {0} does not match a stored document")]
    CursorNotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Thin pass-through to the document database, one method per storage
/// operation the services need.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one page of `collection` under the validated scroll parameters.
    /// Resolves the cursor to its anchor document first; a cursor that no
    /// document carries fails with [`StoreError::CursorNotFound`].
    async fn find_page(
        &self,
        collection: &str,
        scroll: &ValidatedScroll,
    ) -> Result<Page, StoreError>;

    async fn get_document(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    /// Persist a new document, generating its `_id`. Returns the new id.
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, StoreError>;

    /// `$set`-merge `set_data` into the document with the given id and return
    /// the post-image, or `None` when no such document exists.
    async fn update_document(
        &self,
        collection: &str,
        id: &ObjectId,
        set_data: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Construct the configured store backend.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StoreBackend::Mongo => Ok(Arc::new(MongoStore::connect(config).await?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
