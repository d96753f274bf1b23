use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

use crate::scroll::{keyset, Page, ValidatedScroll};

use super::{DocumentStore, StoreError};

/// In-process backend with the same observable semantics as [`super::MongoStore`]:
/// case-insensitive substring matching on `name`, `(sort_by, _id)` ordering
/// under BSON comparison rules, and cursor resolution through the anchor
/// document. Selected with `STORE_BACKEND=memory`; the test suite runs
/// against it exclusively.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_matches(doc: &Document, needle: &str) -> bool {
    doc.get_str("name")
        .map(|name| name.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_page(
        &self,
        collection: &str,
        scroll: &ValidatedScroll,
    ) -> Result<Page, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        let docs = match collections.get(collection) {
            Some(docs) => docs,
            None => return Ok(Page::empty(scroll.limit)),
        };

        let anchor = match &scroll.after_id {
            Some(id) => Some(
                docs.iter()
                    .find(|d| d.get_object_id("_id").ok().as_ref() == Some(id))
                    .cloned()
                    .ok_or_else(|| StoreError::CursorNotFound(id.to_hex()))?,
            ),
            None => None,
        };

        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|d| scroll.name.as_deref().map_or(true, |n| name_matches(d, n)))
            .filter(|d| {
                anchor.as_ref().map_or(true, |a| {
                    keyset::cmp_documents(d, a, &scroll.sort_by, scroll.order)
                        == std::cmp::Ordering::Greater
                })
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| keyset::cmp_documents(a, b, &scroll.sort_by, scroll.order));
        matched.truncate(scroll.limit as usize + 1);

        Ok(Page::from_probe(matched, scroll.limit))
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter().find(|d| d.get_object_id("_id").ok().as_ref() == Some(id)).cloned()
        }))
    }

    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        document.insert("_id", id);

        let mut collections = self.collections.write().expect("store lock poisoned");
        collections.entry(collection.to_string()).or_default().push(document);
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &ObjectId,
        set_data: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let docs = match collections.get_mut(collection) {
            Some(docs) => docs,
            None => return Ok(None),
        };

        match docs.iter_mut().find(|d| d.get_object_id("_id").ok().as_ref() == Some(id)) {
            Some(doc) => {
                for (key, value) in set_data {
                    doc.insert(key, value);
                }
                Ok(Some(doc.clone()))
            }
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
