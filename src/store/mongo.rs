use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};

use crate::config::StoreConfig;
use crate::scroll::{keyset, Page, ValidatedScroll};

use super::{DocumentStore, StoreError};

/// Production backend over the MongoDB driver.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(&config.connection_string)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { db: client.database(&config.db_name) })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_page(
        &self,
        collection: &str,
        scroll: &ValidatedScroll,
    ) -> Result<Page, StoreError> {
        let coll = self.collection(collection);

        // Resolve the cursor to its anchor document so the keyset predicate
        // can compare against the anchor's actual sort value.
        let anchor = match &scroll.after_id {
            Some(id) => Some(
                coll.find_one(doc! { "_id": *id }, None)
                    .await?
                    .ok_or_else(|| StoreError::CursorNotFound(id.to_hex()))?,
            ),
            None => None,
        };

        let filter = keyset::find_filter(scroll, anchor.as_ref());
        let options = FindOptions::builder()
            .sort(keyset::sort_document(scroll))
            .limit(scroll.limit + 1)
            .build();

        let docs: Vec<Document> = coll.find(filter, options).await?.try_collect().await?;
        Ok(Page::from_probe(docs, scroll.limit))
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(doc! { "_id": *id }, None).await?)
    }

    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Query("insert did not return an ObjectId".to_string()))
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &ObjectId,
        set_data: Document,
    ) -> Result<Option<Document>, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection(collection)
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_data }, options)
            .await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
