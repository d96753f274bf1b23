use std::sync::Arc;

use bson::{oid::ObjectId, Document};
use serde_json::Value;

use crate::auth::{Breadcrumb, RequestToken};
use crate::domain::DomainSpec;
use crate::error::ApiError;
use crate::scroll::{Page, ScrollQuery};
use crate::store::DocumentStore;

use super::authorize::{Authorizer, Decision, Operation};

/// Fields the client may never write directly.
const RESTRICTED_FIELDS: &[&str] = &["_id", "created", "saved"];

/// The single choke point between routes and storage, shared by all seven
/// domains. The [`DomainSpec`] decides which operations the router exposes
/// and which audit stamps a write receives; everything else is identical
/// across domains.
pub struct DomainService {
    spec: &'static DomainSpec,
    collection: String,
    store: Arc<dyn DocumentStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl DomainService {
    pub fn new(
        spec: &'static DomainSpec,
        collection: String,
        store: Arc<dyn DocumentStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self { spec, collection, store, authorizer }
    }

    fn authorize(&self, token: &RequestToken, operation: Operation) -> Result<(), ApiError> {
        match self.authorizer.check(token, operation, self.spec) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(ApiError::forbidden(reason)),
        }
    }

    /// One scroll page of this domain's documents. Validation failures and
    /// unknown cursors pass through as client errors; anything the store
    /// trips over surfaces as a generic server error.
    pub async fn list(&self, token: &RequestToken, query: ScrollQuery) -> Result<Page, ApiError> {
        self.authorize(token, Operation::Read)?;

        let scroll = query.validate(self.spec.sort_fields)?;
        let page = self.store.find_page(&self.collection, &scroll).await?;

        tracing::info!(
            "Retrieved {} {} documents (has_more={}) for user {}",
            page.items.len(),
            self.spec.slug,
            page.has_more,
            token.user_id
        );
        Ok(page)
    }

    pub async fn get(&self, token: &RequestToken, id: &str) -> Result<Document, ApiError> {
        self.authorize(token, Operation::Read)?;

        let oid = parse_id(id)?;
        match self.store.get_document(&self.collection, &oid).await? {
            Some(document) => {
                tracing::info!("Retrieved {} {} for user {}", self.spec.slug, id, token.user_id);
                Ok(document)
            }
            None => {
                Err(ApiError::not_found(format!("{} {} not found", self.spec.display_name, id)))
            }
        }
    }

    /// Persist a new document. Any client-supplied `_id` is dropped, and the
    /// audit stamps are injected from the request's breadcrumb: `created`
    /// always, `saved` only for control-style domains.
    pub async fn create(
        &self,
        token: &RequestToken,
        breadcrumb: &Breadcrumb,
        data: Value,
    ) -> Result<ObjectId, ApiError> {
        self.authorize(token, Operation::Create)?;

        let mut document = to_document(data)?;
        document.remove("_id");
        document.insert("created", breadcrumb.to_document());
        if self.spec.style.stamps_saved() {
            document.insert("saved", breadcrumb.to_document());
        }

        let id = self.store.create_document(&self.collection, document).await?;
        tracing::info!("Created {} {} for user {}", self.spec.slug, id.to_hex(), token.user_id);
        Ok(id)
    }

    /// Merge permitted fields into an existing document and restamp `saved`.
    /// A payload touching `_id`, `created`, or `saved` is rejected before any
    /// storage mutation.
    pub async fn update(
        &self,
        token: &RequestToken,
        breadcrumb: &Breadcrumb,
        id: &str,
        data: Value,
    ) -> Result<Document, ApiError> {
        self.authorize(token, Operation::Update)?;

        let oid = parse_id(id)?;
        let mut set_data = to_document(data)?;
        for field in RESTRICTED_FIELDS {
            if set_data.contains_key(field) {
                return Err(ApiError::forbidden(format!("Cannot update {} field", field)));
            }
        }
        set_data.insert("saved", breadcrumb.to_document());

        match self.store.update_document(&self.collection, &oid, set_data).await? {
            Some(document) => {
                tracing::info!("Updated {} {} for user {}", self.spec.slug, id, token.user_id);
                Ok(document)
            }
            None => {
                Err(ApiError::not_found(format!("{} {} not found", self.spec.display_name, id)))
            }
        }
    }
}

fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id)
        .map_err(|_| ApiError::bad_request(format!("'{}' is not a valid document id", id)))
}

fn to_document(data: Value) -> Result<Document, ApiError> {
    match data {
        Value::Object(_) => bson::to_document(&data)
            .map_err(|e| ApiError::bad_request(format!("invalid document body: {}", e))),
        _ => Err(ApiError::bad_request("request body must be a JSON object")),
    }
}
