//! Generic route handlers shared by all domains.
//!
//! The domain behind a request arrives as an `Extension<&'static DomainSpec>`
//! attached by the per-domain router; which of these handlers are reachable
//! for a given path is decided there by the domain's style.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::format;
use crate::auth::{Breadcrumb, RequestToken};
use crate::domain::DomainSpec;
use crate::error::ApiError;
use crate::scroll::ScrollQuery;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub after_id: Option<String>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl From<ListParams> for ScrollQuery {
    fn from(params: ListParams) -> Self {
        let defaults = ScrollQuery::default();
        ScrollQuery {
            name: params.name,
            after_id: params.after_id,
            limit: params.limit.unwrap_or(defaults.limit),
            sort_by: params.sort_by.unwrap_or(defaults.sort_by),
            order: params.order.unwrap_or(defaults.order),
        }
    }
}

/// GET /api/:domain - one scroll page of domain documents
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(spec): Extension<&'static DomainSpec>,
    Extension(token): Extension<RequestToken>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let page = state.domain_service(spec).list(&token, params.into()).await?;
    Ok(Json(format::page_to_json(&page)))
}

/// GET /api/:domain/:id - one document by id
pub async fn get_document(
    State(state): State<AppState>,
    Extension(spec): Extension<&'static DomainSpec>,
    Extension(token): Extension<RequestToken>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let document = state.domain_service(spec).get(&token, &id).await?;
    Ok(Json(format::document_to_json(&document)))
}

/// POST /api/:domain - create a document, respond with the stored result
pub async fn create_document(
    State(state): State<AppState>,
    Extension(spec): Extension<&'static DomainSpec>,
    Extension(token): Extension<RequestToken>,
    Extension(breadcrumb): Extension<Breadcrumb>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = body.map(|Json(value)| value).unwrap_or_else(|| json!({}));

    let service = state.domain_service(spec);
    let id = service.create(&token, &breadcrumb, data).await?;
    // Re-fetch so the response carries the document exactly as stored
    let document = service.get(&token, &id.to_hex()).await?;

    Ok((StatusCode::CREATED, Json(format::document_to_json(&document))))
}

/// PATCH /api/:domain/:id - merge fields into a document
pub async fn update_document(
    State(state): State<AppState>,
    Extension(spec): Extension<&'static DomainSpec>,
    Extension(token): Extension<RequestToken>,
    Extension(breadcrumb): Extension<Breadcrumb>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let data = body.map(|Json(value)| value).unwrap_or_else(|| json!({}));

    let document = state.domain_service(spec).update(&token, &breadcrumb, &id, data).await?;
    Ok(Json(format::document_to_json(&document)))
}
