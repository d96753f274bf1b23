use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Extension, Json, Router};
use serde_json::{json, Map, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::domain::{self, DomainSpec};
use crate::handlers;
use crate::services::{AllowAll, Authorizer, DomainService};
use crate::store::DocumentStore;

/// Everything a request handler needs, constructed once in `main` and cloned
/// per request. No process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store, authorizer: Arc::new(AllowAll) }
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Service instance for one domain, bound to its configured collection.
    pub fn domain_service(&self, spec: &'static DomainSpec) -> DomainService {
        let collection = self
            .config
            .collections
            .name_for(spec.slug)
            .unwrap_or(spec.display_name)
            .to_string();
        DomainService::new(spec, collection, self.store.clone(), self.authorizer.clone())
    }
}

pub fn app(state: AppState) -> Router {
    let mut api = Router::new();
    for spec in domain::DOMAINS {
        api = api.merge(domain_routes(spec));
        tracing::info!("  /api/{} - {} domain endpoints", spec.slug, spec.display_name);
    }

    // Auth first, then the breadcrumb built from the decoded token
    let api = api.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                state.clone(),
                crate::middleware::auth::require_bearer,
            ))
            .layer(middleware::from_fn(crate::middleware::breadcrumb::attach_breadcrumb)),
    );

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected domain API
        .merge(api)
        // Global middleware
        .layer(CorsLayer::permissive());

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Routes for one domain. The style decides which verbs exist; anything else
/// on these paths gets a 405 from the router.
fn domain_routes(spec: &'static DomainSpec) -> Router<AppState> {
    let mut collection = get(handlers::domain::list_documents);
    if spec.style.supports_create() {
        collection = collection.post(handlers::domain::create_document);
    }

    let mut item = get(handlers::domain::get_document);
    if spec.style.supports_update() {
        item = item.patch(handlers::domain::update_document);
    }

    Router::new()
        .route(&format!("/api/{}", spec.slug), collection)
        .route(&format!("/api/{}/:id", spec.slug), item)
        .layer(Extension(spec))
}

async fn root() -> Json<Value> {
    let mut endpoints = Map::new();
    endpoints.insert("home".into(), Value::String("/ (public)".into()));
    endpoints.insert("health".into(), Value::String("/health (public)".into()));
    for spec in domain::DOMAINS {
        let verbs = match (spec.style.supports_create(), spec.style.supports_update()) {
            (true, true) => "POST, GET, PATCH",
            (true, false) => "POST, GET",
            _ => "GET",
        };
        endpoints.insert(
            spec.slug.to_string(),
            Value::String(format!("/api/{}[/:id] (protected - {})", spec.slug, verbs)),
        );
    }

    Json(json!({
        "name": "MentorHub API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Cursor-paginated domain API over MongoDB built with Rust (Axum)",
        "endpoints": endpoints,
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
