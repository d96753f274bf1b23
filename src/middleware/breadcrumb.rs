use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::{Breadcrumb, RequestToken};

/// Build the audit breadcrumb for the request and inject it as an extension.
/// Layered inside the auth middleware, so the token extension is already
/// present; services consume the breadcrumb verbatim when stamping
/// `created` / `saved`.
pub async fn attach_breadcrumb(mut request: Request, next: Next) -> Response {
    if let Some(token) = request.extensions().get::<RequestToken>().cloned() {
        let breadcrumb = Breadcrumb::from_request(&token, request.headers());
        request.extensions_mut().insert(breadcrumb);
    }
    next.run(request).await
}
