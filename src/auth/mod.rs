use axum::http::HeaderMap;
use bson::{doc, Document};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: impl Into<String>, roles: Vec<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self { sub: user_id.into(), roles, exp, iat: now.timestamp() }
    }
}

/// Caller identity decoded from the JWT, injected as a request extension by
/// the auth middleware and consumed by the services.
#[derive(Debug, Clone)]
pub struct RequestToken {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl From<Claims> for RequestToken {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub, roles: claims.roles }
    }
}

/// Audit record describing who performed an action, when, from where, and
/// under which correlation id. Built once per request and stamped verbatim
/// into `created` / `saved` fields by the services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub at_time: DateTime<Utc>,
    pub by_user: String,
    pub from_ip: String,
    pub correlation_id: String,
}

impl Breadcrumb {
    /// Build the breadcrumb for the current request. The source IP comes from
    /// `X-Forwarded-For` (first hop) and the correlation id from
    /// `X-Correlation-Id`, with a fresh UUID when the caller supplied none.
    pub fn from_request(token: &RequestToken, headers: &HeaderMap) -> Self {
        let from_ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let correlation_id = headers
            .get("x-correlation-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            // BSON datetimes carry millisecond precision; truncate up front so
            // a stamped value round-trips unchanged through the store.
            at_time: Utc::now().trunc_subsecs(3),
            by_user: token.user_id.clone(),
            from_ip,
            correlation_id,
        }
    }

    /// The BSON shape persisted under `created` and `saved`.
    pub fn to_document(&self) -> Document {
        doc! {
            "at_time": bson::DateTime::from_chrono(self.at_time),
            "by_user": &self.by_user,
            "from_ip": &self.from_ip,
            "correlation_id": &self.correlation_id,
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
