use serde::{Deserialize, Serialize};
use std::env;

/// Process configuration, constructed once in `main` and injected into the
/// router state. Defaults depend on the deployment environment and every
/// value can be overridden with a specific environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
    pub collections: CollectionsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub connection_string: String,
    pub db_name: String,
}

/// Which `DocumentStore` implementation the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

/// Collection name per domain. The defaults mirror the domain display names;
/// each one can be overridden with `<DOMAIN>_COLLECTION_NAME`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    pub control: String,
    pub create: String,
    pub consume: String,
    pub event: String,
    pub identity: String,
    pub organization: String,
    pub profile: String,
}

impl CollectionsConfig {
    pub fn name_for(&self, slug: &str) -> Option<&str> {
        match slug {
            "control" => Some(&self.control),
            "create" => Some(&self.create),
            "consume" => Some(&self.consume),
            "event" => Some(&self.event),
            "identity" => Some(&self.identity),
            "organization" => Some(&self.organization),
            "profile" => Some(&self.profile),
            _ => None,
        }
    }

    fn defaults() -> Self {
        Self {
            control: "Control".to_string(),
            create: "Create".to_string(),
            consume: "Consume".to_string(),
            event: "Event".to_string(),
            identity: "Identity".to_string(),
            organization: "Organization".to_string(),
            profile: "Profile".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Store overrides
        if let Ok(v) = env::var("STORE_BACKEND") {
            self.store.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                _ => StoreBackend::Mongo,
            };
        }
        if let Ok(v) = env::var("MONGO_CONNECTION_STRING") {
            self.store.connection_string = v;
        }
        if let Ok(v) = env::var("MONGO_DB_NAME") {
            self.store.db_name = v;
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        // Collection overrides
        if let Ok(v) = env::var("CONTROL_COLLECTION_NAME") {
            self.collections.control = v;
        }
        if let Ok(v) = env::var("CREATE_COLLECTION_NAME") {
            self.collections.create = v;
        }
        if let Ok(v) = env::var("CONSUME_COLLECTION_NAME") {
            self.collections.consume = v;
        }
        if let Ok(v) = env::var("EVENT_COLLECTION_NAME") {
            self.collections.event = v;
        }
        if let Ok(v) = env::var("IDENTITY_COLLECTION_NAME") {
            self.collections.identity = v;
        }
        if let Ok(v) = env::var("ORGANIZATION_COLLECTION_NAME") {
            self.collections.organization = v;
        }
        if let Ok(v) = env::var("PROFILE_COLLECTION_NAME") {
            self.collections.profile = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig { port: 8580, enable_request_logging: true },
            store: StoreConfig {
                backend: StoreBackend::Mongo,
                connection_string: "mongodb://localhost:27017".to_string(),
                db_name: "mentorhub_dev".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: "dev-only-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            collections: CollectionsConfig::defaults(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig { port: 8580, enable_request_logging: true },
            store: StoreConfig {
                backend: StoreBackend::Mongo,
                connection_string: "mongodb://localhost:27017".to_string(),
                db_name: "mentorhub_staging".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(), // must come from JWT_SECRET
                jwt_expiry_hours: 24,
            },
            collections: CollectionsConfig::defaults(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig { port: 8580, enable_request_logging: false },
            store: StoreConfig {
                backend: StoreBackend::Mongo,
                connection_string: "mongodb://localhost:27017".to_string(),
                db_name: "mentorhub".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(), // must come from JWT_SECRET
                jwt_expiry_hours: 4,
            },
            collections: CollectionsConfig::defaults(),
        }
    }
}
