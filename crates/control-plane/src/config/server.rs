// Server configuration loaded from environment variables.
// Decision: Default to in-memory storage when DATABASE_URL is not set
// Decision: Default to no API prefix

/// Default bind address for the HTTP server
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:9000";

/// Default PostgreSQL pool size
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub http_addr: String,
    /// Route prefix such as "/api" (empty for none)
    pub api_prefix: String,
    /// Origins allowed by CORS; empty disables the CORS layer
    pub cors_allowed_origins: Vec<String>,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// PostgreSQL pool size
    pub database_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            api_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
            database_url: None,
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_addr = get("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());

        // Example: API_PREFIX="/api" results in routes like /api/workshops/
        let api_prefix = get("API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_default();

        // Example: CORS_ALLOWED_ORIGINS="http://localhost:5173,https://app.example.com"
        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let database_url = get("DATABASE_URL");

        let database_max_connections = get("DATABASE_MAX_CONNECTIONS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);

        Self {
            http_addr,
            api_prefix,
            cors_allowed_origins,
            database_url,
            database_max_connections,
        }
    }

    /// Check if this configuration runs without a database
    pub fn is_dev_mode(&self) -> bool {
        self.database_url.is_none()
    }
}

/// Ensure a leading slash and no trailing slash ("api/" -> "/api")
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
