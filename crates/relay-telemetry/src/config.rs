//! Arize exporter configuration.

const DEFAULT_ENDPOINT: &str = "https://otlp.arize.com/v1/traces";
const DEFAULT_SPACE_ID: &str = "U3BhY2U6MjM1MzY6d2g5Tg==";
const DEFAULT_PROJECT_NAME: &str = "relay retro";

/// Arize OTLP exporter configuration.
///
/// The API key has no embedded default: when unset the exporter sends
/// without an `authorization` header and telemetry is degraded, which the
/// caller is expected to warn about.
#[derive(Clone)]
pub struct ArizeConfig {
    pub endpoint: String,
    pub space_id: String,
    pub api_key: Option<String>,
    pub project_name: String,
}

impl std::fmt::Debug for ArizeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArizeConfig")
            .field("endpoint", &self.endpoint)
            .field("space_id", &self.space_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("project_name", &self.project_name)
            .finish()
    }
}

impl ArizeConfig {
    /// Read configuration from `ARIZE_*` environment variables, falling
    /// back to the embedded defaults for everything but the API key.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |v: String| if v.is_empty() { None } else { Some(v) };
        Self {
            endpoint: lookup("ARIZE_OTLP_ENDPOINT")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            space_id: lookup("ARIZE_SPACE_ID")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_SPACE_ID.to_string()),
            api_key: lookup("ARIZE_API_KEY").and_then(non_empty),
            project_name: lookup("ARIZE_PROJECT_NAME")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        }
    }
}

impl Default for ArizeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
