//! Process environment validation for the relay binary.

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("GEMINI_API_KEY environment variable is required")]
    MissingGeminiKey,
}

/// Credentials pulled from the environment before anything else runs.
///
/// A missing Gemini key is fatal; a missing Arize key only degrades
/// telemetry, so it is surfaced as a flag for the caller to warn about.
pub struct AppEnv {
    pub gemini_api_key: String,
    pub arize_api_key_present: bool,
}

impl std::fmt::Debug for AppEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnv")
            .field("gemini_api_key", &"[REDACTED]")
            .field("arize_api_key_present", &self.arize_api_key_present)
            .finish()
    }
}

impl AppEnv {
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(EnvError::MissingGeminiKey)?;
        let arize_api_key_present = lookup("ARIZE_API_KEY")
            .filter(|v| !v.is_empty())
            .is_some();
        Ok(Self {
            gemini_api_key,
            arize_api_key_present,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(vars: &[(&str, &str)]) -> Result<AppEnv, EnvError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppEnv::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn missing_gemini_key_is_an_error() {
        let result = env_from(&[("ARIZE_API_KEY", "ak-test")]);
        assert!(matches!(result, Err(EnvError::MissingGeminiKey)));
    }

    #[test]
    fn empty_gemini_key_is_an_error() {
        let result = env_from(&[("GEMINI_API_KEY", "")]);
        assert!(matches!(result, Err(EnvError::MissingGeminiKey)));
    }

    #[test]
    fn arize_key_presence_is_reported() {
        let env = env_from(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(env.gemini_api_key, "g-key");
        assert!(!env.arize_api_key_present);

        let env = env_from(&[("GEMINI_API_KEY", "g-key"), ("ARIZE_API_KEY", "ak")]).unwrap();
        assert!(env.arize_api_key_present);
    }

    #[test]
    fn debug_redacts_gemini_key() {
        let env = env_from(&[("GEMINI_API_KEY", "g-secret")]).unwrap();
        let rendered = format!("{env:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("g-secret"));
    }

    #[test]
    fn error_message_names_the_variable() {
        let err = env_from(&[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY environment variable is required"
        );
    }
}
