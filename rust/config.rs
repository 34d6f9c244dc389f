use std::env;

const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
const MODEL_ENV_VAR: &str = "OPENAI_MODEL";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Settings for the completion service, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: env::var(BASE_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var(MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

// The key itself is redacted.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_api_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".to_string()),
            ..AppConfig::default()
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<set>"));
    }

    #[test]
    fn defaults_point_at_openai() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
    }
}
