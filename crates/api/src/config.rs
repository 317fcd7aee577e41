//! API configuration

use std::env;
use std::path::PathBuf;

use crate::rate_limit::RateLimitConfig;

/// Serving-layer configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,

    /// Path to a previously trained model blob; served untrained if unset
    pub model_path: Option<PathBuf>,

    /// Serve majority-class answers from an untrained model.
    ///
    /// Mirrors the source behavior by default; disable to get 503 instead
    /// of silent all-on-time predictions when no model was loaded.
    pub allow_untrained_fallback: bool,

    /// Per-IP rate limiting
    pub rate_limit: RateLimitConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            model_path: None,
            allow_untrained_fallback: true,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from `DELAY_API_ADDR`, `DELAY_MODEL_PATH` and
    /// `DELAY_ALLOW_UNTRAINED`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("DELAY_API_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(path) = env::var("DELAY_MODEL_PATH") {
            if !path.is_empty() {
                config.model_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(flag) = env::var("DELAY_ALLOW_UNTRAINED") {
            config.allow_untrained_fallback =
                !matches!(flag.as_str(), "0" | "false" | "no" | "off");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.model_path.is_none());
        assert!(config.allow_untrained_fallback);
    }
}
