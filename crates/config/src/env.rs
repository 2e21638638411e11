use authormap_common::error::{AuthormapError, AuthormapResult};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub min_confidence: f64,
    pub mailmap_comments: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present; every var has a default.
    pub fn from_env() -> AuthormapResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let min_confidence: f64 = get_var_or("AUTHORMAP_MIN_CONFIDENCE", "0.6")
            .parse()
            .map_err(|e| AuthormapError::Config(format!("invalid AUTHORMAP_MIN_CONFIDENCE: {e}")))?;
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(AuthormapError::Config(format!(
                "AUTHORMAP_MIN_CONFIDENCE must be between 0.0 and 1.0, got {min_confidence}"
            )));
        }

        Ok(Self {
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "8080")
                .parse()
                .map_err(|e| AuthormapError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            min_confidence,
            mailmap_comments: parse_bool("AUTHORMAP_MAILMAP_COMMENTS", "true")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            log_level: "info".to_owned(),
            min_confidence: 0.6,
            mailmap_comments: true,
        }
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_bool(key: &str, default: &str) -> AuthormapResult<bool> {
    match get_var_or(key, default).trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AuthormapError::Config(format!(
            "invalid {key}: expected a boolean, got {other:?}"
        ))),
    }
}
