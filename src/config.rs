//! Process settings read from environment variables.
//!
//! Every field has a default, so an empty environment yields a usable
//! (but unconfigured) `Settings`. Variable names are the upper-cased field
//! names: `GROQ_API_KEY`, `LLM_PROVIDER`, `CORS_ORIGINS`, ...

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub groq_api_key: String,
    pub openai_api_key: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "SchemaForge".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            debug: true,
            groq_api_key: String::new(),
            openai_api_key: String::new(),
            llm_provider: "groq".to_string(),
            llm_model: "llama-3.3-70b-versatile".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build settings from an explicit variable map (useful for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut fields = Map::new();

        for key in ["app_name", "app_version", "groq_api_key", "openai_api_key", "llm_provider", "llm_model", "log_level"] {
            if let Some(value) = vars.get(&key.to_uppercase()) {
                fields.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        if let Some(value) = vars.get("DEBUG") {
            let debug = parse_bool(value).with_context(|| format!("invalid DEBUG value: {value}"))?;
            fields.insert("debug".to_string(), Value::Bool(debug));
        }

        if let Some(value) = vars.get("CORS_ORIGINS") {
            let origins = parse_origins(value).context("invalid CORS_ORIGINS value")?;
            fields.insert("cors_origins".to_string(), Value::from(origins));
        }

        let settings = serde_json::from_value(Value::Object(fields))?;
        Ok(settings)
    }

    /// Whether credentials for any model provider are present.
    pub fn is_configured(&self) -> bool {
        !self.groq_api_key.trim().is_empty() || !self.openai_api_key.trim().is_empty()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Accept either a JSON list or a comma-separated string.
/// Entries are trimmed and lose any trailing `/` so they match browser origins.
fn parse_origins(value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();
    let items: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed.split(',').map(str::to_string).collect()
    };

    Ok(items
        .iter()
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_vars(&HashMap::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.llm_provider, "groq");
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_vars(&vars(&[
            ("LLM_PROVIDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("DEBUG", "false"),
        ]))
        .unwrap();
        assert_eq!(settings.llm_provider, "openai");
        assert!(!settings.debug);
        assert!(settings.is_configured());
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let settings = Settings::from_vars(&vars(&[("GROQ_API_KEY", "   ")])).unwrap();
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_cors_comma_separated() {
        let settings = Settings::from_vars(&vars(&[(
            "CORS_ORIGINS",
            "https://example.onrender.com/, http://localhost:3000,,",
        )]))
        .unwrap();
        assert_eq!(
            settings.cors_origins,
            vec!["https://example.onrender.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_cors_json_list() {
        let settings = Settings::from_vars(&vars(&[(
            "CORS_ORIGINS",
            r#"["https://example.onrender.com/"]"#,
        )]))
        .unwrap();
        assert_eq!(settings.cors_origins, vec!["https://example.onrender.com"]);
    }

    #[test]
    fn test_invalid_debug() {
        assert!(Settings::from_vars(&vars(&[("DEBUG", "maybe")])).is_err());
    }
}
