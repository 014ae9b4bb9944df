use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub image_mime_type: String,
    /// Unset leaves the HTTP client's own default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            text_model: "gemini-2.5-flash".into(),
            image_model: "imagen-3.0-generate-002".into(),
            image_mime_type: "image/jpeg".into(),
            timeout_secs: None,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Credential from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty());
        if let Some(k) = key {
            self.api_key = k;
        }
    }

    pub fn apply_overrides(&mut self, o: Overrides) {
        if let Some(m) = o.text_model { self.text_model = m; }
        if let Some(m) = o.image_model { self.image_model = m; }
        if o.timeout_secs.is_some() { self.timeout_secs = o.timeout_secs; }
    }

    /// Defaults, then the optional file, then environment, then CLI flags.
    /// Fails when no credential is available.
    pub fn resolve<F>(path: Option<&Path>, lookup: F, overrides: Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        cfg.apply_env(lookup);
        cfg.apply_overrides(overrides);
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(cfg)
    }
}
