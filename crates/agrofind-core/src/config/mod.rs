use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AgrofindError, Result};
use crate::model::Category;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV_VAR: &str = "AGROFIND_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgrofindConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base path of the remote service. Every operation path (`/health`,
    /// `/search`, `/upload`, `/ingest`) is appended to this.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; a timed-out call fails like a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Category pre-selected in the upload form.
    #[serde(default = "default_upload_category")]
    pub default_category: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_category: default_upload_category(),
        }
    }
}

// -- Defaults --

fn default_base_url() -> String {
    "/api".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_upload_category() -> String {
    "anuncio".to_string()
}

impl AgrofindConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/agrofind/config.toml (global)
    /// 2. .agrofind/config.toml (project)
    /// 3. .agrofind/config.local.toml (local, gitignored)
    ///
    /// `AGROFIND_API_URL` in the environment overrides `api.base_url` from
    /// any layer.
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".agrofind").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".agrofind").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| AgrofindError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| AgrofindError::Config(e.to_string()))?;

        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            if !url.is_empty() {
                cfg.api.base_url = url;
            }
        }

        cfg.validate();
        Ok(cfg)
    }

    /// Load with defaults only (no files, no environment).
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            upload: UploadConfig::default(),
        }
    }

    /// Validate config values, fixing what can be fixed and logging warnings.
    /// Lenient: values are corrected rather than rejected.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.api.timeout_secs == 0 {
            warnings.push("api.timeout_secs = 0, setting to 60".to_string());
            self.api.timeout_secs = 60;
        }

        while self.api.base_url.len() > 1 && self.api.base_url.ends_with('/') {
            self.api.base_url.pop();
        }

        if self.upload.default_category.parse::<Category>().is_err() {
            warnings.push(format!(
                "unknown upload.default_category '{}', using 'anuncio'",
                self.upload.default_category
            ));
            self.upload.default_category = default_upload_category();
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }

    /// The configured default upload category as a typed value.
    pub fn default_category(&self) -> Category {
        self.upload
            .default_category
            .parse()
            .unwrap_or(Category::Anuncio)
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("agrofind").join("config.toml"))
}
