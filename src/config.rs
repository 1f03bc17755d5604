use std::env;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "REQTIX_GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "REQTIX_GEMINI_BASE_URL";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const CONFIG_DIR_NAME: &str = "reqtix";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl AppConfig {
    /// Resolves settings from the process environment first, then the stored
    /// config file, then built-in defaults. Call `dotenv` before this so that
    /// `.env` values are already part of the environment.
    pub fn load() -> AppResult<Self> {
        // Without a config directory the environment alone must suffice.
        let stored = match config_file_path() {
            Ok(path) => StoredConfig::load_from(&path)?,
            Err(_) => StoredConfig::default(),
        };
        Ok(Self::resolve(|name| env::var(name).ok(), stored))
    }

    pub fn resolve<F>(lookup: F, stored: StoredConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, stored: Option<String>| non_empty(lookup(var)).or(non_empty(stored));

        Self {
            gemini_api_key: pick(API_KEY_VAR, stored.gemini_api_key),
            gemini_model: pick(MODEL_VAR, stored.gemini_model)
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: pick(BASE_URL_VAR, stored.gemini_base_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        }
    }

    /// Applies a `--model` flag. Blank values leave the resolved model alone.
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = non_empty(model) {
            self.gemini_model = model;
        }
        self
    }

    pub fn require_api_key(&self) -> AppResult<&str> {
        self.gemini_api_key.as_deref().ok_or_else(|| {
            AppError::Configuration(format!(
                "{API_KEY_VAR} not set; export it, add it to .env, or run `reqtix config init`"
            ))
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Settings persisted by `reqtix config init`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_base_url: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!(
                    "invalid config file {}: {err}",
                    path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        // `mode` only applies when the file is created.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("unable to determine the user config directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
