use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::flatten::FieldSpec;
use crate::params::RequestInput;

pub const CONFIG_FILE_NAME: &str = "httpaccess.json";
pub const PREVIEW_MAX_ROWS: usize = 300;

pub const DEFAULT_URI: &str = "http://jsonplaceholder.typicode.com/users";
pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_HEADER: &str = "Content-Type:application/json;Accept:*/*";

/// Values offered as prompt defaults in preview mode.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestDefaults {
    pub uri: String,
    #[serde(rename = "type")]
    pub method: String,
    pub header: String,
    pub username: String,
    pub body: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            method: DEFAULT_METHOD.to_string(),
            header: DEFAULT_HEADER.to_string(),
            username: String::new(),
            body: String::new(),
        }
    }
}

impl From<&RequestDefaults> for RequestInput {
    fn from(value: &RequestDefaults) -> Self {
        Self {
            uri: value.uri.clone(),
            method: value.method.clone(),
            header: value.header.clone(),
            username: value.username.clone(),
            password: String::new(),
            body: value.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpAccessConfig {
    pub defaults: RequestDefaults,
    pub fields: Vec<FieldSpec>,
    pub preview_max_rows: usize,
    pub debug_params: bool,
}

impl Default for HttpAccessConfig {
    fn default() -> Self {
        Self {
            defaults: RequestDefaults::default(),
            fields: Vec::new(),
            preview_max_rows: PREVIEW_MAX_ROWS,
            debug_params: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: HttpAccessConfig,
    pub path: PathBuf,
}

/// Loads `httpaccess.json` from `target`, which is either the file itself or
/// the directory holding it. A missing file is not an error.
pub fn load_config(target: &Path) -> Result<Option<LoadedConfig>> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        std::env::current_dir()?.join(target)
    };

    let file_path = if resolved.is_dir() {
        resolved.join(CONFIG_FILE_NAME)
    } else {
        resolved
    };

    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&file_path)
        .with_context(|| format!("reading config {}", file_path.display()))?;

    let config: HttpAccessConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", file_path.display()))?;

    Ok(Some(LoadedConfig {
        config,
        path: file_path,
    }))
}
