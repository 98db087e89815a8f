use crate::error::{GhbarError, Result};
use crate::model::RepoTarget;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONTRIBUTION_BASE_URL: &str = "https://github.com";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub username: String,
    pub token: String,
    pub contribution_output: Option<PathBuf>,
    pub contribution_users: Vec<String>,
    pub contribution_base_url: String,
    pub pull_targets: Vec<RepoTarget>,
    pub release_targets: Vec<RepoTarget>,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Read a `KEY=VALUE` file. A missing file yields an empty configuration;
    /// relative paths inside it resolve against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let entries = match std::fs::read_to_string(path) {
            Ok(text) => parse_env(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config file at {}", path.display());
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Self::from_entries(&entries, &base_dir)
    }

    pub fn from_entries(entries: &HashMap<String, String>, base_dir: &Path) -> Result<Self> {
        let get = |key: &str| entries.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let pull_targets = if let Some(file) = get("PR_URLS_FILE") {
            read_targets_file(&base_dir.join(file))?
        } else if let Some(encoded) = get("PR_URLS_BASE64") {
            decode_targets("PR_URLS_BASE64", encoded)?
        } else {
            Vec::new()
        };

        let release_targets = match get("RELEASE_URLS_BASE64") {
            Some(encoded) => decode_targets("RELEASE_URLS_BASE64", encoded)?,
            None => Vec::new(),
        };

        let timeout = match get("REQUEST_TIMEOUT") {
            Some(raw) => Some(humantime::parse_duration(raw).map_err(|e| {
                GhbarError::Config(format!("Invalid REQUEST_TIMEOUT '{raw}': {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            username: get("USERNAME").unwrap_or_default().to_string(),
            token: get("PERSONAL_ACCESS_TOKEN").unwrap_or_default().to_string(),
            contribution_output: get("CONTRIBUTION_OUTPUT").map(|p| base_dir.join(p)),
            contribution_users: get("CONTRIBUTION_USERS")
                .map(crate::util::split_users)
                .unwrap_or_default(),
            contribution_base_url: get("CONTRIBUTION_BASE_URL")
                .unwrap_or(DEFAULT_CONTRIBUTION_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            pull_targets,
            release_targets,
            timeout,
        })
    }

    pub fn history_path(&self) -> Result<&Path> {
        self.contribution_output
            .as_deref()
            .ok_or_else(|| GhbarError::Config("CONTRIBUTION_OUTPUT is not set".to_string()))
    }
}

/// `.env` next to the running executable, like the scripts it replaces.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
        .unwrap_or_else(|| PathBuf::from(".env"))
}

pub fn parse_env(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .collect()
}

pub fn decode_targets(key: &str, encoded: &str) -> Result<Vec<RepoTarget>> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GhbarError::Config(format!("{key} is not valid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| GhbarError::Config(format!("{key} does not hold a list of {{url, name}}: {e}")))
}

pub fn read_targets_file(path: &Path) -> Result<Vec<RepoTarget>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        GhbarError::Config(format!("Cannot read PR_URLS_FILE {}: {e}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        GhbarError::Config(format!("{} does not hold a list of {{url, name}}: {e}", path.display()))
    })
}
