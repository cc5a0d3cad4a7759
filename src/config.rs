use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::{DEFAULT_ENDPOINT, DEFAULT_MODELS};
use crate::error::{Result, StackError};
use crate::search::DEFAULT_THRESHOLD;

/// Environment variable holding the default generative-API credential.
pub const API_KEY_ENV: &str = "GOOGLE_AI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub ai: AiConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("STACKREF_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let path = dirs::config_dir()
            .ok_or_else(|| StackError::MissingConfig("config directory not found".to_string()))?
            .join("stackref/config.toml");
        Self::load_patch(&path)
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join("config.toml");
        Self::load_patch(&path)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| StackError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| StackError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.ai {
            self.ai.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_f64("STACKREF_SEARCH_THRESHOLD")? {
            self.search.threshold = value;
        }
        if let Some(value) = env_usize("STACKREF_SEARCH_LIMIT")? {
            self.search.default_limit = value;
        }

        if let Some(value) = env_bool("STACKREF_AI_ENABLED") {
            self.ai.enabled = value;
        }
        if let Some(value) = env_string(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.ai.api_key = Some(value);
        }
        if let Some(value) = env_string("STACKREF_AI_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.ai.api_key = Some(value);
        }
        if let Some(value) = env_string("STACKREF_AI_ENDPOINT") {
            self.ai.endpoint = value;
        }
        if let Some(values) = env_list("STACKREF_AI_MODELS")? {
            self.ai.models = dedup_models(values);
        }
        if let Some(value) = env_u64("STACKREF_AI_TIMEOUT_SECS")? {
            self.ai.timeout_secs = value;
        }
        if let Some(value) = env_string("STACKREF_AI_CREDENTIAL_STORE") {
            self.ai.credential_store = value.parse()?;
        }
        if let Some(value) = env_string("STACKREF_AI_CREDENTIAL_PATH") {
            self.ai.credential_path = Some(PathBuf::from(value));
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.threshold) {
            return Err(StackError::Config(format!(
                "search.threshold must be within 0..=1 (got {})",
                self.search.threshold
            )));
        }
        if self.search.default_limit == 0 {
            return Err(StackError::Config(
                "search.default_limit must be at least 1".to_string(),
            ));
        }
        if self.ai.timeout_secs == 0 {
            return Err(StackError::Config(
                "ai.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Normalized edit-distance tolerance for a token match.
    pub threshold: f64,
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            default_limit: 5,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.threshold {
            self.threshold = value;
        }
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
    }
}

/// Where a validated credential is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStoreKind {
    #[default]
    File,
    Keyring,
    Memory,
}

impl CredentialStoreKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Keyring => "keyring",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for CredentialStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialStoreKind {
    type Err = StackError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" | "none" => Ok(Self::Memory),
            _ => Err(StackError::Config(format!(
                "invalid credential store {value} (expected file|keyring|memory)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    /// Default credential tried at startup. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub models: Vec<String>,
    pub timeout_secs: u64,
    pub credential_store: CredentialStoreKind,
    pub credential_path: Option<PathBuf>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            models: DEFAULT_MODELS.iter().map(ToString::to_string).collect(),
            timeout_secs: 8,
            credential_store: CredentialStoreKind::File,
            credential_path: None,
        }
    }
}

impl AiConfig {
    fn merge(&mut self, patch: AiPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.api_key {
            self.api_key = Some(value);
        }
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
        if let Some(value) = patch.models {
            self.models = dedup_models(value);
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
        if let Some(value) = patch.credential_store {
            self.credential_store = value;
        }
        if let Some(value) = patch.credential_path {
            self.credential_path = Some(value);
        }
    }

    /// Credential file location, defaulting to `<root>/credentials.json`.
    pub fn credential_file(&self, root: &Path) -> PathBuf {
        self.credential_path
            .clone()
            .unwrap_or_else(|| root.join("credentials.json"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub search: Option<SearchPatch>,
    pub ai: Option<AiPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub threshold: Option<f64>,
    pub default_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AiPatch {
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub models: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub credential_store: Option<CredentialStoreKind>,
    pub credential_path: Option<PathBuf>,
}

fn dedup_models(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            StackError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            StackError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<f64>().map(Some).map_err(|err| {
            StackError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Result<Option<Vec<String>>> {
    match std::env::var(key) {
        Ok(value) => {
            let list = value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            Ok(Some(list))
        }
        Err(_) => Ok(None),
    }
}
