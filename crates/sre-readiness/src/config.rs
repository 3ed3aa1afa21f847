use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use readiness_spec::SurveySchema;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const CONFIG_ENV: &str = "SRE_READINESS_CONFIG";
pub const DEFAULT_ORIGIN: &str = "default";
pub const DEFAULT_RECIPIENT: &str = "sre-team@example.com";

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub origin: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub recipient: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Command-line values; these win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub origin: Option<String>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub origin: String,
    pub state_dir: PathBuf,
    pub schema: SurveySchema,
    pub recipient: String,
    pub base_url: Option<Url>,
}

impl Settings {
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = match config_path(overrides.config.as_deref()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                FileConfig::load(&path)?
            }
            None => FileConfig::default(),
        };
        Self::from_parts(file, overrides)
    }

    pub fn from_parts(file: FileConfig, overrides: &Overrides) -> Result<Self> {
        let origin = overrides
            .origin
            .clone()
            .or(file.origin)
            .filter(|origin| !origin.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        let state_dir = match overrides.state_dir.clone().or(file.state_dir) {
            Some(dir) => dir,
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| anyhow!("no home directory found; pass --state-dir"))?,
        };

        let schema = match &file.schema {
            Some(path) => load_schema(path)?,
            None => SurveySchema::canonical(),
        };

        let base_url = file
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid base_url '{raw}'")))
            .transpose()?;

        Ok(Self {
            origin,
            state_dir,
            schema,
            recipient: file
                .recipient
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            base_url,
        })
    }
}

/// Loads a schema file, TOML when the extension says so and JSON otherwise.
pub fn load_schema(path: &Path) -> Result<SurveySchema> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let schema: SurveySchema = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .with_context(|| format!("invalid schema {}", path.display()))?,
        _ => serde_json::from_str(&raw)
            .with_context(|| format!("invalid schema {}", path.display()))?,
    };
    schema
        .validate()
        .with_context(|| format!("schema {} failed validation", path.display()))?;
    Ok(schema)
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(raw) = env::var_os(CONFIG_ENV).filter(|raw| !raw.is_empty()) {
        return Some(PathBuf::from(raw));
    }
    let default = project_dirs()?.config_dir().join("config.toml");
    default.is_file().then_some(default)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "sre-readiness")
}
