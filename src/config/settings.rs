//! TOML configuration for schemadoc.
//!
//! The config file (`schemadoc.toml` or `.schemadoc.toml`) holds the filter
//! settings, relation detection, the version requirement and the annotation
//! document. Environment variables are expanded in `dsn` and `doc_path`.
//!
//! Example configuration:
//! ```toml
//! dsn = "pg://app:${PG_PASSWORD}@localhost:5432/app"
//! doc_path = "docs/schema"
//! required_version = ">= 0.1, < 1"
//!
//! include = ["*"]
//! exclude = ["schema_migrations"]
//! distance = 1
//! name = "mydatabase"   # annotations, see `crate::annotation`
//!
//! [detect_virtual_relations]
//! enabled = true
//! strategy = "default"
//!
//! [dict]
//! Indexes = "INDEX"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dict::Dict;
use super::dsn::{mask_dsn, DsnError};
use crate::annotation::Annotations;
use crate::filter::TableFilter;
use crate::inference::{select_naming_strategy, NamingResult, NamingStrategy};

/// Conventional config file names, in the order they are reported.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".schemadoc.toml", "schemadoc.toml"];

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SCHEMADOC_CONFIG";

/// Error type for configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("duplicate config file [{}]", .0.join(", "))]
    DuplicateConfig(Vec<String>),

    #[error(transparent)]
    Dsn(#[from] DsnError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Connection string (supports ${ENV_VAR} expansion).
    pub dsn: String,

    /// Output directory for generated documents.
    pub doc_path: String,

    /// Version constraint the running binary must satisfy.
    pub required_version: String,

    /// Table name patterns to keep.
    pub include: Vec<String>,

    /// Table name patterns to drop.
    pub exclude: Vec<String>,

    /// Labels selecting tables. Set from the command line, never from the file.
    #[serde(skip)]
    pub include_labels: Vec<String>,

    /// Relation hops to follow from the selected tables.
    pub distance: usize,

    /// Naming-convention relation detection.
    pub detect_virtual_relations: DetectVirtualRelations,

    /// Terminology substitutions.
    pub dict: Dict,

    /// Schema rename, declared relations and comment overrides.
    #[serde(flatten)]
    pub annotations: Annotations,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dsn: String::new(),
            doc_path: "dbdoc".to_string(),
            required_version: String::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            include_labels: Vec::new(),
            distance: 0,
            detect_virtual_relations: DetectVirtualRelations::default(),
            dict: Dict::default(),
            annotations: Annotations::default(),
        }
    }
}

/// Relation detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectVirtualRelations {
    /// Add relations inferred from column names.
    pub enabled: bool,

    /// Naming strategy name.
    pub strategy: String,
}

impl Default for DetectVirtualRelations {
    fn default() -> Self {
        Self {
            enabled: false,
            strategy: "default".to_string(),
        }
    }
}

impl DetectVirtualRelations {
    /// Resolve the configured strategy.
    pub fn naming_strategy(&self) -> NamingResult<&'static dyn NamingStrategy> {
        select_naming_strategy(&self.strategy)
    }
}

impl Config {
    /// Parse a TOML document and expand environment variables.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.dsn = expand_env_vars(&config.dsn)?;
        config.doc_path = expand_env_vars(&config.doc_path)?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Find the conventional config file in `root`.
    ///
    /// Fails when more than one conventional name is present.
    pub fn discover(root: &Path) -> ConfigResult<Option<PathBuf>> {
        let found: Vec<&str> = CONFIG_FILE_NAMES
            .iter()
            .copied()
            .filter(|name| root.join(name).is_file())
            .collect();

        match found.as_slice() {
            [] => Ok(None),
            [name] => Ok(Some(root.join(name))),
            _ => Err(ConfigError::DuplicateConfig(
                found.iter().map(|n| n.to_string()).collect(),
            )),
        }
    }

    /// Load the config file conventionally placed in `root`, or defaults.
    pub fn load_from(root: &Path) -> ConfigResult<Self> {
        match Self::discover(root)? {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from the default locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMADOC_CONFIG`
    /// 2. `./.schemadoc.toml` or `./schemadoc.toml`
    /// 3. `~/.config/schemadoc/config.toml`
    pub fn load() -> ConfigResult<Self> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        if let Some(path) = Self::discover(Path::new("."))? {
            return Self::from_file(path);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemadoc").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Config::default())
    }

    /// Table filter described by this configuration.
    pub fn table_filter(&self) -> TableFilter {
        TableFilter::new()
            .include(self.include.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .labels(self.include_labels.iter().cloned())
            .distance(self.distance)
    }

    /// The DSN with its password masked.
    pub fn masked_dsn(&self) -> ConfigResult<String> {
        Ok(mask_dsn(&self.dsn)?)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A `$` not followed by a name is kept.
pub fn expand_env_vars(s: &str) -> ConfigResult<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| ConfigError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
