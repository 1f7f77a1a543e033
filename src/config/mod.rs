//! Configuration: the config file, DSN masking, version requirements and
//! the terminology dictionary.

mod dict;
mod dsn;
mod settings;
mod version;

pub use dict::Dict;
pub use dsn::{mask_dsn, DsnError, PASSWORD_MASK};
pub use settings::{
    expand_env_vars, Config, ConfigError, ConfigResult, DetectVirtualRelations, CONFIG_ENV_VAR,
    CONFIG_FILE_NAMES,
};
pub use version::{check_version, Version, VersionError, VersionResult};
