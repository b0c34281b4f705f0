use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `EHUB__TENANCY__HOSTNAME`.
pub const ENV_PREFIX: &str = "EHUB";
/// File stem looked up when no explicit path is given (`ehub.toml`, `ehub.json`, ...).
pub const DEFAULT_CONFIG_STEM: &str = "ehub";

/// Custom error type for config loading.
#[ehub_derive::ehub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file with environment overrides on top.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path`, or `ehub.*` in the working directory when `path` is `None`.
///    An explicit path must exist; the implicit default file is optional so a bare
///    checkout still starts with built-in defaults.
/// 2. **Environment Overrides**: variables prefixed with `EHUB__`, nested with double
///    underscores (`EHUB__TENANCY__RESOLVE_DELAY_MS` maps to `tenancy.resolve_delay_ms`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot
/// be parsed, or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use ehub_kernel::config::load_config;
/// use ehub_kernel::domain::config::AppConfig;
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.logging.level, "info");
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_STEM), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    debug!(target_type = std::any::type_name::<T>(), "Config loaded");
    Ok(config)
}
