use crate::tenant::{DomainStatus, TenantConfig};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Default artificial latency of the registry lookup, in milliseconds.
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 500;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub tenancy: TenancyConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Tenant registry seed and resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Hostname to resolve when the host application has no browsing context.
    pub hostname: Option<String>,
    pub resolve_delay_ms: u64,
    pub tenants: Vec<TenantRecord>,
}

/// A registry entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantRecord {
    #[serde(flatten)]
    pub config: TenantConfig,
    #[serde(default)]
    pub status: DomainStatus,
    #[serde(default)]
    pub admin_email: Option<String>,
}

impl TenantRecord {
    #[must_use]
    pub fn active(config: TenantConfig) -> Self {
        Self { config, status: DomainStatus::Active, admin_email: None }
    }
}

/// Logger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Module-directed filter such as `ehub_tenancy=debug`.
    pub env_filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

// --- Default ---

impl Default for TenancyConfig {
    fn default() -> Self {
        Self { hostname: None, resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS, tenants: Vec::new() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), env_filter: None, path: None, json: false, max_files: 10 }
    }
}
