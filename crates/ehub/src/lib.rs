//! Facade crate for `EventHub` features and shared modules.
//! Re-exports domain/kernel primitives and wires the tenant context from configuration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! use ehub::domain::config::AppConfig;
//! use ehub::features::tenancy::prelude::MemoryDocument;
//! use std::sync::Arc;
//!
//! let config = AppConfig::default();
//! let context = ehub::init(&config, Arc::new(MemoryDocument::new())).unwrap();
//! assert_eq!(ehub::hostname(&config, None), "localhost");
//! # drop(context);
//! ```

pub use ehub_domain as domain;
pub use ehub_kernel as kernel;

use ehub_domain::config::AppConfig;
use ehub_tenancy::context::TenantContext;
use ehub_tenancy::injector::Document;
use ehub_tenancy::resolver::{RegistryResolver, normalize_hostname};
use ehub_tenancy::TenancyError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Feature slices, re-exported under one roof.
pub mod features {
    pub use ehub_tenancy as tenancy;
}

/// Sample configuration shipped with the workspace, relative to its root.
pub const SAMPLE_CONFIG_PATH: &str = "config/ehub.toml";

/// Picks the config file to load: `explicit` if given, otherwise the sample
/// config under `root` when it exists.
///
/// `None` means the kernel's optional `ehub.*` lookup in the working directory applies.
#[must_use]
pub fn config_path(explicit: Option<&Path>, root: &Path) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        let sample = root.join(SAMPLE_CONFIG_PATH);
        sample.is_file().then_some(sample)
    })
}

/// Hostname used when neither the caller nor the config names one.
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Builds a tenant context over the configured registry, rendering into `document`.
///
/// The context is returned uninitialized; the host decides when to resolve.
///
/// # Errors
/// Returns [`TenancyError`] if the configured tenants fail validation.
pub fn init(
    config: &AppConfig,
    document: Arc<dyn Document>,
) -> Result<TenantContext<RegistryResolver>, TenancyError> {
    let resolver = RegistryResolver::from_config(&config.tenancy)?;
    tracing::info!(
        tenants = resolver.registry().len(),
        delay_ms = config.tenancy.resolve_delay_ms,
        "Tenancy initialized"
    );
    Ok(TenantContext::new(resolver, document))
}

/// Picks the hostname to resolve: explicit override, then `tenancy.hostname`,
/// then [`DEFAULT_HOSTNAME`].
#[must_use]
pub fn hostname(config: &AppConfig, explicit: Option<&str>) -> String {
    explicit
        .and_then(normalize_hostname)
        .or_else(|| config.tenancy.hostname.as_deref().and_then(normalize_hostname))
        .unwrap_or_else(|| DEFAULT_HOSTNAME.to_owned())
}
