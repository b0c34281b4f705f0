use crate::error::TenancyError;
use crate::registry::DomainRegistry;
use ehub_domain::config::TenancyConfig;
use ehub_domain::tenant::TenantConfig;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

/// Outcome of a lookup that was actually performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(TenantConfig),
    /// No tenant serves this hostname. Expected, not an error.
    NotFound,
}

impl Resolution {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Maps a hostname to the tenant serving it.
///
/// Implementations must not touch the document and must return
/// [`Resolution::NotFound`] for unknown hosts; `Err` is reserved for
/// [`TenancyError::Transport`] failures.
pub trait TenantResolver: Send + Sync {
    fn resolve(
        &self,
        hostname: &str,
    ) -> impl Future<Output = Result<Resolution, TenancyError>> + Send;
}

/// Canonical form of a hostname: trimmed, lowercase, without port or trailing dot.
///
/// Returns `None` when nothing is left, and for bracketed IPv6 literals,
/// which never name a tenant.
///
/// ```rust
/// use ehub_tenancy::resolver::normalize_hostname;
///
/// assert_eq!(normalize_hostname(" TechFest.Example.com.:8080 ").as_deref(), Some("techfest.example.com"));
/// assert_eq!(normalize_hostname(":443"), None);
/// ```
#[must_use]
pub fn normalize_hostname(hostname: &str) -> Option<String> {
    let host = hostname.trim_start();
    if host.starts_with('[') {
        return None;
    }
    let host = host.split_once(':').map_or(host, |(host, _port)| host);
    let host = host.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

/// Resolves against a [`DomainRegistry`] after a fixed delay standing in for a
/// remote lookup. Only active domains are found.
#[derive(Debug, Clone)]
pub struct RegistryResolver {
    registry: DomainRegistry,
    delay: Duration,
}

impl RegistryResolver {
    pub const fn new(registry: DomainRegistry, delay: Duration) -> Self {
        Self { registry, delay }
    }

    /// Seeds the registry from `[tenancy]` configuration.
    ///
    /// # Errors
    /// Propagates [`DomainRegistry::from_records`] failures.
    pub fn from_config(cfg: &TenancyConfig) -> Result<Self, TenancyError> {
        let registry = DomainRegistry::from_records(cfg.tenants.iter().cloned())?;
        Ok(Self::new(registry, Duration::from_millis(cfg.resolve_delay_ms)))
    }

    #[must_use]
    pub const fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl TenantResolver for RegistryResolver {
    #[instrument(level = "debug", skip(self))]
    async fn resolve(&self, hostname: &str) -> Result<Resolution, TenancyError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let Some(domain) = normalize_hostname(hostname) else {
            debug!("Empty hostname");
            return Ok(Resolution::NotFound);
        };

        let resolution = match self.registry.get(&domain) {
            Some(entry) if entry.status.is_servable() => {
                Resolution::Found(entry.config.as_ref().clone())
            },
            Some(entry) => {
                debug!(%domain, status = %entry.status, "Domain registered but not servable");
                Resolution::NotFound
            },
            None => Resolution::NotFound,
        };
        debug!(%domain, found = resolution.is_found(), "Lookup finished");
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ehub_domain::config::TenantRecord;
    use ehub_domain::tenant::DomainStatus;
    use proptest::prelude::*;

    fn registry() -> DomainRegistry {
        let mut pending =
            TenantRecord::active(TenantConfig::new("3", "musicfest.example.com", "MusicFest"));
        pending.status = DomainStatus::Pending;

        DomainRegistry::from_records([
            TenantRecord::active(TenantConfig::new("1", "techfest.example.com", "TechFest 2025")),
            pending,
        ])
        .unwrap()
    }

    #[test]
    fn normalize_strips_port_case_and_trailing_dot() {
        assert_eq!(normalize_hostname("TECHFEST.example.com").as_deref(), Some("techfest.example.com"));
        assert_eq!(normalize_hostname("localhost:5173").as_deref(), Some("localhost"));
        assert_eq!(normalize_hostname("example.com.").as_deref(), Some("example.com"));
        assert_eq!(normalize_hostname("   "), None);
        assert_eq!(normalize_hostname("..."), None);
    }

    #[test]
    fn bracketed_ipv6_literals_are_rejected() {
        assert_eq!(normalize_hostname("[::1]:8080"), None);
        assert_eq!(normalize_hostname(" [2001:db8::1]"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_configured_delay() {
        let resolver = RegistryResolver::new(registry(), Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        let resolution = resolver.resolve("techfest.example.com").await.unwrap();

        assert!(resolution.is_found());
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn found_config_carries_the_normalized_host() {
        let resolver = RegistryResolver::new(registry(), Duration::ZERO);
        let Resolution::Found(config) = resolver.resolve("TechFest.Example.com:443").await.unwrap()
        else {
            panic!("expected techfest to resolve");
        };
        assert_eq!(config.domain, "techfest.example.com");
        assert_eq!(config.brand_name, "TechFest 2025");
    }

    #[tokio::test]
    async fn unknown_and_pending_hosts_are_not_found() {
        let resolver = RegistryResolver::new(registry(), Duration::ZERO);
        assert_eq!(resolver.resolve("unknown.example.com").await.unwrap(), Resolution::NotFound);
        assert_eq!(resolver.resolve("musicfest.example.com").await.unwrap(), Resolution::NotFound);
        assert_eq!(resolver.resolve("").await.unwrap(), Resolution::NotFound);
        assert!(!resolver.resolve("[::1]:443").await.unwrap().is_found());
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(host in "[ A-Za-z0-9.:-]{0,40}") {
            if let Some(once) = normalize_hostname(&host) {
                prop_assert_eq!(normalize_hostname(&once), Some(once.clone()));
                prop_assert!(!once.contains(':'));
                prop_assert!(!once.ends_with('.'));
                prop_assert_eq!(once.to_ascii_lowercase(), once);
            }
        }

        #[test]
        fn port_never_changes_the_host(host in "[a-z][a-z0-9-]{0,10}(\\.[a-z][a-z0-9-]{0,10}){0,3}", port in 1u16..) {
            prop_assert_eq!(normalize_hostname(&format!("{host}:{port}")), normalize_hostname(&host));
        }
    }
}
