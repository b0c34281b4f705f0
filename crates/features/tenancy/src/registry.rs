use crate::error::{TenancyError, TenancyErrorExt};
use crate::resolver::normalize_hostname;
use crate::validate::{validate_brand_name, validate_config};
use ehub_domain::config::TenantRecord;
use ehub_domain::tenant::{DomainStatus, TenantConfig, TenantConfigPatch, TenantId};
use ehub_kernel::safe_nanoid;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// A registered domain with its lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    pub config: Arc<TenantConfig>,
    pub status: DomainStatus,
    pub admin_email: Option<String>,
}

/// Request to onboard a new domain from the super-admin console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDomain {
    pub domain: String,
    pub brand_name: String,
    pub admin_email: Option<String>,
}

/// In-memory directory of tenants keyed by normalized domain.
///
/// A domain maps to at most one tenant. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    entries: Arc<RwLock<FxHashMap<String, DomainEntry>>>,
}

impl DomainRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a registry from configuration records.
    ///
    /// # Errors
    /// [`TenancyError::Validation`] for an invalid record and
    /// [`TenancyError::DuplicateDomain`] when two records share a domain.
    pub fn from_records(
        records: impl IntoIterator<Item = TenantRecord>,
    ) -> Result<Self, TenancyError> {
        let registry = Self::new();
        {
            let mut entries = registry.entries.write();
            for record in records {
                let TenantRecord { mut config, status, admin_email } = record;
                config.domain = normalize_hostname(&config.domain).unwrap_or_default();
                validate_config(&config).context(format!("tenant '{}'", config.id))?;

                if entries.contains_key(&config.domain) {
                    return Err(TenancyError::DuplicateDomain {
                        domain: config.domain,
                        context: Some("seeding registry".into()),
                    });
                }
                entries.insert(
                    config.domain.clone(),
                    DomainEntry { config: Arc::new(config), status, admin_email },
                );
            }
        }

        info!(tenants = registry.len(), "Domain registry seeded");
        Ok(registry)
    }

    /// Registers a new domain as [`DomainStatus::Pending`] with default branding.
    ///
    /// # Errors
    /// [`TenancyError::Validation`] for a malformed domain or blank brand name,
    /// [`TenancyError::DuplicateDomain`] when the domain is taken.
    pub fn register(&self, request: NewDomain) -> Result<TenantId, TenancyError> {
        let domain = normalize_hostname(&request.domain)
            .ok_or_else(|| TenancyError::validation("domain must not be empty"))?;
        validate_brand_name(&request.brand_name)?;

        let config = TenantConfig::new(safe_nanoid!(), domain, request.brand_name.trim());
        validate_config(&config)?;

        let mut entries = self.entries.write();
        if entries.contains_key(&config.domain) {
            return Err(TenancyError::DuplicateDomain { domain: config.domain, context: None });
        }

        let id = config.id.clone();
        info!(domain = %config.domain, %id, "Domain registered");
        entries.insert(
            config.domain.clone(),
            DomainEntry {
                config: Arc::new(config),
                status: DomainStatus::Pending,
                admin_email: request.admin_email,
            },
        );
        Ok(id)
    }

    /// # Errors
    /// [`TenancyError::UnknownDomain`] when the domain is not registered.
    pub fn set_status(&self, domain: &str, status: DomainStatus) -> Result<(), TenancyError> {
        let key = normalize_hostname(domain).unwrap_or_default();
        let mut entries = self.entries.write();
        let entry = entries.get_mut(&key).ok_or_else(|| unknown(domain))?;
        if entry.status != status {
            info!(domain = %key, from = %entry.status, to = %status, "Domain status changed");
            entry.status = status;
        }
        Ok(())
    }

    /// Lays `patch` over the stored config and stores the result as a new snapshot.
    ///
    /// # Errors
    /// [`TenancyError::UnknownDomain`] or [`TenancyError::Validation`].
    pub fn update(
        &self,
        domain: &str,
        patch: &TenantConfigPatch,
    ) -> Result<Arc<TenantConfig>, TenancyError> {
        let key = normalize_hostname(domain).unwrap_or_default();
        let mut entries = self.entries.write();
        let entry = entries.get_mut(&key).ok_or_else(|| unknown(domain))?;

        let next = entry.config.merged(patch);
        validate_config(&next)?;
        entry.config = Arc::new(next);
        Ok(Arc::clone(&entry.config))
    }

    pub fn remove(&self, domain: &str) -> Option<DomainEntry> {
        let key = normalize_hostname(domain)?;
        let removed = self.entries.write().remove(&key);
        if removed.is_some() {
            info!(domain = %key, "Domain removed");
        }
        removed
    }

    /// Looks a domain up in any status. The argument is normalized first.
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<DomainEntry> {
        let key = normalize_hostname(domain)?;
        self.entries.read().get(&key).cloned()
    }

    /// All entries sorted by domain.
    #[must_use]
    pub fn list(&self) -> Vec<DomainEntry> {
        let mut list: Vec<_> = self.entries.read().values().cloned().collect();
        list.sort_by(|a, b| a.config.domain.cmp(&b.config.domain));
        list
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn unknown(domain: &str) -> TenancyError {
    TenancyError::UnknownDomain { domain: domain.to_owned(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, domain: &str, brand: &str) -> TenantRecord {
        TenantRecord::active(TenantConfig::new(id, domain, brand))
    }

    fn new_domain(domain: &str) -> NewDomain {
        NewDomain {
            domain: domain.to_owned(),
            brand_name: "Art Fair".to_owned(),
            admin_email: Some("admin@artfair.example.com".to_owned()),
        }
    }

    #[test]
    fn seeding_normalizes_domains() {
        let registry =
            DomainRegistry::from_records([record("1", "TechFest.example.com:443", "TechFest 2025")])
                .unwrap();
        let entry = registry.get("techfest.example.com").unwrap();
        assert_eq!(entry.config.domain, "techfest.example.com");
        assert_eq!(entry.status, DomainStatus::Active);
    }

    #[test]
    fn seeding_rejects_duplicate_domains() {
        let err = DomainRegistry::from_records([
            record("1", "techfest.example.com", "TechFest 2025"),
            record("2", "TECHFEST.example.com", "Impostor"),
        ])
        .unwrap_err();
        assert!(matches!(err, TenancyError::DuplicateDomain { ref domain, .. } if domain == "techfest.example.com"));
    }

    #[test]
    fn seeding_reports_which_tenant_is_invalid() {
        let err = DomainRegistry::from_records([record("7", "techfest.example.com", " ")])
            .unwrap_err();
        assert_eq!(err.kind(), "Validation");
        assert!(err.to_string().contains("tenant '7'"));
    }

    #[test]
    fn register_creates_pending_domain_with_fresh_id() {
        let registry = DomainRegistry::new();
        let id = registry.register(new_domain("ArtFair.example.com")).unwrap();

        let entry = registry.get("artfair.example.com").unwrap();
        assert_eq!(entry.status, DomainStatus::Pending);
        assert_eq!(entry.config.id, id);
        assert_eq!(id.as_str().len(), 12);
        assert_eq!(entry.config.primary_color, "#1e40af");
        assert_eq!(entry.admin_email.as_deref(), Some("admin@artfair.example.com"));

        let again = registry.register(new_domain("artfair.example.com")).unwrap_err();
        assert_eq!(again.kind(), "DuplicateDomain");
    }

    #[test]
    fn register_rejects_blank_input() {
        let registry = DomainRegistry::new();
        assert_eq!(registry.register(new_domain("  ")).unwrap_err().kind(), "Validation");

        let mut request = new_domain("artfair.example.com");
        request.brand_name = String::new();
        assert_eq!(registry.register(request).unwrap_err().kind(), "Validation");
        assert!(registry.is_empty());
    }

    #[test]
    fn status_changes_and_unknown_domains() {
        let registry = DomainRegistry::new();
        registry.register(new_domain("artfair.example.com")).unwrap();

        registry.set_status("artfair.example.com", DomainStatus::Active).unwrap();
        assert_eq!(registry.get("artfair.example.com").unwrap().status, DomainStatus::Active);

        let err = registry.set_status("nowhere.example.com", DomainStatus::Suspended).unwrap_err();
        assert!(matches!(err, TenancyError::UnknownDomain { .. }));
    }

    #[test]
    fn update_swaps_the_snapshot() {
        let registry =
            DomainRegistry::from_records([record("1", "techfest.example.com", "TechFest 2025")])
                .unwrap();
        let before = registry.get("techfest.example.com").unwrap().config;

        let patch =
            TenantConfigPatch { primary_color: Some("#ff0000".to_owned()), ..Default::default() };
        let after = registry.update("techfest.example.com", &patch).unwrap();

        assert_eq!(before.primary_color, "#1e40af");
        assert_eq!(after.primary_color, "#ff0000");
        assert_eq!(after.brand_name, before.brand_name);

        let bad = TenantConfigPatch { primary_color: Some("red".to_owned()), ..Default::default() };
        assert!(registry.update("techfest.example.com", &bad).is_err());
        assert_eq!(registry.get("techfest.example.com").unwrap().config, after);
    }

    #[test]
    fn list_is_sorted_and_remove_works() {
        let registry = DomainRegistry::from_records([
            record("2", "techfest.example.com", "TechFest 2025"),
            record("1", "artfair.example.com", "Art Fair"),
        ])
        .unwrap();

        let domains: Vec<_> = registry.list().into_iter().map(|e| e.config.domain.clone()).collect();
        assert_eq!(domains, ["artfair.example.com", "techfest.example.com"]);

        assert!(registry.remove("artfair.example.com").is_some());
        assert!(registry.remove("artfair.example.com").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clones_share_storage() {
        let registry = DomainRegistry::new();
        let clone = registry.clone();
        clone.register(new_domain("artfair.example.com")).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn context_extension_annotates_errors() {
        let err: Result<(), TenancyError> = Err(unknown("x.example.com"));
        let err = err.context("promoting domain").unwrap_err();
        assert!(err.to_string().contains("(promoting domain)"));
    }
}
