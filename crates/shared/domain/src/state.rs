use crate::tenant::TenantConfig;
use std::sync::Arc;

/// What every view sees of tenant resolution.
///
/// `{None, true}` means "not loaded yet", `{None, false}` means "no such
/// tenant". The two render differently and must never be conflated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionState {
    pub tenant: Option<Arc<TenantConfig>>,
    pub is_loading: bool,
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self::loading()
    }
}

impl ResolutionState {
    #[must_use]
    pub const fn loading() -> Self {
        Self { tenant: None, is_loading: true }
    }

    #[must_use]
    pub const fn resolved(tenant: Arc<TenantConfig>) -> Self {
        Self { tenant: Some(tenant), is_loading: false }
    }

    #[must_use]
    pub const fn not_found() -> Self {
        Self { tenant: None, is_loading: false }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.tenant.is_some()
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.tenant.is_none() && !self.is_loading
    }

    #[must_use]
    pub fn tenant(&self) -> Option<&TenantConfig> {
        self.tenant.as_deref()
    }
}
