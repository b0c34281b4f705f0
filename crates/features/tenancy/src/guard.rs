//! Pure mapping from [`ResolutionState`] to what a layout renders.

use ehub_domain::constants::{ADMIN_PREFIX, STAGE_PREFIX, SUPER_ADMIN_PREFIX};
use ehub_domain::state::ResolutionState;
use ehub_domain::tenant::TenantConfig;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBranch {
    Loading,
    /// Public surface without a tenant.
    NotFound,
    /// Admin surface without a tenant.
    AccessDenied,
    Content(Arc<TenantConfig>),
    /// Domain-independent console; carries the tenant when the host has one.
    SuperAdmin(Option<Arc<TenantConfig>>),
    /// Full-screen stage display. Rendered with or without a tenant, even while loading.
    Stage(Option<Arc<TenantConfig>>),
}

impl RenderBranch {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Loading => "Loading...",
            Self::NotFound => "Domain Not Found",
            Self::AccessDenied => "Access Denied",
            Self::Content(_) | Self::SuperAdmin(_) | Self::Stage(_) => "",
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "This domain is not configured in our system.",
            Self::AccessDenied => "This admin panel is not accessible.",
            Self::Loading | Self::Content(_) | Self::SuperAdmin(_) | Self::Stage(_) => "",
        }
    }

    /// Whether the real page tree is rendered.
    #[must_use]
    pub const fn renders_content(&self) -> bool {
        matches!(self, Self::Content(_) | Self::SuperAdmin(_) | Self::Stage(_))
    }

    #[must_use]
    pub fn tenant(&self) -> Option<&TenantConfig> {
        match self {
            Self::Content(tenant) | Self::SuperAdmin(Some(tenant)) | Self::Stage(Some(tenant)) => {
                Some(tenant)
            },
            _ => None,
        }
    }
}

#[must_use]
pub fn public_branch(state: &ResolutionState) -> RenderBranch {
    if state.is_loading {
        return RenderBranch::Loading;
    }
    state.tenant.clone().map_or(RenderBranch::NotFound, RenderBranch::Content)
}

/// Admin layout guard. `/super-admin` routes do not need a tenant.
#[must_use]
pub fn admin_branch(state: &ResolutionState, path: &str) -> RenderBranch {
    if state.is_loading {
        return RenderBranch::Loading;
    }
    if has_prefix(path, SUPER_ADMIN_PREFIX) {
        return RenderBranch::SuperAdmin(state.tenant.clone());
    }
    state.tenant.clone().map_or(RenderBranch::AccessDenied, RenderBranch::Content)
}

/// Stage displays sit outside both layouts and never wait for or require a tenant.
#[must_use]
pub fn stage_branch(state: &ResolutionState) -> RenderBranch {
    RenderBranch::Stage(state.tenant.clone())
}

/// Top-level route groups of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Public,
    Admin,
    SuperAdmin,
    /// Full-screen stage display.
    Stage,
}

impl Route {
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if has_prefix(path, SUPER_ADMIN_PREFIX) {
            Self::SuperAdmin
        } else if has_prefix(path, ADMIN_PREFIX) {
            Self::Admin
        } else if has_prefix(path, STAGE_PREFIX) {
            Self::Stage
        } else {
            Self::Public
        }
    }
}

/// Branch for any path, routing it through the matching layout guard.
#[must_use]
pub fn branch_for(path: &str, state: &ResolutionState) -> RenderBranch {
    match Route::classify(path) {
        Route::Public => public_branch(state),
        Route::Stage => stage_branch(state),
        Route::Admin | Route::SuperAdmin => admin_branch(state, path),
    }
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
}
