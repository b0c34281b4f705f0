//! Tenant feature slice: which tenant serves this hostname, and what it looks like.
//!
//! * [`registry::DomainRegistry`] holds every known domain and its status.
//! * A [`resolver::TenantResolver`] maps a hostname to a [`TenantConfig`](ehub_domain::tenant::TenantConfig).
//! * [`injector::CustomCodeInjector`] is the only writer of tenant CSS/JS into a [`injector::Document`].
//! * [`context::TenantContext`] owns both and publishes [`ResolutionState`](ehub_domain::state::ResolutionState).
//! * [`guard`] turns that state into a render branch.
//!
//! ```rust
//! use ehub_tenancy::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let registry = DomainRegistry::from_records([TenantRecord::active(
//!     TenantConfig::new("1", "techfest.example.com", "TechFest 2025"),
//! )])?;
//! let document = Arc::new(MemoryDocument::new());
//! let context = TenantContext::new(RegistryResolver::new(registry, Duration::ZERO), document);
//!
//! context.initialize("techfest.example.com").await?;
//! assert!(public_branch(&context.state()).renders_content());
//! # Ok::<(), TenancyError>(())
//! # }).unwrap();
//! ```

pub mod context;
pub mod error;
pub mod guard;
pub mod injector;
pub mod registry;
pub mod resolver;
pub mod validate;

pub use crate::error::{TenancyError, TenancyErrorExt};

pub mod prelude {
    pub use crate::context::{Phase, TenantContext};
    pub use crate::error::{TenancyError, TenancyErrorExt};
    pub use crate::guard::{
        RenderBranch, Route, admin_branch, branch_for, public_branch, stage_branch,
    };
    pub use crate::injector::{
        CustomCodeInjector, Document, InjectedNode, InjectionHandle, MemoryDocument, NodeKind,
    };
    pub use crate::registry::{DomainEntry, DomainRegistry, NewDomain};
    pub use crate::resolver::{RegistryResolver, Resolution, TenantResolver, normalize_hostname};
    pub use ehub_domain::config::{TenancyConfig, TenantRecord};
    pub use ehub_domain::state::ResolutionState;
    pub use ehub_domain::tenant::{DomainStatus, TenantConfig, TenantConfigPatch, TenantId};
}
