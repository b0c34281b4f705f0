use crate::error::TenancyError;
use crate::injector::{CustomCodeInjector, Document};
use crate::resolver::{Resolution, TenantResolver};
use crate::validate::validate_config;
use ehub_domain::state::ResolutionState;
use ehub_domain::tenant::{TenantConfig, TenantConfigPatch};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle of a [`TenantContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Uninitialized,
    Loading,
    Resolved,
    NotFound,
    Disposed,
}

impl Phase {
    /// `Resolved` and `NotFound` end the resolution of a session.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::NotFound)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Resolved => "resolved",
            Self::NotFound => "not_found",
            Self::Disposed => "disposed",
        })
    }
}

/// Single source of truth for the active tenant of one session.
///
/// The context is the only writer of [`ResolutionState`]; views read it through
/// [`state`](Self::state) or a [`subscribe`](Self::subscribe) receiver. It owns
/// the injector, so tenant code is applied and released in step with the state.
pub struct TenantContext<R> {
    resolver: R,
    injector: CustomCodeInjector,
    state: watch::Sender<ResolutionState>,
    phase: Mutex<Phase>,
    cancel: watch::Sender<bool>,
}

impl<R> fmt::Debug for TenantContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantContext")
            .field("phase", &*self.phase.lock())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<R: TenantResolver> TenantContext<R> {
    pub fn new(resolver: R, document: Arc<dyn Document>) -> Self {
        Self {
            resolver,
            injector: CustomCodeInjector::new(document),
            state: watch::Sender::new(ResolutionState::loading()),
            phase: Mutex::new(Phase::Uninitialized),
            cancel: watch::Sender::new(false),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> ResolutionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published snapshot, including settings updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn tenant(&self) -> Option<Arc<TenantConfig>> {
        self.state.borrow().tenant.clone()
    }

    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    #[must_use]
    pub const fn injector(&self) -> &CustomCodeInjector {
        &self.injector
    }

    /// Resolves `hostname` and settles the context.
    ///
    /// Runs once per context. Transport failures settle exactly like an
    /// unknown domain, as `{tenant: None, is_loading: false}`, but are logged
    /// as warnings.
    ///
    /// # Errors
    /// [`TenancyError::AlreadyInitialized`] on a second call and
    /// [`TenancyError::Disposed`] when the context was disposed before or
    /// during resolution; a late result is discarded in that case.
    pub async fn initialize(&self, hostname: &str) -> Result<Phase, TenancyError> {
        {
            let mut phase = self.phase.lock();
            match *phase {
                Phase::Uninitialized => *phase = Phase::Loading,
                Phase::Disposed => return Err(TenancyError::Disposed { context: None }),
                _ => return Err(TenancyError::AlreadyInitialized { context: None }),
            }
        }
        info!(%hostname, "Resolving tenant");

        let mut cancelled = self.cancel.subscribe();
        let outcome = tokio::select! {
            biased;
            _ = cancelled.wait_for(|flag| *flag) => None,
            result = self.resolver.resolve(hostname) => Some(result),
        };
        let Some(result) = outcome else {
            debug!(%hostname, "Resolution cancelled by dispose");
            return Err(TenancyError::Disposed { context: Some("resolution cancelled".into()) });
        };

        let tenant = match result {
            Ok(Resolution::Found(config)) => Some(Arc::new(config)),
            Ok(Resolution::NotFound) => {
                info!(%hostname, "No tenant configured for domain");
                None
            },
            Err(err) => {
                warn!(%hostname, kind = err.kind(), error = %err, "Tenant resolution failed");
                None
            },
        };

        let mut phase = self.phase.lock();
        if *phase == Phase::Disposed {
            debug!(%hostname, "Discarding resolution for disposed context");
            return Err(TenancyError::Disposed { context: Some("late resolution".into()) });
        }

        *phase = match tenant {
            Some(config) => {
                info!(
                    tenant = %config.id,
                    brand = %config.brand_name,
                    custom_code = config.has_custom_code(),
                    "Tenant resolved"
                );
                self.injector.apply(config.css(), config.js());
                self.state.send_replace(ResolutionState::resolved(config));
                Phase::Resolved
            },
            None => {
                self.state.send_replace(ResolutionState::not_found());
                Phase::NotFound
            },
        };
        Ok(*phase)
    }

    /// Admin settings save: merges `patch` over the resolved tenant and
    /// publishes the result as an update of the same `Resolved` state.
    ///
    /// Injection is redone only when the custom CSS/JS actually changed.
    ///
    /// # Errors
    /// [`TenancyError::NoTenant`] unless resolved, [`TenancyError::Validation`]
    /// when the merged config is invalid, [`TenancyError::Disposed`] after dispose.
    pub fn apply_settings(
        &self,
        patch: &TenantConfigPatch,
    ) -> Result<Arc<TenantConfig>, TenancyError> {
        let phase = self.phase.lock();
        let current = self.resolved_tenant(*phase)?;
        if patch.is_empty() {
            return Ok(current);
        }

        let next = current.merged(patch);
        validate_config(&next)?;
        if next == *current {
            return Ok(current);
        }

        let next = Arc::new(next);
        if patch.touches_custom_code() && next.custom_code_differs(&current) {
            self.injector.apply(next.css(), next.js());
        }
        info!(tenant = %next.id, "Tenant settings updated");
        self.state.send_replace(ResolutionState::resolved(Arc::clone(&next)));
        drop(phase);
        Ok(next)
    }

    /// Replaces the active tenant with an externally produced config.
    ///
    /// Also valid after `NotFound`, which makes it the way to switch tenants
    /// within a session. The previous injection is always released first.
    ///
    /// # Errors
    /// [`TenancyError::Validation`] for an invalid config, [`TenancyError::NoTenant`]
    /// before resolution has settled, [`TenancyError::Disposed`] after dispose.
    pub fn reload(&self, config: TenantConfig) -> Result<Arc<TenantConfig>, TenancyError> {
        validate_config(&config)?;

        let mut phase = self.phase.lock();
        match *phase {
            Phase::Disposed => return Err(TenancyError::Disposed { context: None }),
            p if !p.is_settled() => {
                return Err(TenancyError::NoTenant { context: Some("resolution pending".into()) });
            },
            _ => {},
        }

        let config = Arc::new(config);
        self.injector.release_current();
        self.injector.apply(config.css(), config.js());
        info!(
            tenant = %config.id,
            domain = %config.domain,
            custom_code = config.has_custom_code(),
            "Tenant reloaded"
        );
        self.state.send_replace(ResolutionState::resolved(Arc::clone(&config)));
        *phase = Phase::Resolved;
        Ok(config)
    }

    /// Ends the session: cancels a pending resolution and removes tenant code.
    ///
    /// The last published state is left as is. Idempotent.
    pub fn dispose(&self) {
        let mut phase = self.phase.lock();
        if *phase == Phase::Disposed {
            return;
        }
        let previous = std::mem::replace(&mut *phase, Phase::Disposed);
        self.cancel.send_replace(true);
        self.injector.release_current();
        info!(from = %previous, "Tenant context disposed");
    }

    fn resolved_tenant(&self, phase: Phase) -> Result<Arc<TenantConfig>, TenancyError> {
        match phase {
            Phase::Resolved => self.tenant().ok_or_else(|| {
                TenancyError::Internal { message: "resolved without tenant".into(), context: None }
            }),
            Phase::Disposed => Err(TenancyError::Disposed { context: None }),
            _ => Err(TenancyError::NoTenant { context: None }),
        }
    }
}

impl<R: TenantResolver + 'static> TenantContext<R> {
    /// Runs [`initialize`](Self::initialize) on the current runtime.
    pub fn spawn_initialize(
        self: &Arc<Self>,
        hostname: impl Into<String>,
    ) -> JoinHandle<Result<Phase, TenancyError>> {
        let context = Arc::clone(self);
        let hostname = hostname.into();
        tokio::spawn(async move { context.initialize(&hostname).await })
    }
}

impl<R> Drop for TenantContext<R> {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}
