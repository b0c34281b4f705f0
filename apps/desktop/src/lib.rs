//! Desktop shell: resolves the configured hostname and renders the public and
//! admin layouts with the tenant's branding and custom code live in the webview.

pub mod components;
mod webview;

pub use crate::webview::WebviewDocument;

use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;
use ehub::domain::config::AppConfig;
use ehub::domain::tenant::{TenantConfig, TenantConfigPatch};
use ehub::features::tenancy::prelude::{
    DomainRegistry, RegistryResolver, TenancyError, TenantContext,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything the component tree needs from the host, provided as root context.
#[derive(Debug, Clone)]
pub struct Shell {
    pub context: Arc<TenantContext<RegistryResolver>>,
    pub hostname: Arc<str>,
    /// DOM updates from [`WebviewDocument`]; taken once by the provider.
    pub(crate) commands: Arc<Mutex<Option<UnboundedReceiver<String>>>>,
}

impl Shell {
    /// Registry behind the resolver; the super-admin console edits it directly.
    #[must_use]
    pub fn registry(&self) -> &DomainRegistry {
        self.context.resolver().registry()
    }

    /// Admin settings save: updates the live tenant, then stores the same patch
    /// in the registry so the next resolution of this domain sees it.
    ///
    /// # Errors
    /// Whatever [`TenantContext::apply_settings`] or [`DomainRegistry::update`] reject.
    pub fn save_settings(
        &self,
        patch: &TenantConfigPatch,
    ) -> Result<Arc<TenantConfig>, TenancyError> {
        let saved = self.context.apply_settings(patch)?;
        self.registry().update(&saved.domain, patch)?;
        Ok(saved)
    }
}

#[derive(Debug)]
pub struct DesktopApp {
    title: String,
    width: f64,
    height: f64,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self { title: "EventHub".to_owned(), width: 1200.0, height: 800.0 }
    }
}

impl DesktopApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "This function does nothing unless you call `launch()` on it"]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Wires the tenant context from `config` and runs the window until closed.
    ///
    /// # Errors
    /// Returns [`TenancyError`] if the configured tenants are invalid.
    pub fn launch(self, config: &AppConfig) -> Result<(), TenancyError> {
        let (document, commands) = WebviewDocument::channel();
        let context = ehub::init(config, Arc::new(document))?;
        let shell = Shell {
            context: Arc::new(context),
            hostname: ehub::hostname(config, None).into(),
            commands: Arc::new(Mutex::new(Some(commands))),
        };
        tracing::info!(hostname = %shell.hostname, "Launching desktop shell");

        let window = WindowBuilder::new().with_title(&self.title).with_inner_size(
            dioxus::desktop::LogicalSize { width: self.width, height: self.height },
        );

        let cfg = Config::default().with_window(window).with_custom_head(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#.into(),
        );

        LaunchBuilder::desktop()
            .with_cfg(cfg)
            .with_context_provider(move || Box::new(shell.clone()))
            .launch(components::App);
        Ok(())
    }
}
