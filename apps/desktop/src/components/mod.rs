//! Component tree. Every view reads tenant state from the
//! `Signal<ResolutionState>` that [`TenantProvider`] puts into context.

mod domains;
mod layout;
mod settings;

pub use domains::DomainManagement;
pub use layout::{AdminLayout, PublicLayout, StageLayout};
pub use settings::AdminSettings;

use crate::Shell;
use dioxus::prelude::*;
use ehub::domain::state::ResolutionState;
use ehub::features::tenancy::prelude::Route;

const NAV: [&str; 6] =
    ["/", "/stage/1", "/admin", "/admin/settings", "/super-admin", "/super-admin/domains"];

#[component]
pub fn App() -> Element {
    let mut path = use_signal(|| "/".to_owned());

    rsx! {
        TenantProvider {
            nav { class: "flex gap-2 p-2 bg-gray-100",
                for target in NAV {
                    button { onclick: move |_| path.set(target.to_owned()), "{target}" }
                }
            }
            Page { path: path() }
        }
    }
}

#[component]
fn Page(path: String) -> Element {
    match Route::classify(&path) {
        Route::Admin | Route::SuperAdmin => rsx! {
            AdminLayout { path: path.clone(),
                if path.starts_with("/admin/settings") {
                    AdminSettings {}
                } else if path.starts_with("/super-admin/domains") {
                    DomainManagement {}
                } else {
                    p { "Admin dashboard" }
                }
            }
        },
        Route::Stage => rsx! {
            StageLayout { p { class: "text-4xl text-center", "Now on stage" } }
        },
        Route::Public => rsx! {
            PublicLayout { p { "Upcoming events" } }
        },
    }
}

/// Resolves the tenant once and exposes the context's snapshots as a signal.
#[component]
pub fn TenantProvider(children: Element) -> Element {
    let shell = use_context::<Shell>();
    let state = use_signal(ResolutionState::loading);
    use_context_provider(|| state);

    let commands = shell.commands.clone();
    use_future(move || {
        let commands = commands.clone();
        async move {
            let Some(mut rx) = commands.lock().take() else {
                return;
            };
            while let Some(script) = rx.recv().await {
                let _ = dioxus::document::eval(&script);
            }
        }
    });

    let context = shell.context.clone();
    use_future(move || {
        let mut rx = context.subscribe();
        let mut state = state;
        async move {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                state.set(snapshot);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let context = shell.context.clone();
    let hostname = shell.hostname.clone();
    use_future(move || {
        let context = context.clone();
        let hostname = hostname.clone();
        async move {
            if let Err(err) = context.initialize(&hostname).await {
                tracing::warn!(kind = err.kind(), error = %err, "Tenant initialization aborted");
            }
        }
    });

    let context = shell.context.clone();
    use_drop(move || context.dispose());

    rsx! { {children} }
}

/// Current tenant state from the nearest [`TenantProvider`].
#[must_use]
pub fn use_tenant() -> Signal<ResolutionState> {
    use_context::<Signal<ResolutionState>>()
}

