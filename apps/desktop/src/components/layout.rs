use super::use_tenant;
use dioxus::prelude::*;
use ehub::domain::tenant::TenantConfig;
use ehub::features::tenancy::prelude::{RenderBranch, admin_branch, public_branch, stage_branch};

#[component]
pub fn PublicLayout(children: Element) -> Element {
    let branch = public_branch(&use_tenant().read());
    render(&branch, children)
}

/// Full-screen stage display. Uses the tenant's colours when there is one.
#[component]
pub fn StageLayout(children: Element) -> Element {
    let branch = stage_branch(&use_tenant().read());
    render(&branch, children)
}

/// `path` decides whether the tenant check applies (`/super-admin` is exempt).
#[component]
pub fn AdminLayout(path: String, children: Element) -> Element {
    let branch = admin_branch(&use_tenant().read(), &path);
    render(&branch, children)
}

fn render(branch: &RenderBranch, children: Element) -> Element {
    match branch {
        RenderBranch::Loading => rsx! { LoadingSpinner {} },
        RenderBranch::NotFound | RenderBranch::AccessDenied => rsx! {
            Placeholder { title: branch.title(), message: branch.message() }
        },
        RenderBranch::Content(tenant) => branded(tenant, children),
        RenderBranch::SuperAdmin(tenant) | RenderBranch::Stage(tenant) => match tenant {
            Some(tenant) => branded(tenant, children),
            None => rsx! { div { class: "min-h-screen bg-gray-50", {children} } },
        },
    }
}

fn branded(tenant: &TenantConfig, children: Element) -> Element {
    let style = format!(
        "--primary: {}; --secondary: {}; --accent: {};",
        tenant.primary_color, tenant.secondary_color, tenant.accent_color
    );
    let brand = tenant.brand_name.clone();
    let logo = tenant.logo_url.clone();
    rsx! {
        div { class: "min-h-screen bg-gray-50", style: "{style}",
            header { class: "flex items-center gap-2 p-4",
                if let Some(logo) = logo {
                    img { src: "{logo}", alt: "{brand}", height: "32" }
                }
                h1 { class: "text-xl font-bold", "{brand}" }
            }
            main { {children} }
        }
    }
}

#[component]
fn LoadingSpinner() -> Element {
    let title = RenderBranch::Loading.title();
    rsx! {
        div { class: "min-h-screen flex items-center justify-center",
            p { class: "text-gray-600", "{title}" }
        }
    }
}

#[component]
fn Placeholder(title: &'static str, message: &'static str) -> Element {
    rsx! {
        div { class: "min-h-screen flex items-center justify-center",
            div { class: "text-center",
                h1 { class: "text-2xl font-bold text-red-600", "{title}" }
                p { class: "text-gray-600", "{message}" }
            }
        }
    }
}
