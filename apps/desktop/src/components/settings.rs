use crate::Shell;
use dioxus::prelude::*;
use ehub::domain::features::FeatureSet;
use ehub::domain::tenant::{TenantConfig, TenantConfigPatch};

const FEATURE_TOGGLES: [(FeatureSet, &str); 3] = [
    (FeatureSet::REGISTRATIONS, "Registrations"),
    (FeatureSet::GALLERY, "Gallery"),
    (FeatureSet::CHECK_IN, "QR check-in"),
];

/// Admin settings form. Saves go through the tenant context, which republishes
/// the tenant and reinjects custom code when it changed.
#[component]
pub fn AdminSettings() -> Element {
    let shell = use_context::<Shell>();
    let tenant = super::use_tenant().read().tenant.clone();

    let field = |read: fn(&TenantConfig) -> String| {
        tenant.as_deref().map(read).unwrap_or_default()
    };
    let mut brand = use_signal(|| field(|t| t.brand_name.clone()));
    let mut logo = use_signal(|| field(|t| t.logo_url.clone().unwrap_or_default()));
    let mut primary = use_signal(|| field(|t| t.primary_color.clone()));
    let mut secondary = use_signal(|| field(|t| t.secondary_color.clone()));
    let mut accent = use_signal(|| field(|t| t.accent_color.clone()));
    let mut css = use_signal(|| field(|t| t.custom_css.clone().unwrap_or_default()));
    let mut js = use_signal(|| field(|t| t.custom_js.clone().unwrap_or_default()));
    let mut features = use_signal(|| tenant.as_ref().map_or(FeatureSet::ALL, |t| t.features));
    let mut status = use_signal(String::new);

    if tenant.is_none() {
        return rsx! {};
    }

    let save = move |_| {
        let patch = TenantConfigPatch {
            brand_name: Some(brand()),
            logo_url: Some(logo()),
            primary_color: Some(primary()),
            secondary_color: Some(secondary()),
            accent_color: Some(accent()),
            custom_css: Some(css()),
            custom_js: Some(js()),
            features: Some(features()),
        };
        match shell.save_settings(&patch) {
            Ok(saved) => status.set(format!("Saved settings for {}", saved.brand_name)),
            Err(err) => status.set(err.to_string()),
        }
    };

    rsx! {
        section { class: "p-4 flex flex-col gap-2",
            h2 { class: "text-lg font-semibold", "Branding" }
            label { "Brand name" }
            input { value: "{brand}", oninput: move |e| brand.set(e.value()) }
            label { "Logo URL" }
            input { value: "{logo}", oninput: move |e| logo.set(e.value()) }
            label { "Primary color" }
            input { value: "{primary}", oninput: move |e| primary.set(e.value()) }
            label { "Secondary color" }
            input { value: "{secondary}", oninput: move |e| secondary.set(e.value()) }
            label { "Accent color" }
            input { value: "{accent}", oninput: move |e| accent.set(e.value()) }

            h2 { class: "text-lg font-semibold", "Features" }
            for (flag, name) in FEATURE_TOGGLES {
                label { class: "flex items-center gap-2",
                    input {
                        r#type: "checkbox",
                        checked: features().contains(flag),
                        onchange: move |e| {
                            let mut next = features();
                            next.set(flag, e.checked());
                            features.set(next);
                        },
                    }
                    "{name}"
                }
            }

            h2 { class: "text-lg font-semibold", "Custom code" }
            label { "Custom CSS" }
            textarea { rows: "6", value: "{css}", oninput: move |e| css.set(e.value()) }
            label { "Custom JS" }
            textarea { rows: "6", value: "{js}", oninput: move |e| js.set(e.value()) }
            button { onclick: save, "Save" }
            p { class: "text-gray-600", "{status}" }
        }
    }
}
