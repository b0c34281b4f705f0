use crate::Shell;
use dioxus::prelude::*;
use ehub::domain::tenant::DomainStatus;
use ehub::features::tenancy::prelude::NewDomain;

/// Super-admin domain table: register, activate, suspend and remove.
#[component]
pub fn DomainManagement() -> Element {
    let shell = use_context::<Shell>();
    let mut domain = use_signal(String::new);
    let mut brand = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut status = use_signal(String::new);
    // Bumped after every registry edit so the table re-reads the registry.
    let mut revision = use_signal(|| 0_u32);

    let _ = revision();
    let entries = shell.registry().list();

    let registry = shell.registry().clone();
    let register = move |_| {
        let request = NewDomain {
            domain: domain(),
            brand_name: brand(),
            admin_email: Some(email()).filter(|e| !e.trim().is_empty()),
        };
        match registry.register(request) {
            Ok(id) => {
                status.set(format!("Registered {} as {id}", domain()));
                domain.set(String::new());
                brand.set(String::new());
                email.set(String::new());
                revision += 1;
            },
            Err(err) => status.set(err.to_string()),
        }
    };

    rsx! {
        section { class: "p-4 flex flex-col gap-4",
            h2 { class: "text-lg font-semibold", "Domains" }
            table { class: "w-full text-left",
                thead {
                    tr {
                        th { "Domain" }
                        th { "Brand" }
                        th { "Admin" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    for entry in entries {
                        DomainRow {
                            key: "{entry.config.domain}",
                            domain: entry.config.domain.clone(),
                            brand: entry.config.brand_name.clone(),
                            admin: entry.admin_email.clone().unwrap_or_default(),
                            current: entry.status,
                            on_change: move |message: String| {
                                status.set(message);
                                revision += 1;
                            },
                        }
                    }
                }
            }

            h3 { class: "font-semibold", "Register domain" }
            input { placeholder: "events.example.com", value: "{domain}", oninput: move |e| domain.set(e.value()) }
            input { placeholder: "Brand name", value: "{brand}", oninput: move |e| brand.set(e.value()) }
            input { placeholder: "admin@example.com", value: "{email}", oninput: move |e| email.set(e.value()) }
            button { onclick: register, "Register" }
            p { class: "text-gray-600", "{status}" }
        }
    }
}

#[component]
fn DomainRow(
    domain: String,
    brand: String,
    admin: String,
    current: DomainStatus,
    on_change: EventHandler<String>,
) -> Element {
    let shell = use_context::<Shell>();

    let set_status = {
        let shell = shell.clone();
        let domain = domain.clone();
        move |next: DomainStatus| match shell.registry().set_status(&domain, next) {
            Ok(()) => on_change.call(format!("{domain} is now {next}")),
            Err(err) => on_change.call(err.to_string()),
        }
    };
    let activate = {
        let set_status = set_status.clone();
        move |_| set_status(DomainStatus::Active)
    };
    let suspend = move |_| set_status(DomainStatus::Suspended);
    let remove = {
        let domain = domain.clone();
        move |_| {
            if shell.registry().remove(&domain).is_some() {
                on_change.call(format!("Removed {domain}"));
            }
        }
    };

    let label = current.to_string();
    rsx! {
        tr {
            td { "{domain}" }
            td { "{brand}" }
            td { "{admin}" }
            td { "{label}" }
            td { class: "flex gap-2",
                if current != DomainStatus::Active {
                    button { onclick: activate, "Activate" }
                }
                if current == DomainStatus::Active {
                    button { onclick: suspend, "Suspend" }
                }
                button { onclick: remove, "Remove" }
            }
        }
    }
}
