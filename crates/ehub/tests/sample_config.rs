use ehub::domain::config::AppConfig;
use ehub::features::tenancy::prelude::*;
use ehub::kernel::config::load_config;
use std::path::PathBuf;
use std::sync::Arc;

fn sample() -> AppConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/ehub.toml");
    load_config(Some(path)).expect("sample config loads")
}

#[test]
fn sample_config_seeds_three_domains() {
    let config = sample();
    assert_eq!(config.tenancy.resolve_delay_ms, 500);
    assert_eq!(config.tenancy.tenants.len(), 3);

    let resolver = RegistryResolver::from_config(&config.tenancy).unwrap();
    let musicfest = resolver.registry().get("musicfest.example.com").unwrap();
    assert_eq!(musicfest.status, DomainStatus::Pending);
}

#[tokio::test(start_paused = true)]
async fn sample_techfest_injects_original_code() {
    let config = sample();
    let document = Arc::new(MemoryDocument::new());
    let context = ehub::init(&config, document.clone()).unwrap();

    context.initialize("techfest.example.com").await.unwrap();

    let tenant = context.tenant().unwrap();
    assert_eq!(tenant.brand_name, "TechFest 2025");
    assert_eq!(tenant.primary_color, "#1e40af");
    assert_eq!(document.count(NodeKind::Style), 1);
    assert_eq!(document.count(NodeKind::Script), 1);
    assert!(document.contains_text(".custom-hero"));
    assert!(document.contains_text("customDomainFeatures"));
}

#[tokio::test(start_paused = true)]
async fn sample_pending_domain_is_not_served() {
    let config = sample();
    let context = ehub::init(&config, Arc::new(MemoryDocument::new())).unwrap();

    assert_eq!(context.initialize("musicfest.example.com").await.unwrap(), Phase::NotFound);
    assert_eq!(public_branch(&context.state()), RenderBranch::NotFound);
}
