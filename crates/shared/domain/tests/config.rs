use ehub_domain::config::{AppConfig, DEFAULT_RESOLVE_DELAY_MS, LoggingConfig, TenancyConfig};
use ehub_domain::features::FeatureSet;
use ehub_domain::tenant::DomainStatus;
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let tenancy = TenancyConfig::default();
    assert_eq!(tenancy.resolve_delay_ms, DEFAULT_RESOLVE_DELAY_MS);
    assert!(tenancy.hostname.is_none());
    assert!(tenancy.tenants.is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert_eq!(logging.max_files, 10);
    assert!(logging.path.is_none());
    assert!(!logging.json);
}

#[test]
fn app_config_deserializes_tenant_records() {
    let raw = json!({
        "tenancy": {
            "hostname": "techfest.example.com",
            "resolve_delay_ms": 0,
            "tenants": [
                {
                    "id": "1",
                    "domain": "techfest.example.com",
                    "brand_name": "TechFest 2025",
                    "primary_color": "#1e40af",
                    "custom_css": ".custom-hero { color: red; }"
                },
                {
                    "id": "3",
                    "domain": "musicfest.example.com",
                    "brand_name": "Music Festival",
                    "status": "pending",
                    "admin_email": "ops@musicfest.example.com",
                    "features": ["gallery"]
                }
            ]
        },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.tenancy.hostname.as_deref(), Some("techfest.example.com"));
    assert_eq!(cfg.tenancy.resolve_delay_ms, 0);
    assert_eq!(cfg.tenancy.tenants.len(), 2);

    let techfest = &cfg.tenancy.tenants[0];
    assert_eq!(techfest.status, DomainStatus::Active);
    assert_eq!(techfest.config.brand_name, "TechFest 2025");
    assert_eq!(techfest.config.secondary_color, "#3b82f6");
    assert_eq!(techfest.config.features, FeatureSet::ALL);
    assert!(techfest.config.custom_js.is_none());

    let music = &cfg.tenancy.tenants[1];
    assert_eq!(music.status, DomainStatus::Pending);
    assert_eq!(music.admin_email.as_deref(), Some("ops@musicfest.example.com"));
    assert_eq!(music.config.features, FeatureSet::GALLERY);

    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
}

#[test]
fn app_config_deref_mut_copies_on_write() {
    let original = AppConfig::default();
    let mut edited = original.clone();
    edited.tenancy.resolve_delay_ms = 5;

    assert_eq!(original.tenancy.resolve_delay_ms, DEFAULT_RESOLVE_DELAY_MS);
    assert_eq!(edited.tenancy.resolve_delay_ms, 5);
}
