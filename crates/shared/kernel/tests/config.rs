use ehub_kernel::config::{ConfigError, load_config};
use ehub_kernel::domain::config::AppConfig;
use ehub_kernel::domain::tenant::DomainStatus;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r##"
[tenancy]
hostname = "techfest.example.com"
resolve_delay_ms = 25

[[tenancy.tenants]]
id = "1"
domain = "techfest.example.com"
brand_name = "TechFest 2025"
custom_css = ".custom-hero { color: white; }"

[[tenancy.tenants]]
id = "2"
domain = "artfair.example.com"
brand_name = "Art Fair Exhibition"
status = "suspended"

[logging]
level = "debug"
"##;

#[test]
#[serial]
fn loads_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("ehub.toml");
    fs::write(&path, SAMPLE)?;

    let cfg: AppConfig = load_config(Some(&path))?;

    assert_eq!(cfg.tenancy.hostname.as_deref(), Some("techfest.example.com"));
    assert_eq!(cfg.tenancy.resolve_delay_ms, 25);
    assert_eq!(cfg.tenancy.tenants.len(), 2);
    assert_eq!(cfg.tenancy.tenants[0].config.brand_name, "TechFest 2025");
    assert_eq!(cfg.tenancy.tenants[1].status, DomainStatus::Suspended);
    assert_eq!(cfg.logging.level, "debug");
    Ok(())
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.toml");

    let err = load_config::<AppConfig>(Some(&missing)).expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}

#[test]
#[serial]
fn implicit_default_file_is_optional() {
    let cfg: AppConfig = load_config(None::<&str>).expect("defaults without a file");
    assert_eq!(cfg.tenancy.resolve_delay_ms, 500);
}
