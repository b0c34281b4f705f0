use ehub_domain::constants::{
    CHECK_IN, CUSTOM_CSS_ID, CUSTOM_JS_ID, DEFAULT_ACCENT_COLOR, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SECONDARY_COLOR, GALLERY, REGISTRATIONS, SUPER_ADMIN_PREFIX,
};

#[test]
fn injection_ids_are_stable() {
    assert_eq!(CUSTOM_CSS_ID, "tenant-custom-css");
    assert_eq!(CUSTOM_JS_ID, "tenant-custom-js");
}

#[test]
fn default_palette_matches_reference_branding() {
    assert_eq!(DEFAULT_PRIMARY_COLOR, "#1e40af");
    assert_eq!(DEFAULT_SECONDARY_COLOR, "#3b82f6");
    assert_eq!(DEFAULT_ACCENT_COLOR, "#06b6d4");
}

#[test]
fn constants_match_config_strings() {
    assert_eq!(REGISTRATIONS, "registrations");
    assert_eq!(GALLERY, "gallery");
    assert_eq!(CHECK_IN, "check_in");
    assert_eq!(SUPER_ADMIN_PREFIX, "/super-admin");
}
