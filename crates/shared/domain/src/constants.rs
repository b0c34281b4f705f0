//! Well-known strings shared by every layer.

/// Element id of the injected tenant stylesheet.
pub const CUSTOM_CSS_ID: &str = "tenant-custom-css";
/// Element id of the injected tenant script.
pub const CUSTOM_JS_ID: &str = "tenant-custom-js";

pub const DEFAULT_PRIMARY_COLOR: &str = "#1e40af";
pub const DEFAULT_SECONDARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_ACCENT_COLOR: &str = "#06b6d4";

/// Route prefix of the domain-independent super-admin console.
pub const SUPER_ADMIN_PREFIX: &str = "/super-admin";
pub const ADMIN_PREFIX: &str = "/admin";
pub const STAGE_PREFIX: &str = "/stage";

// Feature names as they appear in configuration files.
pub const REGISTRATIONS: &str = "registrations";
pub const GALLERY: &str = "gallery";
pub const CHECK_IN: &str = "check_in";
