use crate::error::TenancyError;
use crate::resolver::normalize_hostname;
use ehub_domain::tenant::TenantConfig;

/// Checks the invariants every stored or published config must hold.
///
/// Custom CSS/JS are opaque and never inspected.
///
/// # Errors
/// Returns [`TenancyError::Validation`] naming the first offending field.
pub fn validate_config(config: &TenantConfig) -> Result<(), TenancyError> {
    if config.id.as_str().trim().is_empty() {
        return Err(TenancyError::validation("id must not be empty"));
    }
    validate_domain(&config.domain)?;
    validate_brand_name(&config.brand_name)?;

    for (field, value) in [
        ("primary_color", &config.primary_color),
        ("secondary_color", &config.secondary_color),
        ("accent_color", &config.accent_color),
    ] {
        if !is_hex_color(value) {
            return Err(TenancyError::validation(format!(
                "{field} must be a hex colour like #1e40af, got '{value}'"
            )));
        }
    }

    Ok(())
}

/// A stored domain must already be in normalized form.
pub(crate) fn validate_domain(domain: &str) -> Result<(), TenancyError> {
    if normalize_hostname(domain).as_deref() != Some(domain) {
        return Err(TenancyError::validation(format!("domain '{domain}' is not normalized")));
    }

    let valid_labels = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if valid_labels {
        Ok(())
    } else {
        Err(TenancyError::validation(format!("domain '{domain}' is not a valid hostname")))
    }
}

pub(crate) fn validate_brand_name(brand_name: &str) -> Result<(), TenancyError> {
    if brand_name.trim().is_empty() {
        Err(TenancyError::validation("brand_name must not be empty"))
    } else {
        Ok(())
    }
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn techfest() -> TenantConfig {
        TenantConfig::new("1", "techfest.example.com", "TechFest 2025")
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&techfest()).is_ok());
    }

    #[test]
    fn blank_brand_name_is_rejected() {
        let mut config = techfest();
        config.brand_name = "   ".to_owned();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.kind(), "Validation");
        assert!(err.to_string().contains("brand_name"));
    }

    #[test]
    fn colours_must_be_hex() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1E40AF"));
        assert!(is_hex_color("#1e40af80"));
        assert!(!is_hex_color("1e40af"));
        assert!(!is_hex_color("#1e40a"));
        assert!(!is_hex_color("red"));

        let mut config = techfest();
        config.accent_color = "teal".to_owned();
        assert!(validate_config(&config).unwrap_err().to_string().contains("accent_color"));
    }

    #[test]
    fn domain_must_be_normalized_hostname() {
        assert!(validate_domain("techfest.example.com").is_ok());
        assert!(validate_domain("localhost").is_ok());
        assert!(validate_domain("TechFest.example.com").is_err());
        assert!(validate_domain("techfest.example.com:8080").is_err());
        assert!(validate_domain("tech fest.example.com").is_err());
        assert!(validate_domain("-techfest.example.com").is_err());
        assert!(validate_domain("techfest..com").is_err());
        assert!(validate_domain("").is_err());
    }

    #[test]
    fn custom_code_is_never_inspected() {
        let mut config = techfest();
        config.custom_js = Some("this is not ( valid javascript".to_owned());
        config.custom_css = Some("}}} .broken {".to_owned());
        assert!(validate_config(&config).is_ok());
    }
}
