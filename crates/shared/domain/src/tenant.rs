use crate::constants::{DEFAULT_ACCENT_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use crate::features::FeatureSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Branding and custom code of a single tenant.
///
/// A resolved config is shared as an `Arc<TenantConfig>` snapshot and never
/// mutated; see [`TenantConfig::merged`] for the update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: TenantId,
    /// Hostname this config applies to.
    pub domain: String,
    pub brand_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Raw stylesheet text, injected as-is.
    #[serde(default)]
    pub custom_css: Option<String>,
    /// Raw script text, injected as-is.
    #[serde(default)]
    pub custom_js: Option<String>,
    #[serde(default)]
    pub features: FeatureSet,
}

impl TenantConfig {
    /// A config with default colours, all features and no custom code.
    pub fn new(
        id: impl Into<TenantId>,
        domain: impl Into<String>,
        brand_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            brand_name: brand_name.into(),
            logo_url: None,
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            accent_color: default_accent_color(),
            custom_css: None,
            custom_js: None,
            features: FeatureSet::ALL,
        }
    }

    /// Custom stylesheet, if any non-blank text is configured.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        non_blank(self.custom_css.as_deref())
    }

    /// Custom script, if any non-blank text is configured.
    #[must_use]
    pub fn js(&self) -> Option<&str> {
        non_blank(self.custom_js.as_deref())
    }

    #[must_use]
    pub fn has_custom_code(&self) -> bool {
        self.css().is_some() || self.js().is_some()
    }

    /// Whether the custom CSS/JS differ from `other`'s, ignoring blank text.
    #[must_use]
    pub fn custom_code_differs(&self, other: &Self) -> bool {
        self.css() != other.css() || self.js() != other.js()
    }

    /// Returns a new config with `patch` laid over this one.
    ///
    /// Absent patch fields keep the current value. An empty `logo_url`,
    /// `custom_css` or `custom_js` clears that field.
    #[must_use]
    pub fn merged(&self, patch: &TenantConfigPatch) -> Self {
        let pick = |new: &Option<String>, old: &String| new.clone().unwrap_or_else(|| old.clone());
        let optional = |new: &Option<String>, old: &Option<String>| match new {
            Some(text) => non_blank(Some(text.as_str())).map(str::to_owned),
            None => old.clone(),
        };

        Self {
            id: self.id.clone(),
            domain: self.domain.clone(),
            brand_name: pick(&patch.brand_name, &self.brand_name),
            logo_url: optional(&patch.logo_url, &self.logo_url),
            primary_color: pick(&patch.primary_color, &self.primary_color),
            secondary_color: pick(&patch.secondary_color, &self.secondary_color),
            accent_color: pick(&patch.accent_color, &self.accent_color),
            custom_css: optional(&patch.custom_css, &self.custom_css),
            custom_js: optional(&patch.custom_js, &self.custom_js),
            features: patch.features.unwrap_or(self.features),
        }
    }
}

/// Partial settings update coming from the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfigPatch {
    pub brand_name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
    pub features: Option<FeatureSet>,
}

impl TenantConfigPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.brand_name.is_none()
            && self.logo_url.is_none()
            && self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.accent_color.is_none()
            && self.custom_css.is_none()
            && self.custom_js.is_none()
            && self.features.is_none()
    }

    #[must_use]
    pub const fn touches_custom_code(&self) -> bool {
        self.custom_css.is_some() || self.custom_js.is_some()
    }
}

/// Lifecycle of a registered domain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    #[default]
    Active,
    Pending,
    Suspended,
}

impl DomainStatus {
    /// Only active domains are served to visitors.
    #[must_use]
    pub const fn is_servable(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Suspended => "suspended",
        })
    }
}

impl std::str::FromStr for DomainStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "suspended" => Ok(Self::Suspended),
            other => Err(format!("unknown domain status '{other}'")),
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_owned()
}

fn default_secondary_color() -> String {
    DEFAULT_SECONDARY_COLOR.to_owned()
}

fn default_accent_color() -> String {
    DEFAULT_ACCENT_COLOR.to_owned()
}
