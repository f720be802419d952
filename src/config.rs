//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` from the content
//! root. User config files are sparse: values are merged on top of stock
//! defaults, and unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Atelier Bois"
//! tagline = "Charpente, menuiserie et agencement sur mesure"
//! base_url = "https://atelier-bois-vitrine.vercel.app"
//! fallback_image = "/images/uploads/placeholder.jpg"
//!
//! [admin]
//! repo = "labbe15/atelier-bois-vitrine"
//! branch = "main"
//! auth_endpoint = "api/auth"
//! media_folder = "public/images/uploads"
//! public_folder = "/images/uploads"
//! categories = ["Structure", "Menuiserie", "Agencement", "Extension Bois"]
//!
//! [content]
//! testimonials = ["hugo-m", "claire-d", "nina-s"]
//!
//! [colors.light]
//! background = "#faf6f0"
//! text = "#2b2118"
//!
//! [colors.dark]
//! background = "#1c1610"
//! text = "#ece4d8"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and fallback behavior.
    pub site: SiteSection,
    /// CMS admin backend settings (mirrored into the admin descriptor).
    pub admin: AdminSection,
    /// Content enumeration settings.
    pub content: ContentSection,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.admin.categories.is_empty() {
            return Err(ConfigError::Validation(
                "admin.categories must not be empty".into(),
            ));
        }
        if !self.site.fallback_image.starts_with('/') {
            return Err(ConfigError::Validation(
                "site.fallback_image must be an absolute path like /images/uploads/placeholder.jpg"
                    .into(),
            ));
        }
        Ok(())
    }
}

/// Site identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site title, shown in the header and page titles.
    pub title: String,
    /// Short tagline under the title.
    pub tagline: String,
    /// Public base URL of the deployed site.
    pub base_url: String,
    /// Image path substituted when a referenced image file is missing.
    pub fallback_image: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Atelier Bois".to_string(),
            tagline: "Charpente, menuiserie et agencement sur mesure".to_string(),
            base_url: "https://atelier-bois-vitrine.vercel.app".to_string(),
            fallback_image: "/images/uploads/placeholder.jpg".to_string(),
        }
    }
}

/// CMS admin backend settings.
///
/// These feed the descriptor served to the CMS front end; the page
/// generation itself never reads the repo or branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminSection {
    /// GitHub repository the CMS commits to (`owner/name`).
    pub repo: String,
    /// Branch the CMS commits to.
    pub branch: String,
    /// OAuth endpoint path, relative to `site.base_url`.
    pub auth_endpoint: String,
    /// Repository folder the CMS uploads media into.
    pub media_folder: String,
    /// Public URL prefix corresponding to `media_folder`.
    pub public_folder: String,
    /// Category options offered by the realisation editor.
    pub categories: Vec<String>,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            repo: "labbe15/atelier-bois-vitrine".to_string(),
            branch: "main".to_string(),
            auth_endpoint: "api/auth".to_string(),
            media_folder: "public/images/uploads".to_string(),
            public_folder: "/images/uploads".to_string(),
            categories: vec![
                "Structure".to_string(),
                "Menuiserie".to_string(),
                "Agencement".to_string(),
                "Extension Bois".to_string(),
            ],
        }
    }
}

/// Content enumeration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentSection {
    /// Testimonial file stems under `content/testimonials/`, loaded in order.
    pub testimonials: Vec<String>,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            testimonials: vec![
                "hugo-m".to_string(),
                "claire-d".to_string(),
                "nina-s".to_string(),
            ],
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (locations, descriptions, captions).
    pub text_muted: String,
    /// Accent color (category badges, links, filter buttons).
    pub accent: String,
    /// Card/surface background color.
    pub surface: String,
    /// Border color.
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#faf6f0".to_string(),
            text: "#2b2118".to_string(),
            text_muted: "#7a6a58".to_string(),
            accent: "#8c5a2b".to_string(),
            surface: "#ffffff".to_string(),
            border: "#e4dacc".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1c1610".to_string(),
            text: "#ece4d8".to_string(),
            text_muted: "#a99a86".to_string(),
            accent: "#c89a64".to_string(),
            surface: "#27201a".to_string(),
            border: "#3c332a".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Atelier Vitrine Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of your content directory:
#   content/config.toml
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Atelier Bois"
tagline = "Charpente, menuiserie et agencement sur mesure"

# Public base URL of the deployed site.
base_url = "https://atelier-bois-vitrine.vercel.app"

# Image substituted when a referenced upload is missing from the content tree.
fallback_image = "/images/uploads/placeholder.jpg"

# ---------------------------------------------------------------------------
# CMS admin backend
# ---------------------------------------------------------------------------
[admin]
# GitHub repository the CMS commits content to.
repo = "labbe15/atelier-bois-vitrine"
branch = "main"

# OAuth endpoint path, relative to site.base_url.
auth_endpoint = "api/auth"

# Where the CMS stores uploads, and the public URL prefix they map to.
media_folder = "public/images/uploads"
public_folder = "/images/uploads"

# Category options offered in the realisation editor (and used for the
# gallery filter pages).
categories = ["Structure", "Menuiserie", "Agencement", "Extension Bois"]

# ---------------------------------------------------------------------------
# Content enumeration
# ---------------------------------------------------------------------------
[content]
# Testimonial file stems under content/testimonials/, loaded in this order.
# A missing or malformed file is skipped, not fatal.
testimonials = ["hugo-m", "claire-d", "nina-s"]

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#faf6f0"
text = "#2b2118"
text_muted = "#7a6a58"    # Locations, descriptions, captions
accent = "#8c5a2b"        # Category badges, links, filter buttons
surface = "#ffffff"
border = "#e4dacc"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1c1610"
text = "#ece4d8"
text_muted = "#a99a86"
accent = "#c89a64"
surface = "#27201a"
border = "#3c332a"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-surface: {light_surface};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-surface: {dark_surface};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_surface = colors.light.surface,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_surface = colors.dark.surface,
        dark_border = colors.dark.border,
    )
}
