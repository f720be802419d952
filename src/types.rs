//! Content record types shared across both pipeline stages.
//!
//! These are the shapes of the JSON documents that the CMS writes under
//! `content/`. They are serialized into the scan manifest and consumed by
//! the generate stage, so they must stay identical across both modules.
//!
//! All fields tolerate absence: missing strings deserialize to `""` and a
//! missing gallery to an empty list. The only hard requirement is that a
//! realisation carries a non-empty title (enforced in [`crate::scan`]).

use serde::{Deserialize, Serialize};

/// A completed project shown in the gallery.
///
/// Authored by the CMS as one JSON file per project under
/// `content/realisations/`. The `gallery` field arrives in two shapes
/// depending on the CMS list-widget version: plain path strings, or objects
/// wrapping a path string. [`GalleryEntry`] absorbs both; callers get a flat
/// `Vec<String>` after [`normalize_gallery`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realisation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Realisation {
    /// Composite rendering key: `category__title__location__image`.
    ///
    /// Realisations have no true identifier; this derived key gives grid
    /// cards a stable DOM id and disambiguates duplicate title slugs.
    /// Empty components fall back to fixed markers so two sparse records
    /// still produce distinct keys when any component differs.
    pub fn render_key(&self) -> String {
        fn or(value: &str, fallback: &str) -> String {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        }
        format!(
            "{}__{}__{}__{}",
            or(&self.category, "nocat"),
            or(&self.title, "untitled"),
            or(&self.location, "noloc"),
            or(&self.image, "noimg"),
        )
    }
}

/// Raw gallery entry as the CMS may write it.
///
/// Older list widgets store `["path", ...]`, newer ones
/// `[{ "image": "path" }, ...]`. Anything else (numbers, nulls, objects
/// without an `image` string) is preserved as `Other` and dropped during
/// normalization rather than failing the whole record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GalleryEntry {
    Path(String),
    Wrapped { image: String },
    Other(serde_json::Value),
}

/// Flatten mixed-shape gallery entries into non-empty trimmed path strings.
///
/// Order is preserved; empty and whitespace-only paths are dropped.
pub fn normalize_gallery(entries: Vec<GalleryEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            GalleryEntry::Path(p) => Some(p),
            GalleryEntry::Wrapped { image } => Some(image),
            GalleryEntry::Other(_) => None,
        })
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// A single service offering (e.g. charpente, escaliers).
///
/// One JSON file per service under `content/services/{category}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A customer testimonial shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

/// Home page content from `content/home.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeContent {
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub quote: Quote,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub services: Vec<ServiceCard>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Service teaser card on the home page (distinct from the full
/// [`ServiceContent`] document it links to).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

/// A standalone page generated from a markdown file in the content root
/// (mentions légales, à propos, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from the first `# heading`, or the filename as fallback.
    pub title: String,
    /// URL slug (filename stem).
    pub slug: String,
    /// Raw markdown body.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_entries(json: &str) -> Vec<GalleryEntry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn gallery_plain_strings() {
        let entries = parse_entries(r#"["a.jpg", "b.jpg"]"#);
        assert_eq!(normalize_gallery(entries), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn gallery_wrapped_objects() {
        let entries = parse_entries(r#"[{"image": "a.jpg"}, {"image": "b.jpg"}]"#);
        assert_eq!(normalize_gallery(entries), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn gallery_mixed_shapes_preserve_order() {
        let entries = parse_entries(r#"["a.jpg", {"image": "b.jpg"}, "c.jpg"]"#);
        assert_eq!(normalize_gallery(entries), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn gallery_drops_empty_and_whitespace() {
        let entries = parse_entries(r#"["", "  ", {"image": ""}, "ok.jpg"]"#);
        assert_eq!(normalize_gallery(entries), vec!["ok.jpg"]);
    }

    #[test]
    fn gallery_trims_paths() {
        let entries = parse_entries(r#"["  a.jpg  "]"#);
        assert_eq!(normalize_gallery(entries), vec!["a.jpg"]);
    }

    #[test]
    fn gallery_drops_unexpected_shapes() {
        let entries = parse_entries(r#"[42, null, {"img": "x.jpg"}, "keep.jpg"]"#);
        assert_eq!(normalize_gallery(entries), vec!["keep.jpg"]);
    }

    #[test]
    fn gallery_empty_list() {
        let entries = parse_entries("[]");
        assert!(normalize_gallery(entries).is_empty());
    }

    #[test]
    fn render_key_composite() {
        let r = Realisation {
            title: "Escalier chêne".into(),
            category: "Menuiserie".into(),
            location: "Rennes".into(),
            description: String::new(),
            image: "/images/uploads/escalier.jpg".into(),
            gallery: vec![],
        };
        assert_eq!(
            r.render_key(),
            "Menuiserie__Escalier chêne__Rennes__/images/uploads/escalier.jpg"
        );
    }

    #[test]
    fn render_key_fills_missing_components() {
        let r = Realisation {
            title: String::new(),
            category: "  ".into(),
            location: String::new(),
            description: String::new(),
            image: String::new(),
            gallery: vec![],
        };
        assert_eq!(r.render_key(), "nocat__untitled__noloc__noimg");
    }

    #[test]
    fn realisation_missing_fields_default_to_empty() {
        let r: Realisation = serde_json::from_str(r#"{"title": "Seul le titre"}"#).unwrap();
        assert_eq!(r.title, "Seul le titre");
        assert_eq!(r.category, "");
        assert!(r.gallery.is_empty());
    }

    #[test]
    fn testimonial_optional_project_type() {
        let t: TestimonialContent =
            serde_json::from_str(r#"{"name": "Hugo M.", "rating": 5, "text": "Superbe"}"#).unwrap();
        assert_eq!(t.name, "Hugo M.");
        assert_eq!(t.rating, 5.0);
        assert!(t.project_type.is_none());
    }

    #[test]
    fn home_content_nested_defaults() {
        let h: HomeContent = serde_json::from_str(r#"{"hero_title": "L'Atelier"}"#).unwrap();
        assert_eq!(h.hero_title, "L'Atelier");
        assert_eq!(h.quote.text, "");
        assert!(h.highlights.is_empty());
        assert!(h.services.is_empty());
    }
}
