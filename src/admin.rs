//! CMS configuration descriptor.
//!
//! The headless CMS front end (the admin tool non-engineers use to edit the
//! JSON content files) bootstraps itself from a configuration document that
//! describes the backend and the editable collections. This module builds
//! that fixed descriptor from [`SiteConfig`]; it is written to
//! `admin/config.json` during generation and served at `/api/admin-config`
//! by the preview server.
//!
//! The descriptor is static per build: no request input influences it, and
//! there is no error path.

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};

/// Top-level CMS configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub backend: Backend,
    pub media_folder: String,
    pub public_folder: String,
    pub collections: Vec<Collection>,
}

/// Git backend the CMS commits content through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backend {
    pub name: String,
    pub repo: String,
    pub branch: String,
    pub base_url: String,
    pub auth_endpoint: String,
}

/// An editable content collection (folder of JSON documents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub label: String,
    pub folder: String,
    pub create: bool,
    pub extension: String,
    pub format: String,
    pub identifier_field: String,
    pub slug: String,
    pub fields: Vec<Field>,
}

/// A single editor field within a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub name: String,
    pub widget: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Item field for `list` widgets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Box<Field>>,
}

impl Field {
    fn simple(label: &str, name: &str, widget: &str) -> Self {
        Self {
            label: label.to_string(),
            name: name.to_string(),
            widget: widget.to_string(),
            options: None,
            required: None,
            field: None,
        }
    }
}

/// Build the descriptor for this site.
///
/// Exactly one collection is exposed: `realisations`, editable as one JSON
/// file per project, identified by title, with the gallery as an optional
/// list of images.
pub fn admin_config(config: &SiteConfig) -> AdminConfig {
    AdminConfig {
        backend: Backend {
            name: "github".to_string(),
            repo: config.admin.repo.clone(),
            branch: config.admin.branch.clone(),
            base_url: config.site.base_url.clone(),
            auth_endpoint: config.admin.auth_endpoint.clone(),
        },
        media_folder: config.admin.media_folder.clone(),
        public_folder: config.admin.public_folder.clone(),
        collections: vec![Collection {
            name: "realisations".to_string(),
            label: "Réalisations".to_string(),
            folder: "content/realisations".to_string(),
            create: true,
            extension: "json".to_string(),
            format: "json".to_string(),
            identifier_field: "title".to_string(),
            slug: "{{slug}}".to_string(),
            fields: vec![
                Field::simple("Titre", "title", "string"),
                Field {
                    options: Some(config.admin.categories.clone()),
                    ..Field::simple("Catégorie", "category", "select")
                },
                Field::simple("Lieu", "location", "string"),
                Field::simple("Description", "description", "text"),
                Field::simple("Image principale", "image", "image"),
                Field {
                    required: Some(false),
                    field: Some(Box::new(Field::simple("Image", "image", "image"))),
                    ..Field::simple("Galerie d'images", "gallery", "list")
                },
            ],
        }],
    }
}
