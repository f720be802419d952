//! Content loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the CMS-authored JSON content tree
//! and produces a structured manifest that the generate stage consumes.
//!
//! ## Content Structure
//!
//! The CMS writes one JSON document per content item:
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── home.json                    # Home page content
//! ├── mentions-legales.md          # Standalone markdown page (optional)
//! ├── services/
//! │   ├── structure/
//! │   │   └── charpente.json
//! │   └── menuiserie/
//! │       └── escaliers.json
//! ├── testimonials/
//! │   ├── hugo-m.json              # Enumerated in config ([content] testimonials)
//! │   └── claire-d.json
//! ├── realisations/
//! │   ├── escalier-chene.json      # One file per completed project
//! │   └── extension-ossature.json
//! └── images/uploads/              # Media uploaded through the CMS
//! ```
//!
//! ## Loader Contracts
//!
//! Two failure regimes, matching how each document set is consumed:
//!
//! - **Single-resource loaders** ([`load_home`], [`load_service`]) propagate
//!   a generic error when the file is missing or unparseable.
//! - **Aggregate loaders** ([`load_testimonials`], [`load_realisations`])
//!   treat any individual failure as "absent": the item is skipped with a
//!   note on stderr and the rest of the list is returned. A systemic failure
//!   (e.g. the directory itself is unreadable) yields an empty list.
//!
//! Realisations are additionally validated: an entry without a non-empty
//! string title is excluded. Gallery fields are normalized from their mixed
//! CMS shapes into flat path lists, and the final list is sorted by category
//! then title (case- and diacritic-insensitive, ascending).

use crate::config::{self, SiteConfig};
use crate::naming;
use crate::types::{
    normalize_gallery, GalleryEntry, HomeContent, Page, Realisation, ServiceContent,
    TestimonialContent,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Missing content file: {0}")]
    MissingContent(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub home: HomeContent,
    pub services: Vec<LoadedService>,
    pub testimonials: Vec<TestimonialContent>,
    pub realisations: Vec<Realisation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

/// A service document together with its position in the services tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedService {
    /// Category directory name (structure, menuiserie, agencement, extension).
    pub category: String,
    /// File stem, used as the URL segment.
    pub slug: String,
    pub content: ServiceContent,
}

/// Realisation document as the CMS writes it, before normalization.
///
/// `title` stays an `Option` here so validation can distinguish "absent"
/// from "present but empty"; both are rejected.
#[derive(Debug, Deserialize)]
struct RawRealisation {
    title: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    gallery: Vec<GalleryEntry>,
}

/// Scan the content root and assemble the full manifest.
///
/// A missing or malformed `home.json` degrades to empty home content with a
/// note on stderr; the aggregate loaders degrade per their own contracts.
/// Only root-level problems (unreadable content dir, invalid config.toml)
/// are fatal.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingContent(root.to_path_buf()));
    }

    let config = config::load_config(root)?;

    let home = match load_home(root) {
        Ok(home) => home,
        Err(e) => {
            eprintln!("warning: home content unavailable ({e}), using empty defaults");
            HomeContent::default()
        }
    };

    Ok(Manifest {
        home,
        services: load_services(root),
        testimonials: load_testimonials(root, &config.content.testimonials),
        realisations: load_realisations(root),
        pages: parse_pages(root)?,
        config,
    })
}

/// Read and parse a single JSON document into `T`.
fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScanError> {
    if !path.is_file() {
        return Err(ScanError::MissingContent(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ScanError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the home page content from `content/home.json`.
pub fn load_home(root: &Path) -> Result<HomeContent, ScanError> {
    load_json(&root.join("home.json"))
}

/// Load one service document from `content/services/{category}/{service}.json`.
pub fn load_service(root: &Path, category: &str, service: &str) -> Result<ServiceContent, ScanError> {
    load_json(
        &root
            .join("services")
            .join(category)
            .join(format!("{service}.json")),
    )
}

/// Enumerate the services tree and load every service document.
///
/// Results are ordered by category then slug (directory order is not
/// stable across filesystems). Unreadable documents are skipped.
pub fn load_services(root: &Path) -> Vec<LoadedService> {
    let services_dir = root.join("services");
    let Ok(categories) = fs::read_dir(&services_dir) else {
        return Vec::new();
    };

    let mut services = Vec::new();
    let mut category_dirs: Vec<PathBuf> = categories
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    category_dirs.sort();

    for category_dir in category_dirs {
        let category = category_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let Ok(entries) = fs::read_dir(&category_dir) else {
            continue;
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_json(p))
            .collect();
        files.sort();

        for file in files {
            let slug = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            match load_json::<ServiceContent>(&file) {
                Ok(content) => services.push(LoadedService {
                    category: category.clone(),
                    slug,
                    content,
                }),
                Err(e) => eprintln!("warning: skipping service {}: {e}", file.display()),
            }
        }
    }
    services
}

/// Load the enumerated testimonial set from `content/testimonials/`.
///
/// Each stem in `files` resolves to `{stem}.json`; a missing or malformed
/// file is treated as absent and filtered out. Order follows `files`.
pub fn load_testimonials(root: &Path, files: &[String]) -> Vec<TestimonialContent> {
    let dir = root.join("testimonials");
    files
        .iter()
        .filter_map(|stem| {
            let path = dir.join(format!("{stem}.json"));
            match load_json::<TestimonialContent>(&path) {
                Ok(t) => Some(t),
                Err(_) => None,
            }
        })
        .collect()
}

/// Load all realisations from `content/realisations/`.
///
/// Discovery happens here, at build time; the generated site carries the
/// resulting list and never enumerates directories at runtime. `index.json`
/// leftovers are ignored. Entries without a non-empty string title are
/// excluded, galleries are normalized, and the list is sorted by category
/// then title (case- and diacritic-insensitive).
///
/// Any unexpected failure yields an empty list with a note on stderr.
pub fn load_realisations(root: &Path) -> Vec<Realisation> {
    let dir = root.join("realisations");
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("warning: cannot read {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_json(p))
        .filter(|p| {
            p.file_name()
                .map(|n| n != "index.json")
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut realisations: Vec<Realisation> = files
        .iter()
        .filter_map(|path| match load_json::<RawRealisation>(path) {
            Ok(raw) => validate_realisation(raw),
            Err(e) => {
                eprintln!("warning: skipping realisation {}: {e}", path.display());
                None
            }
        })
        .collect();

    realisations.sort_by(|a, b| {
        let key_a = (naming::sort_key(&a.category), naming::sort_key(&a.title));
        let key_b = (naming::sort_key(&b.category), naming::sort_key(&b.title));
        key_a.cmp(&key_b)
    });
    realisations
}

/// Reject entries without a usable title; normalize the gallery otherwise.
fn validate_realisation(raw: RawRealisation) -> Option<Realisation> {
    let title = raw.title?;
    if title.trim().is_empty() {
        return None;
    }
    Some(Realisation {
        title,
        category: raw.category,
        location: raw.location,
        description: raw.description,
        image: raw.image,
        gallery: normalize_gallery(raw.gallery),
    })
}

/// Parse markdown files in the content root into standalone pages.
///
/// The page title comes from the first `# heading`, falling back to the
/// filename stem with dashes as spaces.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    md_files.sort();

    let mut pages = Vec::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let body = fs::read_to_string(md_path)?;
        let title = body
            .lines()
            .find(|line| line.starts_with("# "))
            .map(|line| line.trim_start_matches("# ").trim().to_string())
            .unwrap_or_else(|| stem.replace('-', " "));

        pages.push(Page {
            title,
            slug: stem,
            body,
        });
    }
    Ok(pages)
}

fn is_json(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
}
