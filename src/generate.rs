//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and generates the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, quote, highlights, service cards, testimonials
//! - **Gallery** (`/realisations/index.html`): category filter bar + project grid
//! - **Filtered gallery** (`/realisations/categorie/{cat}/index.html`): one page
//!   per category, a pure projection of the loaded list
//! - **Project detail** (`/realisations/{slug}/index.html`): hero image,
//!   badges, description, normalized image gallery
//! - **Services** (`/services/{category}/{service}/index.html`)
//! - **Markdown pages** (`/{slug}.html`)
//! - **CMS admin** (`/admin/index.html` + `/admin/config.json`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── realisations/
//! │   ├── index.html
//! │   ├── categorie/menuiserie/index.html
//! │   └── escalier-chene/index.html
//! ├── services/structure/charpente/index.html
//! ├── admin/
//! │   ├── index.html
//! │   └── config.json
//! ├── content/                   # JSON tree copied through for the preview server
//! └── images/uploads/            # Media copied from the content tree
//! ```
//!
//! ## Image Fallback
//!
//! Every image reference is resolved through [`ImageResolver`] before it is
//! written into HTML: a reference whose file is missing from the content
//! tree is substituted by the configured fallback path, exactly once. A
//! reference that already is the fallback path is emitted as-is, so a
//! missing placeholder can never cause repeated substitution.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating
//! with automatic XSS escaping. The stylesheet is embedded at compile time
//! and prefixed with color custom properties generated from config.

use crate::admin;
use crate::config::{self, SiteConfig};
use crate::naming::{slugify, unique_slug};
use crate::scan::LoadedService;
use crate::types::{HomeContent, Page, Realisation, TestimonialContent};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{html as md_html, Parser};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scan manifest as read back from disk.
#[derive(Debug, Deserialize, serde::Serialize)]
pub struct Manifest {
    pub home: HomeContent,
    pub services: Vec<LoadedService>,
    pub testimonials: Vec<TestimonialContent>,
    pub realisations: Vec<Realisation>,
    #[serde(default)]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// The gallery's unfiltered view. Not a category; filter pages live under
/// `realisations/categorie/` so project slugs cannot collide with them.
const ALL_CATEGORIES_LABEL: &str = "Tous";

/// Resolves image references against the content tree, substituting the
/// fallback path for missing files.
pub struct ImageResolver<'a> {
    content_dir: &'a Path,
    fallback: &'a str,
}

impl<'a> ImageResolver<'a> {
    pub fn new(content_dir: &'a Path, fallback: &'a str) -> Self {
        Self {
            content_dir,
            fallback,
        }
    }

    /// Resolve a public image path to the path actually written into HTML.
    ///
    /// Empty references and references to missing files become the fallback
    /// path. The fallback itself, and external URLs, pass through unchecked;
    /// substitution therefore happens at most once per reference.
    pub fn resolve(&self, path: &str) -> String {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return self.fallback.to_string();
        }
        if trimmed == self.fallback || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return trimmed.to_string();
        }
        if self.content_dir.join(trimmed.trim_start_matches('/')).is_file() {
            trimmed.to_string()
        } else {
            self.fallback.to_string()
        }
    }
}

pub fn generate(
    manifest_path: &Path,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    // Media and content JSON are copied through so the generated tree is
    // self-contained and the preview server can serve the conventional
    // /content/*.json and /images/uploads/* paths.
    copy_media(content_dir, output_dir)?;
    copy_content_json(content_dir, &output_dir.join("content"))?;

    let resolver = ImageResolver::new(content_dir, &manifest.config.site.fallback_image);
    let nav = nav_links(&manifest);

    // Home page
    let home_html = render_home(&manifest, &nav, &resolver, &css);
    fs::write(output_dir.join("index.html"), home_html.into_string())?;

    // Gallery pages: project slugs first ("categorie" is reserved for the
    // filter pages), then the all-projects page and one page per category.
    let slugs = project_slugs(&manifest.realisations);
    let categories = derive_categories(&manifest.realisations);

    let realisations_dir = output_dir.join("realisations");
    fs::create_dir_all(&realisations_dir)?;

    let gallery_html = render_gallery(&manifest, &slugs, &categories, None, &nav, &resolver, &css);
    fs::write(realisations_dir.join("index.html"), gallery_html.into_string())?;

    for category in &categories {
        let dir = realisations_dir.join("categorie").join(slugify(category));
        fs::create_dir_all(&dir)?;
        let html = render_gallery(
            &manifest,
            &slugs,
            &categories,
            Some(category),
            &nav,
            &resolver,
            &css,
        );
        fs::write(dir.join("index.html"), html.into_string())?;
    }

    for (slug, realisation) in slugs.iter().zip(&manifest.realisations) {
        let dir = realisations_dir.join(slug);
        fs::create_dir_all(&dir)?;
        let html = render_realisation_detail(&manifest, realisation, &nav, &resolver, &css);
        fs::write(dir.join("index.html"), html.into_string())?;
    }

    // Service pages
    for service in &manifest.services {
        let dir = output_dir
            .join("services")
            .join(&service.category)
            .join(&service.slug);
        fs::create_dir_all(&dir)?;
        let html = render_service_page(&manifest, service, &nav, &resolver, &css);
        fs::write(dir.join("index.html"), html.into_string())?;
    }

    // Markdown pages
    for page in &manifest.pages {
        let html = render_markdown_page(&manifest, page, &nav, &css);
        fs::write(
            output_dir.join(format!("{}.html", page.slug)),
            html.into_string(),
        )?;
    }

    // CMS admin: shell + descriptor
    let admin_dir = output_dir.join("admin");
    fs::create_dir_all(&admin_dir)?;
    let descriptor = admin::admin_config(&manifest.config);
    fs::write(
        admin_dir.join("config.json"),
        serde_json::to_string_pretty(&descriptor)?,
    )?;
    fs::write(
        admin_dir.join("index.html"),
        render_admin_shell(&manifest.config).into_string(),
    )?;

    Ok(())
}

/// Copy `content/images/` to the output root so the public `/images/...`
/// paths resolve on the generated site.
fn copy_media(content_dir: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    let media_src = content_dir.join("images");
    if !media_src.is_dir() {
        return Ok(());
    }
    for entry in walkdir::WalkDir::new(&media_src) {
        let entry = entry.map_err(|e| GenerateError::Io(e.into()))?;
        let rel = entry
            .path()
            .strip_prefix(content_dir)
            .expect("walkdir stays under content_dir");
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
        }
    }
    Ok(())
}

/// Copy the JSON documents of the content tree (home, services,
/// testimonials, realisations) into `dist/content/`.
fn copy_content_json(content_dir: &Path, dst_root: &Path) -> Result<(), GenerateError> {
    for entry in walkdir::WalkDir::new(content_dir) {
        let entry = entry.map_err(|e| GenerateError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_json = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        // The media tree may contain stray .json sidecars; skip it wholesale.
        let under_images = entry
            .path()
            .strip_prefix(content_dir)
            .map(|rel| rel.starts_with("images"))
            .unwrap_or(false);
        if !is_json || under_images {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(content_dir)
            .expect("walkdir stays under content_dir");
        let dst = dst_root.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dst)?;
    }
    Ok(())
}

/// Derive the category filter set from the loaded projects: non-empty
/// categories in list order (the list is already sorted by category).
///
/// Categories are deduplicated by their slug, not by exact string, because
/// each one becomes a `realisations/categorie/{slug}/` directory: spellings
/// that differ only in case or diacritics would otherwise generate the same
/// path and overwrite each other. The first spelling encountered becomes
/// the display label; [`render_gallery`] matches projects by slug, so the
/// surviving page shows every variant's projects.
pub fn derive_categories(realisations: &[Realisation]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for r in realisations {
        let cat = r.category.trim();
        if !cat.is_empty() && !categories.iter().any(|c| slugify(c) == slugify(cat)) {
            categories.push(cat.to_string());
        }
    }
    categories
}

/// Derive one URL slug per project, in list order.
///
/// Duplicate titles get numeric suffixes; `categorie` is pre-reserved for
/// the filter pages.
pub fn project_slugs(realisations: &[Realisation]) -> Vec<String> {
    let mut taken = vec!["categorie".to_string()];
    realisations
        .iter()
        .map(|r| unique_slug(&r.title, &mut taken))
        .collect()
}

struct NavLink {
    label: String,
    href: String,
}

fn nav_links(manifest: &Manifest) -> Vec<NavLink> {
    let mut links = vec![
        NavLink {
            label: "Accueil".to_string(),
            href: "/".to_string(),
        },
        NavLink {
            label: "Réalisations".to_string(),
            href: "/realisations/".to_string(),
        },
    ];
    for page in &manifest.pages {
        links.push(NavLink {
            label: page.title.clone(),
            href: format!("/{}.html", page.slug),
        });
    }
    links
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with title, tagline and navigation.
fn site_header(config: &SiteConfig, nav: &[NavLink], current: &str) -> Markup {
    html! {
        header.site-header {
            div.site-identity {
                a.site-title href="/" { (config.site.title) }
                p.site-tagline { (config.site.tagline) }
            }
            nav.site-nav {
                ul {
                    @for link in nav {
                        li class=[(link.href == current).then_some("current")] {
                            a href=(link.href) { (link.label) }
                        }
                    }
                }
            }
        }
    }
}

/// Category badge with the original's fallback label for uncategorized
/// projects.
fn category_badge(category: &str) -> Markup {
    let label = if category.trim().is_empty() {
        "Projet"
    } else {
        category.trim()
    };
    html! { span.badge { (label) } }
}

/// Description paragraph, or the italic placeholder when empty.
fn description_text(description: &str) -> Markup {
    if description.trim().is_empty() {
        html! { p.description.placeholder { "Description à venir." } }
    } else {
        html! { p.description { (description) } }
    }
}

/// Star rating for testimonials, clamped to 0-5 full stars.
fn rating_stars(rating: f64) -> Markup {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    let stars: String = "★".repeat(full) + &"☆".repeat(5 - full);
    html! { span.rating aria-label={ "Note " (rating) " sur 5" } { (stars) } }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page.
fn render_home(
    manifest: &Manifest,
    nav: &[NavLink],
    resolver: &ImageResolver,
    css: &str,
) -> Markup {
    let home = &manifest.home;
    let content = html! {
        (site_header(&manifest.config, nav, "/"))
        main.home-page {
            section.hero {
                img.hero-image src=(resolver.resolve(&home.hero_image)) alt=(home.hero_title);
                div.hero-text {
                    h1 { (home.hero_title) }
                    p { (home.hero_subtitle) }
                }
            }
            @if !home.quote.text.trim().is_empty() {
                section.quote {
                    blockquote { (home.quote.text) }
                    p.quote-description { (home.quote.description) }
                }
            }
            @if !home.highlights.is_empty() {
                section.highlights {
                    @for highlight in &home.highlights {
                        div.highlight {
                            h3 { (highlight.title) }
                            p { (highlight.description) }
                        }
                    }
                }
            }
            @if !home.services.is_empty() {
                section.service-cards {
                    h2 { "Nos services" }
                    div.card-grid {
                        @for card in &home.services {
                            a.card href=(card.link) {
                                img src=(resolver.resolve(&card.image)) alt=(card.title) loading="lazy";
                                h3 { (card.title) }
                                p { (card.description) }
                            }
                        }
                    }
                }
            }
            @if !manifest.testimonials.is_empty() {
                section.testimonials {
                    h2 { "Ils nous font confiance" }
                    div.card-grid {
                        @for t in &manifest.testimonials {
                            figure.testimonial {
                                (rating_stars(t.rating))
                                blockquote { (t.text) }
                                figcaption {
                                    (t.name)
                                    @if let Some(project) = &t.project_type {
                                        span.project-type { " · " (project) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(&manifest.config.site.title, css, content)
}

/// Renders a gallery page: filter bar plus the project grid.
///
/// `active` selects a category; `None` is the default "Tous" view. The
/// filtered list is a pure projection of `manifest.realisations`.
fn render_gallery(
    manifest: &Manifest,
    slugs: &[String],
    categories: &[String],
    active: Option<&str>,
    nav: &[NavLink],
    resolver: &ImageResolver,
    css: &str,
) -> Markup {
    // Match by slug, the same key derive_categories dedupes on, so case
    // and diacritic variants of a category land on the one filter page.
    let active_slug = active.map(slugify);
    let filtered: Vec<(&String, &Realisation)> = slugs
        .iter()
        .zip(&manifest.realisations)
        .filter(|(_, r)| match &active_slug {
            None => true,
            Some(slug) => &slugify(r.category.trim()) == slug,
        })
        .collect();

    let content = html! {
        (site_header(&manifest.config, nav, "/realisations/"))
        main.gallery-page {
            header.page-header {
                h1 { "Nos Réalisations" }
                p { "Découvrez quelques-uns de nos projets terminés" }
            }
            nav.filter-bar {
                a class=[active.is_none().then_some("active")] href="/realisations/" {
                    (ALL_CATEGORIES_LABEL)
                }
                @for category in categories {
                    a class=[(active == Some(category.as_str())).then_some("active")]
                        href={ "/realisations/categorie/" (slugify(category)) "/" } {
                        (category)
                    }
                }
            }
            @if filtered.is_empty() {
                p.empty-state { "Aucune réalisation dans cette catégorie pour le moment." }
            } @else {
                div.project-grid {
                    @for (slug, project) in &filtered {
                        a.project-card id=(project.render_key()) href={ "/realisations/" (slug) "/" } {
                            img src=(resolver.resolve(&project.image)) alt=(project.title) loading="lazy";
                            div.card-body {
                                div.card-meta {
                                    (category_badge(&project.category))
                                    @if !project.location.trim().is_empty() {
                                        span.location { (project.location) }
                                    }
                                }
                                h3 { (project.title) }
                                (description_text(&project.description))
                            }
                        }
                    }
                }
            }
        }
    };

    let title = match active {
        Some(cat) => format!("Réalisations - {} - {}", cat, manifest.config.site.title),
        None => format!("Réalisations - {}", manifest.config.site.title),
    };
    base_document(&title, css, content)
}

/// Renders a project detail page with its normalized image gallery.
fn render_realisation_detail(
    manifest: &Manifest,
    project: &Realisation,
    nav: &[NavLink],
    resolver: &ImageResolver,
    css: &str,
) -> Markup {
    let content = html! {
        (site_header(&manifest.config, nav, "/realisations/"))
        main.detail-page {
            nav.breadcrumb {
                a href="/realisations/" { "Réalisations" }
                " › "
                (project.title)
            }
            h1 { (project.title) }
            img.detail-hero src=(resolver.resolve(&project.image)) alt=(project.title);
            div.card-meta {
                (category_badge(&project.category))
                @if !project.location.trim().is_empty() {
                    span.location { (project.location) }
                }
            }
            (description_text(&project.description))
            @if !project.gallery.is_empty() {
                section.gallery {
                    h2 { "Galerie" }
                    div.gallery-grid {
                        @for image in &project.gallery {
                            img src=(resolver.resolve(image)) alt=(project.title) loading="lazy";
                        }
                    }
                }
            }
        }
    };
    let title = format!("{} - {}", project.title, manifest.config.site.title);
    base_document(&title, css, content)
}

/// Renders a service page.
fn render_service_page(
    manifest: &Manifest,
    service: &LoadedService,
    nav: &[NavLink],
    resolver: &ImageResolver,
    css: &str,
) -> Markup {
    let content = &service.content;
    let body = html! {
        (site_header(&manifest.config, nav, ""))
        main.service-page {
            nav.breadcrumb {
                a href="/" { "Accueil" }
                " › "
                (content.title)
            }
            h1 { (content.title) }
            @if !content.subtitle.trim().is_empty() {
                p.subtitle { (content.subtitle) }
            }
            img.detail-hero src=(resolver.resolve(&content.image)) alt=(content.title);
            (description_text(&content.description))
            @if !content.features.is_empty() {
                ul.features {
                    @for feature in &content.features {
                        li { (feature) }
                    }
                }
            }
        }
    };
    let title = format!("{} - {}", content.title, manifest.config.site.title);
    base_document(&title, css, body)
}

/// Renders a standalone page from markdown content.
fn render_markdown_page(manifest: &Manifest, page: &Page, nav: &[NavLink], css: &str) -> Markup {
    let parser = Parser::new(&page.body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let current = format!("/{}.html", page.slug);
    let content = html! {
        (site_header(&manifest.config, nav, &current))
        main.markdown-page {
            article {
                (PreEscaped(body_html))
            }
        }
    };
    let title = format!("{} - {}", page.title, manifest.config.site.title);
    base_document(&title, css, content)
}

/// Renders the CMS admin shell that loads the editor against
/// `/admin/config.json`.
fn render_admin_shell(config: &SiteConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { "Administration - " (config.site.title) }
                link rel="cms-config-url" type="application/json" href="/admin/config.json";
            }
            body {
                script src="https://unpkg.com/decap-cms@^3.0.0/dist/decap-cms.js" {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Highlight, Quote, ServiceCard, ServiceContent};
    use tempfile::TempDir;

    fn realisation(title: &str, category: &str) -> Realisation {
        Realisation {
            title: title.to_string(),
            category: category.to_string(),
            location: "Rennes".to_string(),
            description: "Un beau projet.".to_string(),
            image: "/images/uploads/photo.jpg".to_string(),
            gallery: vec![],
        }
    }

    fn test_manifest() -> Manifest {
        Manifest {
            home: HomeContent {
                hero_title: "L'art du bois".to_string(),
                hero_subtitle: "Depuis 1987".to_string(),
                hero_image: "/images/uploads/hero.jpg".to_string(),
                quote: Quote {
                    text: "Le bois vit".to_string(),
                    description: "Notre philosophie".to_string(),
                },
                highlights: vec![Highlight {
                    title: "Sur mesure".to_string(),
                    description: "Chaque projet est unique".to_string(),
                }],
                services: vec![ServiceCard {
                    title: "Charpente".to_string(),
                    description: "Traditionnelle".to_string(),
                    image: "/images/uploads/charpente.jpg".to_string(),
                    link: "/services/structure/charpente/".to_string(),
                }],
            },
            services: vec![LoadedService {
                category: "structure".to_string(),
                slug: "charpente".to_string(),
                content: ServiceContent {
                    title: "Charpente".to_string(),
                    subtitle: "Traditionnelle".to_string(),
                    description: "Fermes et pannes en chêne.".to_string(),
                    image: "/images/uploads/charpente.jpg".to_string(),
                    features: vec!["Chêne".to_string(), "Douglas".to_string()],
                },
            }],
            testimonials: vec![TestimonialContent {
                name: "Hugo M.".to_string(),
                rating: 5.0,
                text: "Travail remarquable".to_string(),
                project_type: Some("Escalier".to_string()),
            }],
            realisations: vec![
                realisation("Escalier chêne", "Menuiserie"),
                realisation("Extension ossature", "Extension Bois"),
            ],
            pages: vec![],
            config: SiteConfig::default(),
        }
    }

    fn resolver_in(tmp: &TempDir) -> ImageResolver<'_> {
        ImageResolver::new(tmp.path(), "/images/uploads/placeholder.jpg")
    }

    // =========================================================================
    // Image fallback resolution
    // =========================================================================

    #[test]
    fn resolve_existing_image_passes_through() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("images/uploads");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("photo.jpg"), "fake image").unwrap();

        let resolver = resolver_in(&tmp);
        assert_eq!(
            resolver.resolve("/images/uploads/photo.jpg"),
            "/images/uploads/photo.jpg"
        );
    }

    #[test]
    fn resolve_missing_image_substitutes_fallback_once() {
        let tmp = TempDir::new().unwrap();
        let resolver = resolver_in(&tmp);
        assert_eq!(
            resolver.resolve("/images/uploads/missing.jpg"),
            "/images/uploads/placeholder.jpg"
        );
    }

    #[test]
    fn resolve_missing_fallback_does_not_loop() {
        // The fallback file itself does not exist; resolving the fallback
        // path must return it unchanged rather than substituting again.
        let tmp = TempDir::new().unwrap();
        let resolver = resolver_in(&tmp);
        assert_eq!(
            resolver.resolve("/images/uploads/placeholder.jpg"),
            "/images/uploads/placeholder.jpg"
        );
    }

    #[test]
    fn resolve_empty_reference_is_fallback() {
        let tmp = TempDir::new().unwrap();
        let resolver = resolver_in(&tmp);
        assert_eq!(resolver.resolve("  "), "/images/uploads/placeholder.jpg");
    }

    #[test]
    fn resolve_external_url_passes_through() {
        let tmp = TempDir::new().unwrap();
        let resolver = resolver_in(&tmp);
        assert_eq!(
            resolver.resolve("https://example.com/x.jpg"),
            "https://example.com/x.jpg"
        );
    }

    // =========================================================================
    // Category and slug derivation
    // =========================================================================

    #[test]
    fn categories_unique_in_list_order() {
        let realisations = vec![
            realisation("a", "Menuiserie"),
            realisation("b", "Menuiserie"),
            realisation("c", "Structure"),
            realisation("d", ""),
        ];
        assert_eq!(derive_categories(&realisations), vec!["Menuiserie", "Structure"]);
    }

    #[test]
    fn categories_dedupe_case_and_diacritic_variants() {
        let realisations = vec![
            realisation("a", "Menuiserie"),
            realisation("b", "menuiserie"),
            realisation("c", "Aménagement"),
            realisation("d", "Amenagement"),
        ];
        assert_eq!(
            derive_categories(&realisations),
            vec!["Menuiserie", "Aménagement"]
        );
    }

    #[test]
    fn gallery_filter_groups_category_spelling_variants() {
        // "Menuiserie" and "menuiserie" share one filter page directory;
        // that page must show both spellings' projects.
        let tmp = TempDir::new().unwrap();
        let mut manifest = test_manifest();
        manifest.realisations = vec![
            realisation("Projet A", "Menuiserie"),
            realisation("Projet B", "menuiserie"),
        ];
        let nav = nav_links(&manifest);
        let slugs = project_slugs(&manifest.realisations);
        let categories = derive_categories(&manifest.realisations);
        assert_eq!(categories, vec!["Menuiserie"]);

        let html = render_gallery(
            &manifest,
            &slugs,
            &categories,
            Some("Menuiserie"),
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        assert!(html.contains("Projet A"));
        assert!(html.contains("Projet B"));
    }

    #[test]
    fn project_slugs_disambiguate_duplicates() {
        let realisations = vec![
            realisation("Escalier", "Menuiserie"),
            realisation("Escalier", "Structure"),
        ];
        assert_eq!(project_slugs(&realisations), vec!["escalier", "escalier-2"]);
    }

    #[test]
    fn project_slugs_avoid_categorie_segment() {
        let realisations = vec![realisation("Catégorie", "Menuiserie")];
        assert_eq!(project_slugs(&realisations), vec!["categorie-2"]);
    }

    // =========================================================================
    // Page renderers
    // =========================================================================

    #[test]
    fn home_includes_hero_and_testimonials() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let html = render_home(&manifest, &nav, &resolver_in(&tmp), "").into_string();

        assert!(html.contains("L'art du bois"));
        assert!(html.contains("Le bois vit"));
        assert!(html.contains("Sur mesure"));
        assert!(html.contains("Hugo M."));
        assert!(html.contains("★★★★★"));
    }

    #[test]
    fn gallery_filter_bar_lists_all_categories() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let slugs = project_slugs(&manifest.realisations);
        let categories = derive_categories(&manifest.realisations);
        let html = render_gallery(
            &manifest,
            &slugs,
            &categories,
            None,
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        assert!(html.contains("Tous"));
        assert!(html.contains("Menuiserie"));
        assert!(html.contains("/realisations/categorie/extension-bois/"));
        // Default view shows every project
        assert!(html.contains("Escalier chêne"));
        assert!(html.contains("Extension ossature"));
    }

    #[test]
    fn gallery_filtered_view_is_pure_projection() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let slugs = project_slugs(&manifest.realisations);
        let categories = derive_categories(&manifest.realisations);
        let html = render_gallery(
            &manifest,
            &slugs,
            &categories,
            Some("Menuiserie"),
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        assert!(html.contains("Escalier chêne"));
        assert!(!html.contains("Extension ossature"));
    }

    #[test]
    fn gallery_empty_category_shows_empty_state() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = test_manifest();
        manifest.realisations.clear();
        let nav = nav_links(&manifest);
        let html = render_gallery(&manifest, &[], &[], None, &nav, &resolver_in(&tmp), "")
            .into_string();

        assert!(html.contains("Aucune réalisation dans cette catégorie pour le moment."));
    }

    #[test]
    fn gallery_cards_use_render_key_as_id() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let slugs = project_slugs(&manifest.realisations);
        let html = render_gallery(
            &manifest,
            &slugs,
            &[],
            None,
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        assert!(html.contains(&manifest.realisations[0].render_key()));
    }

    #[test]
    fn gallery_missing_image_uses_fallback() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let slugs = project_slugs(&manifest.realisations);
        let html = render_gallery(
            &manifest,
            &slugs,
            &[],
            None,
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        // No image file exists in the temp content dir
        assert!(html.contains("/images/uploads/placeholder.jpg"));
        assert!(!html.contains(r#"src="/images/uploads/photo.jpg""#));
    }

    #[test]
    fn detail_shows_gallery_section_only_when_nonempty() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);

        let without = render_realisation_detail(
            &manifest,
            &manifest.realisations[0],
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();
        assert!(!without.contains("Galerie"));

        let mut with_gallery = manifest.realisations[0].clone();
        with_gallery.gallery = vec!["/images/uploads/g1.jpg".to_string()];
        let with = render_realisation_detail(&manifest, &with_gallery, &nav, &resolver_in(&tmp), "")
            .into_string();
        assert!(with.contains("Galerie"));
        assert!(with.contains("gallery-grid"));
    }

    #[test]
    fn detail_empty_description_shows_placeholder() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let mut project = manifest.realisations[0].clone();
        project.description = String::new();
        let html = render_realisation_detail(&manifest, &project, &nav, &resolver_in(&tmp), "")
            .into_string();

        assert!(html.contains("Description à venir."));
    }

    #[test]
    fn service_page_lists_features() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let html = render_service_page(
            &manifest,
            &manifest.services[0],
            &nav,
            &resolver_in(&tmp),
            "",
        )
        .into_string();

        assert!(html.contains("Charpente"));
        assert!(html.contains("Traditionnelle"));
        assert!(html.contains("<li>Chêne</li>"));
    }

    #[test]
    fn markdown_page_converted() {
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let page = Page {
            title: "Mentions légales".to_string(),
            slug: "mentions-legales".to_string(),
            body: "# Mentions légales\n\nSARL **Atelier Bois**.".to_string(),
        };
        let html = render_markdown_page(&manifest, &page, &nav, "").into_string();

        assert!(html.contains("<strong>Atelier Bois</strong>"));
        assert!(html.contains("<title>Mentions légales - Atelier Bois</title>"));
    }

    #[test]
    fn admin_shell_points_at_config() {
        let html = render_admin_shell(&SiteConfig::default()).into_string();
        assert!(html.contains("/admin/config.json"));
        assert!(html.contains("decap-cms"));
    }

    #[test]
    fn html_escape_in_maud() {
        let tmp = TempDir::new().unwrap();
        let manifest = test_manifest();
        let nav = nav_links(&manifest);
        let mut project = manifest.realisations[0].clone();
        project.title = "<script>alert('xss')</script>".to_string();
        let html = render_realisation_detail(&manifest, &project, &nav, &resolver_in(&tmp), "")
            .into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn rating_stars_clamped() {
        assert!(rating_stars(7.0).into_string().contains("★★★★★"));
        assert!(rating_stars(-1.0).into_string().contains("☆☆☆☆☆"));
        let three = rating_stars(3.2).into_string();
        assert!(three.contains("★★★☆☆"));
    }

    // =========================================================================
    // Full generation
    // =========================================================================

    #[test]
    fn generate_writes_expected_tree() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();

        // Minimal content tree with one upload
        let uploads = content.path().join("images/uploads");
        fs::create_dir_all(&uploads).unwrap();
        fs::write(uploads.join("photo.jpg"), "fake image").unwrap();
        fs::create_dir_all(content.path().join("realisations")).unwrap();
        fs::write(
            content.path().join("realisations/escalier.json"),
            r#"{"title": "Escalier chêne", "category": "Menuiserie"}"#,
        )
        .unwrap();

        let manifest = test_manifest();
        let manifest_path = temp.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        generate(&manifest_path, content.path(), out.path()).unwrap();

        assert!(out.path().join("index.html").is_file());
        assert!(out.path().join("realisations/index.html").is_file());
        assert!(out
            .path()
            .join("realisations/categorie/menuiserie/index.html")
            .is_file());
        assert!(out.path().join("realisations/escalier-chene/index.html").is_file());
        assert!(out
            .path()
            .join("services/structure/charpente/index.html")
            .is_file());
        assert!(out.path().join("admin/index.html").is_file());
        assert!(out.path().join("admin/config.json").is_file());
        assert!(out.path().join("images/uploads/photo.jpg").is_file());
        assert!(out.path().join("content/realisations/escalier.json").is_file());

        let descriptor: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.path().join("admin/config.json")).unwrap())
                .unwrap();
        assert_eq!(descriptor["backend"]["name"], "github");
    }
}
