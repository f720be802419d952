//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (project, service, testimonial, page) is its semantic
//! identity, title and positional index, with filesystem paths shown as
//! secondary context via indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Réalisations
//!     001 Escalier chêne [Menuiserie]
//!         Escalier deux quarts tournant sans contremarches
//!         Galerie: 4 photos
//!
//! Services
//!     001 Charpente
//!         Source: services/structure/charpente.json
//!
//! Témoignages
//!     001 Hugo M. (5/5)
//!
//! Config
//!     config.toml
//! ```
//!
//! Réalisations carry no `Source:` line: the manifest stores them sorted by
//! category and title, detached from their file stems.
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Réalisations → realisations/index.html
//!     Menuiserie → realisations/categorie/menuiserie/index.html
//!     001 Escalier chêne → realisations/escalier-chene/index.html
//!
//! Generated 3 réalisations, 2 category pages, 4 services, 1 page
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure, no I/O and no side effects.

use crate::generate;
use crate::naming::slugify;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered content inventory.
pub fn format_scan_output(manifest: &crate::scan::Manifest, content_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Réalisations".to_string());
    for (i, r) in manifest.realisations.iter().enumerate() {
        let category = if r.category.trim().is_empty() {
            String::new()
        } else {
            format!(" [{}]", r.category.trim())
        };
        lines.push(format!("    {} {}{}", format_index(i + 1), r.title, category));
        if !r.description.trim().is_empty() {
            lines.push(format!(
                "        {}",
                truncate_desc(r.description.trim(), 60)
            ));
        }
        if !r.gallery.is_empty() {
            lines.push(format!("        Galerie: {} photos", r.gallery.len()));
        }
    }

    if !manifest.services.is_empty() {
        lines.push(String::new());
        lines.push("Services".to_string());
        for (i, service) in manifest.services.iter().enumerate() {
            lines.push(format!(
                "    {} {}",
                format_index(i + 1),
                service.content.title
            ));
            lines.push(format!(
                "        Source: services/{}/{}.json",
                service.category, service.slug
            ));
        }
    }

    if !manifest.testimonials.is_empty() {
        lines.push(String::new());
        lines.push("Témoignages".to_string());
        for (i, t) in manifest.testimonials.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({}/5)",
                format_index(i + 1),
                t.name,
                t.rating
            ));
        }
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), page.title));
            lines.push(format!("        Source: {}.md", page.slug));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if content_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (defaults)".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &crate::scan::Manifest, content_root: &Path) {
    for line in format_scan_output(manifest, content_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing generated HTML files.
///
/// Each entity leads with its positional index and title, followed by `→`
/// and the output path. Slugs and category pages are derived the same way
/// the generate stage derives them.
pub fn format_generate_output(manifest: &generate::Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());

    let categories = generate::derive_categories(&manifest.realisations);
    let slugs = generate::project_slugs(&manifest.realisations);

    lines.push("Réalisations \u{2192} realisations/index.html".to_string());
    for category in &categories {
        lines.push(format!(
            "    {} \u{2192} realisations/categorie/{}/index.html",
            category,
            slugify(category)
        ));
    }
    for (i, (slug, r)) in slugs.iter().zip(&manifest.realisations).enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} realisations/{}/index.html",
            format_index(i + 1),
            r.title,
            slug
        ));
    }

    if !manifest.services.is_empty() {
        lines.push(String::new());
        lines.push("Services".to_string());
        for (i, service) in manifest.services.iter().enumerate() {
            lines.push(format!(
                "    {} {} \u{2192} services/{}/{}/index.html",
                format_index(i + 1),
                service.content.title,
                service.category,
                service.slug
            ));
        }
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            lines.push(format!(
                "    {} {} \u{2192} {}.html",
                format_index(i + 1),
                page.title,
                page.slug
            ));
        }
    }

    lines.push(String::new());
    lines.push("Admin \u{2192} admin/index.html, admin/config.json".to_string());

    lines.push(format!(
        "Generated {} réalisations, {} category pages, {} services, {} pages",
        manifest.realisations.len(),
        categories.len(),
        manifest.services.len(),
        manifest.pages.len()
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &generate::Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
