//! # Atelier Vitrine
//!
//! A static site generator for a woodworking shop's showcase site. The CMS
//! writes JSON documents into a content directory; this crate turns them
//! into a plain HTML site with a project gallery, service pages, and the
//! CMS admin panel configuration.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content is processed through two independent stages, joined by a JSON
//! manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (JSON documents → validated records)
//! 2. Generate  manifest  →  dist/            (final HTML site + admin descriptor)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Resilience boundaries**: scan owns all the tolerance rules (skipping
//!   unreadable documents, excluding untitled projects, normalizing mixed
//!   gallery shapes), so generate can assume clean records.
//! - **Testability**: generate is a pure function from manifest to HTML.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — loads content documents, validates and normalizes them into the manifest |
//! | [`generate`] | Stage 2 — renders the HTML site from the manifest using Maud |
//! | [`admin`] | CMS configuration descriptor (backend, media paths, editorial collections) |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Content record types shared between stages (`Realisation`, `HomeContent`, ...) |
//! | [`naming`] | Slug derivation for project and category URLs |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//! | [`serve`] | Local preview server with the admin config API (feature `serve`) |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, all interpolation
//! is auto-escaped, and there is no template directory to ship.
//!
//! ## Tolerant Loading, Strict Rendering
//!
//! CMS-authored content is messy: fields go missing, list widgets change
//! their storage shape between versions, documents get half-saved. The scan
//! stage absorbs all of this. A single unreadable project document drops
//! that one project with a warning instead of failing the build; a project
//! without a title is excluded; gallery entries are flattened from both
//! their legacy and current shapes. The generate stage then renders whatever
//! survived without further checks, substituting the configured placeholder
//! for image references whose files are missing.
//!
//! ## Category Pages Instead of Client-Side Filtering
//!
//! The gallery's category filter is materialized as one generated page per
//! category plus an unfiltered default view. Each filtered page is a pure
//! projection of the same project list, so the filter can never disagree
//! with the data, and the site needs no JavaScript.
//!
//! ## Build-Time Admin Descriptor
//!
//! The CMS admin panel fetches its configuration from an endpoint rather
//! than a static YAML file, so the repository and branch can follow the
//! site config. The descriptor is generated at build time into
//! `admin/config.json` and also served from `/api/admin-config` by the
//! preview server (and by the production host).

pub mod admin;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
#[cfg(feature = "serve")]
pub mod serve;
pub mod types;
