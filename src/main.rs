use atelier_vitrine::{admin, generate, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "atelier-vitrine")]
#[command(about = "Static site generator for the woodworking shop showcase")]
#[command(long_about = "\
Static site generator for the woodworking shop showcase

Your content directory is the data source. JSON documents written by the
CMS become pages, and markdown files become standalone pages.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── home.json                    # Home page: hero, quote, highlights, service cards
  ├── mentions-legales.md          # Standalone markdown page
  ├── services/
  │   ├── structure/charpente.json # One document per service, grouped by category
  │   └── menuiserie/escaliers.json
  ├── testimonials/
  │   └── hugo-m.json              # One document per testimonial
  ├── realisations/
  │   └── escalier-chene.json      # One document per completed project
  └── images/uploads/              # CMS media → copied to output root

Réalisations without a title are excluded from the gallery; galleries
accept both plain path lists and object-wrapped lists; missing images
fall back to the configured placeholder.

Run 'atelier-vitrine gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".atelier-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Produce the final HTML site from a scan manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate the content directory without building
    Check,
    /// Print the CMS configuration descriptor as JSON
    AdminConfig,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Serve the generated site locally with the admin API
    #[cfg(feature = "serve")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.content)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, &cli.content);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            generate::generate(&manifest_path, &cli.content, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: generate::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.content.display());
            let manifest = scan::scan(&cli.content)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, &cli.content);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::generate(&manifest_path, &cli.content, &cli.output)?;
            let gen_manifest_content = std::fs::read_to_string(&manifest_path)?;
            let gen_manifest: generate::Manifest = serde_json::from_str(&gen_manifest_content)?;
            output::print_generate_output(&gen_manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.content.display());
            let manifest = scan::scan(&cli.content)?;
            output::print_scan_output(&manifest, &cli.content);
            println!("==> Content is valid");
        }
        Command::AdminConfig => {
            let config = atelier_vitrine::config::load_config(&cli.content)?;
            let descriptor = admin::admin_config(&config);
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Command::GenConfig => {
            print!("{}", atelier_vitrine::config::stock_config_toml());
        }
        #[cfg(feature = "serve")]
        Command::Serve { port } => {
            let config = atelier_vitrine::config::load_config(&cli.content)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(atelier_vitrine::serve::run(&config, cli.output.clone(), port))?;
        }
    }

    Ok(())
}
