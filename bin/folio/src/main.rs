//! Folio CLI
//!
//! Static portfolio site generator for Markdown/MDX project pages.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "A static portfolio site generator"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Include draft projects
        #[arg(long)]
        drafts: bool,
        /// Override site base URL (e.g., https://staging.example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Start development server with live reload
    Watch {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
    /// Scaffold a draft project document
    New {
        /// Project slug (e.g., shop-redesign or drupal/search-api)
        slug: String,
        /// Project title (defaults to the slug in title case)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            drafts,
            base_url,
        } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), drafts, base_url.as_deref())?;
        }
        Commands::Watch { port, open } => {
            folio::cmd::watch::run(&cli.config, port, open).await?;
        }
        Commands::New { slug, title } => {
            folio::cmd::new::run(&cli.config, &slug, title.as_deref())?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
