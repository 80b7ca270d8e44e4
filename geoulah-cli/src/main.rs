//! Geoulah CLI - browse and render the book catalog from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use geoulah_core::config::{SiteConfig, SiteLocation, SITE_VAR, STATE_PATH_VAR};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geoulah")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site root: a directory or an http(s) base URL
    #[arg(long, global = true, env = SITE_VAR)]
    site: Option<String>,

    /// Directory holding stored preferences
    #[arg(long, global = true, env = STATE_PATH_VAR)]
    state_dir: Option<PathBuf>,

    /// Language for this run (he, fr)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books in the catalog
    List {
        /// Only featured books
        #[arg(long)]
        featured: bool,

        /// Only books with this status (available, coming_soon)
        #[arg(long)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display information about a book and its chapters
    Info {
        /// Book slug or id
        book: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a chapter's normalized content
    Read {
        /// Book slug or id
        book: String,

        /// Chapter slug or id
        chapter: String,

        /// Print the fragment as stored, without normalization
        #[arg(long)]
        raw: bool,
    },

    /// Render a page (index.html, book.html?id=..., chapter.html?...) to HTML
    Render {
        /// Page route
        route: String,

        /// Output directory, one file per language
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Languages to render, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        languages: Option<Vec<String>>,
    },

    /// Show or set the preferred language
    Lang {
        /// Language code to store
        code: Option<String>,
    },
}

/// Global settings every command runs with
pub struct Context {
    pub config: SiteConfig,
    pub lang: Option<String>,
}

impl Cli {
    fn context(&self) -> Result<Context> {
        let mut config = SiteConfig::from_env()?;
        if let Some(site) = &self.site {
            config = config.with_site(SiteLocation::parse(site)?);
        }
        if let Some(state_dir) = &self.state_dir {
            config = config.with_state_path(state_dir);
        }
        Ok(Context {
            config,
            lang: self.lang.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "geoulah_cli=debug,geoulah_core=debug"
    } else {
        "geoulah_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = cli.context()?;

    match cli.command {
        Commands::List {
            featured,
            status,
            json,
        } => commands::list(&ctx, featured, status.as_deref(), json).await,

        Commands::Info { book, json } => commands::info(&ctx, &book, json).await,

        Commands::Read { book, chapter, raw } => commands::read(&ctx, &book, &chapter, raw).await,

        Commands::Render {
            route,
            out,
            languages,
        } => commands::render(&ctx, &route, out.as_deref(), languages).await,

        Commands::Lang { code } => commands::lang(&ctx, code.as_deref()).await,
    }
}
