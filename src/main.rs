//! CLI entry point for mdpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Query and render a directory of markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site information
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, slug, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a post to HTML
    Show {
        /// Slug of the post
        slug: String,

        /// Print the post and its HTML as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search posts by title/description and tags
    Search {
        /// Text to look for in titles and descriptions
        query: Option<String>,

        /// Only posts with this tag (repeatable, any tag matches)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the stylesheet for highlighted code
    Css,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let blog = mdpress::Blog::new(&base_dir)?;
    tracing::debug!("Reading posts from {:?}", blog.content_dir);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { r#type, json } => {
            mdpress::commands::list::run(&blog, &r#type, json, &mut out)?;
        }

        Commands::Show { slug, json } => {
            mdpress::commands::show::run(&blog, &slug, json, &mut out).await?;
        }

        Commands::Search { query, tags, json } => {
            mdpress::commands::search::run(&blog, query.as_deref(), &tags, json, &mut out)?;
        }

        Commands::Css => {
            let css = mdpress::markdown::stylesheet(&blog.config.highlight.theme)?;
            write!(out, "{}", css)?;
        }

        Commands::Version => {
            writeln!(out, "mdpress version {}", env!("CARGO_PKG_VERSION"))?;
        }
    }

    Ok(())
}
