//! CLI entry point for newsroom-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsroom-rs")]
#[command(version)]
#[command(about = "A fast static site generator for developer newsletter portals", long_about = None)]
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
    /// Initialize a new newsletter portal
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new newsletter issue
    New {
        /// Title of the new issue
        title: String,

        /// Filename for the new issue (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder and cache
    Clean,

    /// List portal content
    List {
        /// Type of content to list (issue, year)
        #[arg(default_value = "issue")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newsroom_rs=debug,info"
    } else {
        "newsroom_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing newsletter portal in {:?}", target_dir);
            newsroom_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized empty newsletter portal in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let site = newsroom_rs::Newsroom::new(&base_dir)?;
            tracing::info!("Creating new issue with title: {}", title);
            newsroom_rs::commands::new::create_issue(&site, &title, path.as_deref())?;
        }

        Commands::Generate { watch } => {
            let site = newsroom_rs::Newsroom::new(&base_dir)?;
            tracing::info!("Generating static files...");

            newsroom_rs::commands::generate::run(&site)?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                newsroom_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = newsroom_rs::Newsroom::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            newsroom_rs::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = newsroom_rs::Newsroom::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = newsroom_rs::Newsroom::new(&base_dir)?;
            newsroom_rs::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("newsroom-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
