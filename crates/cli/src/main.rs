mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ssg-kit")]
#[command(version, about = "Static site generator for dynamic post routes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory with a starter site.toml
    Init {
        /// Path to create site directory
        path: PathBuf,
    },

    /// Validate site configuration
    Validate {
        /// Path to site.toml (defaults to the built-in posts)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Pre-render every post route into a static output directory
    Build {
        /// Path to site.toml (defaults to the built-in posts)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Serve the pre-rendered routes locally, rebuilding when site.toml changes
    Preview {
        /// Path to site.toml (defaults to the built-in posts)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { config } => commands::validate::run(config).await,
        Command::Build { config, output } => commands::build::run(config, output).await,
        Command::Preview { config, port } => commands::preview::run(config, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ssg-kit", &mut io::stdout());
            Ok(())
        }
    }
}
