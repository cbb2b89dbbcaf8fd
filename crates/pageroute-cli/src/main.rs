mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pageroute::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pageroute")]
#[command(version, about = "Pageroute CLI - convention-based route compiler", long_about = None)]
struct Cli {
    /// Path to pageroute.toml
    #[arg(short, long, global = true, default_value = "pageroute.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the route table, loading every page module
    Routes {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the table as JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Treat warnings (missing not-found page, orphan children) as errors
        #[arg(long)]
        strict: bool,
    },

    /// Resolve and validate routes without loading page modules
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Show the route path a page path resolves to
    Resolve {
        /// Page paths relative to the pages directory, e.g. index/tasks/edit/_id
        #[arg(required = true)]
        pages: Vec<String>,
    },
}

/// Overrides for the [pages] section of the config
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Pages directory to scan
    #[arg(short, long)]
    pages: Option<PathBuf>,

    /// Page file extension, without the dot
    #[arg(short, long)]
    extension: Option<String>,

    /// Manifest file (TOML or JSON) listing pages instead of scanning
    #[arg(short, long)]
    manifest: Option<PathBuf>,
}

impl SourceArgs {
    /// Applies command-line overrides on top of the loaded config
    pub fn apply(self, mut config: Config) -> Result<Config> {
        if let Some(dir) = self.pages {
            config.pages.dir = dir;
            config.pages.manifest = None;
        }
        if let Some(extension) = self.extension {
            config.pages.extension = extension;
        }
        if let Some(manifest) = self.manifest {
            config.pages.manifest = Some(manifest);
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "pageroute=debug,info",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    tracing::debug!(path = ?cli.config, pages = ?config.pages.dir, "Loaded configuration");

    // Execute command
    match cli.command {
        Commands::Routes {
            source,
            json,
            strict,
        } => {
            commands::routes::execute(source.apply(config)?, json, strict)?;
        }
        Commands::Check { source, strict } => {
            commands::check::execute(source.apply(config)?, strict)?;
        }
        Commands::Resolve { pages } => {
            commands::resolve::execute(&config, &pages)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pages_override_clears_manifest() {
        let mut config = Config::default();
        config.pages.manifest = Some(PathBuf::from("pages.toml"));

        let args = SourceArgs {
            pages: Some(PathBuf::from("src/views")),
            ..SourceArgs::default()
        };
        let config = args.apply(config).unwrap();
        assert_eq!(config.pages.dir, PathBuf::from("src/views"));
        assert!(config.pages.manifest.is_none());
    }

    #[test]
    fn test_extension_override_is_validated() {
        let args = SourceArgs {
            extension: Some(".vue".to_string()),
            ..SourceArgs::default()
        };
        assert!(args.apply(Config::default()).is_err());
    }

    #[test]
    fn test_parse_routes_command() {
        let cli = Cli::try_parse_from(["pageroute", "routes", "--pages", "views", "--json", "-v"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Routes { json: true, strict: false, .. }));
    }
}
