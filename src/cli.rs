use crate::config::{ColorMode, Config, ErrorPolicy, Overrides};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gitlocal")]
#[command(about = "Discover local git repositories and chart your commits over the last six months")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to the repository registry file")]
    pub registry: Option<PathBuf>,

    #[arg(long, global = true, env = "GITLOCAL_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Length of the lookback window in days")]
    pub window_days: Option<u32>,

    #[arg(long, global = true, help = "Extra directory name to skip while scanning (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(long, global = true, value_enum, help = "What to do when a repository cannot be read")]
    pub on_repo_error: Option<ErrorPolicy>,

    #[arg(long, global = true, value_enum, help = "When to color the output")]
    pub color: Option<ColorMode>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a folder for git repositories and add them to the registry
    Add {
        #[arg(help = "Root folder to scan")]
        root: PathBuf,
    },
    /// Print the contribution grid for the registered repositories
    Stats {
        #[arg(long, help = "File listing your author emails, one per line")]
        emails: PathBuf,
    },
}

impl CommonArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            window_days: self.window_days,
            registry_path: self.registry.clone(),
            exclude: self.exclude.clone(),
            on_repo_error: self.on_repo_error,
            color: self.color,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_tracing(self.common.verbose);

        let config = Config::load(self.common.config.as_deref(), self.common.overrides())
            .context("Failed to load configuration")?;

        match self.command {
            Commands::Add { root } => crate::scan::exec(&config, &root),
            Commands::Stats { emails } => crate::stats::exec(&config, &emails),
        }
    }
}

/// Logs go to stderr. `RUST_LOG` is honored; `--verbose` adds DEBUG, otherwise WARN.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
