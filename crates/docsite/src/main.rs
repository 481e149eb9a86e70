//! Command-line interface for building the project documentation site.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libdocsite::{ClobberPolicy, CommandLine, Docsite, ShellRunner};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Builds the project documentation site", version)]
/// Command-line interface entry point for the `docsite` binary.
struct Cli {
    /// Project root containing README.md and the docs source tree
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Command used to build the site pages
    #[arg(long, default_value = "mkdocs build")]
    site_cmd: String,

    /// Command used to compile the API reference
    #[arg(long, default_value = "lein codox")]
    api_cmd: String,

    /// Overwrite a stale backup file instead of failing
    #[arg(long, default_value_t = false)]
    overwrite_backup: bool,

    /// Do not echo external commands before running them
    #[arg(long, default_value_t = false)]
    quiet: bool,

    /// Subcommand dispatched by the CLI.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Supported build operations.
enum Commands {
    /// Build the site pages only, staging README.md as the index page
    Pages {
        /// Empty the site folder before building
        #[arg(long, default_value_t = false)]
        clean: bool,
    },

    /// Compile the API reference into the site folder
    Api,

    /// Build the full project site: pages (clean), then the API reference
    Site,
}

/// Assemble the site builder from CLI flags and dispatch the subcommand.
fn run(cli: &Cli) -> Result<()> {
    let clobber = if cli.overwrite_backup {
        ClobberPolicy::Overwrite
    } else {
        ClobberPolicy::Fail
    };

    let site = Docsite::new()
        .with_root(&cli.root)
        .with_site_command(
            CommandLine::parse(&cli.site_cmd)
                .with_context(|| format!("invalid --site-cmd `{}`", cli.site_cmd))?,
        )
        .with_api_command(
            CommandLine::parse(&cli.api_cmd)
                .with_context(|| format!("invalid --api-cmd `{}`", cli.api_cmd))?,
        )
        .with_clobber(clobber);

    let runner = ShellRunner::new(!cli.quiet);

    match cli.command {
        Commands::Pages { clean } => site.build_pages(&runner, clean)?,
        Commands::Api => site.build_api(&runner)?,
        Commands::Site => site.build_site(&runner)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
