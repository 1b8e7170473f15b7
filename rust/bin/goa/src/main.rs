//! `goa` — protobuf messages from annotated Go functions.
//!
//! Usage:
//!   goa generate -g api.go
//!
//! Every top-level function whose doc comment has a `// goa-export <Name>`
//! line becomes a `<Name>_call` / `<Name>_result` message pair in
//! `def.proto`, which is then compiled with `protoc`.

mod commands;
mod config;
mod pipeline;
mod protoc;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use goa_codegen_lib::MapOptions;
use tracing::debug;

use config::GoaConfig;
use pipeline::GenerateOptions;
use protoc::Protoc;

/// goa schema generator.
#[derive(Parser, Debug)]
#[command(name = "goa", about = "Generate protobuf messages from goa-export annotated Go functions")]
struct Cli {
    /// Path to config file (default: ./goa.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG).
    #[arg(long = "verbose", short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the schema file and compile it with protoc.
    Generate {
        /// Go file to generate stubs for.
        #[arg(short = 'g', long = "go-file")]
        go_file: PathBuf,
        /// Schema output path (default: def.proto).
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        /// Fail on unsupported field types instead of emitting <unsupported>.
        #[arg(long)]
        strict: bool,
        /// Proto package statement.
        #[arg(long)]
        package: Option<String>,
        /// Print the schema to stdout; write no file and skip protoc.
        #[arg(long)]
        dry_run: bool,
        /// Write the schema file but skip protoc.
        #[arg(long)]
        no_compile: bool,
    },

    /// Print the exported functions and their mapped fields as JSON.
    Exports {
        /// Go file to scan.
        #[arg(short = 'g', long = "go-file")]
        go_file: PathBuf,
        /// Fail on unsupported field types.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config_path = cli.config.unwrap_or_else(GoaConfig::default_path);
    let config = GoaConfig::load(&config_path)?;
    debug!(?config, "loaded configuration from {}", config_path.display());

    match command {
        Commands::Generate {
            go_file,
            output,
            strict,
            package,
            dry_run,
            no_compile,
        } => {
            let options = GenerateOptions {
                output: output.unwrap_or_else(|| config.output.clone()),
                map: MapOptions {
                    strict: strict || config.strict,
                },
                package: package.or_else(|| config.package.clone()),
            };
            if dry_run {
                commands::generate::dry_run(&go_file, &options)?;
            } else if no_compile {
                commands::generate::run(&go_file, &options, None)?;
            } else {
                let protoc = Protoc::new(config.protoc.clone());
                commands::generate::run(&go_file, &options, Some(&protoc))?;
            }
        }

        Commands::Exports { go_file, strict } => {
            let map = MapOptions {
                strict: strict || config.strict,
            };
            commands::exports::run(&go_file, &map)?;
        }
    }

    Ok(())
}
