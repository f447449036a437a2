//! apigen CLI entrypoint
//! Parses command-line arguments and dispatches to the generator.
#![deny(unsafe_code)]

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use apigen::core::{GeneratorConfig, GeneratorError};
use apigen::generation::manifest::checksum;
use apigen::generation::{GenerationOrchestrator, OpenApiLoader};
use apigen::infrastructure::openapi::CompositeOpenApiLoader;
use apigen::infrastructure::output::FileSystemOutputService;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate namespace files and manifests for the configured scopes
    Generate {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory for generated code
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Directory with `<name>.tera` templates overriding the built-ins
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// JSON file renaming operations and picking their templates
        #[arg(long)]
        rename_mapping: Option<PathBuf>,
        /// Only generate these scopes (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,
        /// Path or URL of the spec, for a single selected scope
        #[arg(long)]
        spec_url: Option<String>,
    },
    /// Print the key-order independent checksum of a spec
    Checksum {
        /// Path or URL to the spec (YAML or JSON)
        source: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    if let Err(err) = run(cli.command).await {
        error!("{err:#}");
        std::process::exit(exit_code(&err));
    }
}

/// Exit status carried by the underlying generator error, 1 otherwise
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GeneratorError>()
        .map(GeneratorError::exit_code)
        .unwrap_or(1)
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            config,
            output_dir,
            template_dir,
            rename_mapping,
            scopes,
            spec_url,
        } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::load(&path)
                    .await
                    .with_context(|| format!("loading {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if template_dir.is_some() {
                config.template_dir = template_dir;
            }
            if rename_mapping.is_some() {
                config.rename_mapping = rename_mapping;
            }
            config.select_scopes(&scopes)?;
            if let Some(source) = spec_url {
                match config.scopes.as_mut_slice() {
                    [scope] => scope.spec_url = source,
                    _ => {
                        return Err(GeneratorError::config(
                            "--spec-url needs exactly one selected scope",
                        )
                        .into());
                    }
                }
            }

            generate(config).await
        }
        Commands::Checksum { source } => {
            let loader = CompositeOpenApiLoader::new()?;
            let spec = loader.load(&source).await?;
            println!("{}", checksum(&spec)?);
            Ok(())
        }
    }
}

async fn generate(config: GeneratorConfig) -> anyhow::Result<()> {
    info!(
        output_dir = %config.output_dir.display(),
        scopes = config.scopes.len(),
        "Starting apigen"
    );

    let orchestrator = GenerationOrchestrator::from_config(
        config,
        Arc::new(CompositeOpenApiLoader::new()?),
        Arc::new(FileSystemOutputService::new()),
    )
    .await?;

    for summary in orchestrator.generate_all().await? {
        info!(
            scope = %summary.scope,
            namespaces = summary.namespace_files.len(),
            endpoints = summary.endpoints,
            checksum = %summary.checksum,
            "Done"
        );
    }
    Ok(())
}
