//! wbmodel CLI - inspect identifiers and re-materialise model graphs

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wbmodel_core::DataObjectFactory;

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, id, sample};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "wbmodel")]
#[command(author, version, about = "Knowledge-base data model toolkit")]
pub struct Cli {
    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Site IRI for identifiers (overrides the config file)
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and describe entity ids
    Id(id::IdArgs),
    /// Build the sample item and convert it through a factory
    Sample(sample::SampleArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings resolved from flags and the config file
pub struct AppContext {
    pub config: Config,
    pub factory: Box<dyn DataObjectFactory>,
    pub site_iri: String,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load()?;
        let site_iri = cli
            .site
            .clone()
            .unwrap_or_else(|| config.default_site_iri.clone());
        let format = cli.format.unwrap_or(config.output_format);
        let factory = config.factory.build();
        tracing::debug!("Using {} factory, site {}", factory.name(), site_iri);

        Ok(Self {
            config,
            factory,
            site_iri,
            format,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    match &cli.command {
        Commands::Config(args) => config_cmd::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
        Commands::Id(args) => id::run(args, &AppContext::new(&cli)?)?,
        Commands::Sample(args) => sample::run(args, &AppContext::new(&cli)?)?,
    }

    Ok(())
}
