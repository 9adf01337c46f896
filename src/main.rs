use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pubmed_papers::config::{find_config_file, get_config, load_config, Config};
use pubmed_papers::models::SearchQuery;
use pubmed_papers::output::{render, write_csv_file, OutputFormat};
use pubmed_papers::pipeline;
use pubmed_papers::sources::PubMedSource;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch research papers from PubMed and flag authors with non-academic affiliations
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = pubmed_papers::VERSION)]
#[command(about = "Fetch research papers from PubMed.", long_about = None)]
struct Cli {
    /// Search query for PubMed (full PubMed query syntax is supported)
    query: String,

    /// Output CSV file (prints to stdout when omitted)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Enable debug mode
    #[arg(long, short)]
    debug: bool,

    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format for stdout
    #[arg(long, short, value_enum, default_value_t = StdoutFormat::Auto)]
    output: StdoutFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of papers to fetch (overrides configuration)
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Output format for results printed to stdout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StdoutFormat {
    /// Table on a terminal, one line per paper otherwise
    Auto,
    /// One line per paper
    Plain,
    /// JSON array
    Json,
    /// Table format (human-readable)
    Table,
}

impl StdoutFormat {
    fn resolve(self, is_tty: bool) -> OutputFormat {
        match self {
            StdoutFormat::Auto if is_tty => OutputFormat::Table,
            StdoutFormat::Auto | StdoutFormat::Plain => OutputFormat::Plain,
            StdoutFormat::Json => OutputFormat::Json,
            StdoutFormat::Table => OutputFormat::Table,
        }
    }
}

impl Cli {
    /// Log filter derived from the flags, falling back to the configured level
    fn log_filter(&self, configured: &str) -> String {
        let level = if self.quiet {
            "error"
        } else {
            match (self.verbose, self.debug) {
                (0, false) => configured,
                (0, true) | (1, _) => "debug",
                _ => "trace",
            }
        };
        format!("pubmed_papers={level},get_papers_list={level}")
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(max_results) = self.max_results {
            config.eutils.max_results = max_results;
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_secs = timeout;
        }
        config
    }
}

fn load_configuration(cli: &Cli) -> Result<Config> {
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        load_config(&config_path)
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else {
        get_config().context("Failed to read configuration from environment")?
    };

    Ok(cli.apply_overrides(config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_configuration(&cli)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_filter(&config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(config_path) = &cli.config {
        tracing::debug!("Using config file: {}", config_path.display());
    }

    let source = PubMedSource::from_config(&config)?;
    let query = SearchQuery::new(&cli.query).max_results(config.eutils.max_results);

    let papers = pipeline::run(&source, &query).await?;

    match &cli.file {
        Some(path) => {
            write_csv_file(path, &papers)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                println!("Results saved to {}", path.display());
            }
        }
        None => {
            let format = cli.output.resolve(std::io::stdout().is_terminal());
            let rendered = render(&papers, format)?;
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
    }

    Ok(())
}
