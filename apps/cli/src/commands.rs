//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use vaultsite_core::pipeline::{BuildSiteConfig, BuildSiteResult, ProgressReporter};
use vaultsite_shared::{
    AppConfig, MAX_PER_PAGE, SearchQuery, init_config, load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// vaultsite — papers and note-graph static site builder.
#[derive(Parser)]
#[command(
    name = "vaultsite",
    version,
    about = "Build a static wiki from OpenAlex papers and an Obsidian-style note vault.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.vaultsite/vaultsite.toml.
    #[arg(long, global = true, env = "VAULTSITE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch papers, scan the vault, and write the whole site.
    Build {
        /// Output directory (overrides site.docs_dir).
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Note vault to scan (overrides site.vault_dir).
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Skip the paper fetch and render an empty paper list.
        #[arg(long)]
        offline: bool,
    },

    /// Scan the vault and emit graph JSON only.
    Graph {
        /// Note vault to scan (overrides site.vault_dir).
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Write the JSON here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Query OpenAlex and print one line per paper.
    Papers {
        /// Search string (overrides openalex.search).
        #[arg(short, long)]
        search: Option<String>,

        /// Number of results (overrides openalex.per_page).
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "vaultsite=info",
        1 => "vaultsite=debug",
        _ => "vaultsite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Build {
            docs,
            vault,
            offline,
        } => cmd_build(config_path, docs, vault, offline).await,
        Command::Graph { vault, out } => cmd_graph(config_path, vault, out.as_deref()),
        Command::Papers { search, limit } => cmd_papers(config_path, search, limit).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config from `--config` if given, else from the default location.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_build(
    config_path: Option<&Path>,
    docs: Option<PathBuf>,
    vault: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;

    let mut build_config = BuildSiteConfig::from(&config);
    if let Some(docs) = docs {
        build_config.docs_dir = docs;
    }
    if let Some(vault) = vault {
        build_config.vault_dir = vault;
    }
    build_config.offline = offline;

    info!(
        docs = %build_config.docs_dir.display(),
        vault = %build_config.vault_dir.display(),
        offline,
        "building site"
    );

    let reporter = CliProgress::new();
    let result = vaultsite_core::pipeline::build_site(&build_config, &reporter).await?;

    println!();
    println!("  Site built successfully!");
    println!("  Output:  {}", result.docs_dir.display());
    println!("  Papers:  {}", result.paper_count);
    if let Some(err) = &result.fetch_error {
        println!("           (fetch failed: {err})");
    }
    println!(
        "  Graph:   {} notes, {} links ({} unresolved)",
        result.node_count, result.link_count, result.scan.unresolved
    );
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_graph(config_path: Option<&Path>, vault: Option<PathBuf>, out: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let vault = vault.unwrap_or_else(|| PathBuf::from(&config.site.vault_dir));

    info!(vault = %vault.display(), "scanning vault");
    let graph = vaultsite_graph::build_graph(&vault);
    let json = graph.to_json()?;

    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| eyre!("failed to write '{}': {e}", path.display()))?;
            println!(
                "Wrote {} ({} notes, {} links)",
                path.display(),
                graph.node_count(),
                graph.link_count()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn cmd_papers(
    config_path: Option<&Path>,
    search: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let mut query = SearchQuery::from(&config);

    if let Some(search) = search {
        if search.trim().is_empty() {
            return Err(eyre!("search string must not be empty"));
        }
        query.search = search;
    }
    if let Some(limit) = limit {
        if limit == 0 || limit > MAX_PER_PAGE {
            return Err(eyre!("limit must be between 1 and {MAX_PER_PAGE}, got {limit}"));
        }
        query.per_page = limit;
    }

    let works = vaultsite_papers::fetch_papers(&query).await?;

    if works.is_empty() {
        println!("No papers found for \"{}\".", query.search);
    }
    for work in &works {
        println!("{}", vaultsite_markdown::paper_line(work));
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn papers_fetched(&self, count: usize) {
        self.spinner.set_message(format!("Fetched {count} paper(s)"));
    }

    fn done(&self, _result: &BuildSiteResult) {
        self.spinner.finish_and_clear();
    }
}
