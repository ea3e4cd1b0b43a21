// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use web_search_agent::config::DEFAULT_CONFIG_PATH;
use web_search_agent::ui::render::render_turn;
use web_search_agent::ui::stdin_source;
use web_search_agent::utils::logging::{format_error, format_info, format_success};
use web_search_agent::{ChatShell, ChatTurn, Config, PipelineRunner, SpinnerProgress, Validator};

#[derive(Parser)]
#[command(name = "web-search-agent")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Searches the web and summarizes the results with an LLM", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat session (default)
    Chat,

    /// Answer a single question and exit
    Ask {
        /// Question to search for
        query: String,
    },

    /// Validate configuration and API keys
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    web_search_agent::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => halt(&e),
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd_chat(&config, cli.color).await?,
        Commands::Ask { query } => cmd_ask(&config, &query).await?,
        Commands::Check => cmd_check(&config),
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(Some(path)).context("Failed to load configuration")
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            path.display()
        );
        Config::load(None).context("Failed to load configuration")
    }
}

// A missing key must stop the process before any pipeline exists.
fn build_runner(config: &Config) -> PipelineRunner {
    match PipelineRunner::from_config(config) {
        Ok(runner) => runner,
        Err(e) => halt(&anyhow::Error::new(e)),
    }
}

fn halt(error: &anyhow::Error) -> ! {
    eprintln!("{}", format_error(&format!("{:#}", error)));
    std::process::exit(1);
}

async fn cmd_chat(config: &Config, color: bool) -> Result<()> {
    let runner = build_runner(config);
    let progress = Box::new(SpinnerProgress::with_color(color));

    let shell = ChatShell::new(runner, config.ui.clone(), progress, io::stdout());
    let session = shell
        .run(stdin_source())
        .await
        .context("Chat session failed")?;

    info!("Session {} closed with {} turns", session.id(), session.turn_count());
    Ok(())
}

async fn cmd_ask(config: &Config, query: &str) -> Result<()> {
    Validator::validate_query(query).context("Invalid query")?;

    let runner = build_runner(config);
    let answer = runner.run(query).await;

    println!("{}", render_turn(&ChatTurn::assistant(answer)));
    Ok(())
}

fn cmd_check(config: &Config) {
    let search = format!(
        "Search: {} via {} ({}-{}, {} results)",
        config.search.engine,
        config.search.base_url,
        config.search.language,
        config.search.region,
        config.search.max_results
    );
    println!("{}", format_info(&search));

    let model = format!("Model: {} via {}", config.llm.model, config.llm.base_url);
    println!("{}", format_info(&model));

    match config.credentials() {
        Ok(credentials) => {
            println!(
                "{}",
                format_success(&format!(
                    "API keys configured (serpapi: {}, google: {})",
                    Validator::mask_secret(&credentials.serpapi_api_key),
                    Validator::mask_secret(&credentials.google_api_key)
                ))
            );
        }
        Err(e) => halt(&anyhow::Error::new(e)),
    }
}
