//! Canary-Runner main entry point
//!
//! This is the command-line interface for the Canary-Runner health check.

use anyhow::Context;
use canary_runner::canary::{watch, Canary, CanaryConfig};
use canary_runner::config::{load_config_with_hash, Config};
use canary_runner::driver::HttpDriver;
use canary_runner::notify::{build_message, post_webhook, resolve_webhook_url, AlarmTransition, NotifyChannel};
use canary_runner::report::{FanoutSink, SqliteHistory, StepSink, TracingSink};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit code for a canary run that did not succeed
const EXIT_RUN_FAILED: u8 = 1;

/// Exit code for a configuration the process cannot run with
const EXIT_CONFIG: u8 = 2;

/// Canary-Runner: a synthetic endpoint health check
///
/// Navigates once to a target URL, classifies the result, and reports a
/// single named step. Exits non-zero when the check fails.
#[derive(Parser, Debug)]
#[command(name = "canary-runner")]
#[command(version)]
#[command(about = "A synthetic endpoint health check", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the canary once
    Run {
        /// Target URL (overrides the config file and URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Run the canary repeatedly on an interval
    Watch {
        /// Target URL (overrides the config file and URL)
        #[arg(long)]
        url: Option<String>,

        /// Seconds between runs (overrides the config file)
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many runs
        #[arg(long)]
        max_runs: Option<u64>,
    },

    /// Show recent steps from the run-history database
    History {
        /// Number of steps to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Send an alarm transition to a chat webhook
    Notify {
        /// JSON file holding an SNS event or a bare alarm document
        #[arg(long, value_name = "FILE")]
        event: PathBuf,

        /// Message flavor (overrides the config file)
        #[arg(long, value_enum)]
        channel: Option<NotifyChannel>,

        /// Webhook URL (overrides the config file and WEBHOOK_URL)
        #[arg(long)]
        webhook_url: Option<String>,

        /// Print the message instead of posting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration and print what would run
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match load_configuration(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let result = match cli.command {
        Command::Run { url } => handle_run(config, config_hash, url).await,
        Command::Watch {
            url,
            interval,
            max_runs,
        } => handle_watch(config, config_hash, url, interval, max_runs).await,
        Command::History { limit } => handle_history(&config, limit),
        Command::Notify {
            event,
            channel,
            webhook_url,
            dry_run,
        } => handle_notify(&config, &event, channel, webhook_url, dry_run).await,
        Command::CheckConfig => handle_check_config(&config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            if e.downcast_ref::<canary_runner::ConfigError>().is_some() {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("canary_runner=info,warn"),
            1 => EnvFilter::new("canary_runner=debug,info"),
            2 => EnvFilter::new("canary_runner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies `URL` / `WEBHOOK_URL`
///
/// The hash is present only when a file was loaded.
fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, Option<String>)> {
    let (config, hash) = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::debug!("Configuration loaded (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let config = config.with_overrides(
        std::env::var("URL").ok(),
        std::env::var("WEBHOOK_URL").ok(),
    );
    Ok((config, hash))
}

/// Builds a canary from the configuration, with `--url` taking precedence
fn build_canary(
    mut config: Config,
    config_hash: Option<String>,
    url: Option<String>,
) -> anyhow::Result<(Canary, Config)> {
    if let Some(url) = url {
        config.canary.target_url = Some(url);
    }

    let canary_config = CanaryConfig::from_config(&config)?;
    let driver = HttpDriver::new(&config.user_agent.header_value())
        .context("Failed to build HTTP client")?;

    let mut sink = FanoutSink::new().with(Arc::new(TracingSink));
    if let Some(path) = &config.output.database_path {
        let mut history = SqliteHistory::open(Path::new(path))
            .with_context(|| format!("Failed to open history database {}", path))?;
        if let Some(hash) = config_hash {
            history = history.with_config_hash(hash);
        }
        sink = sink.with(Arc::new(history));
    }

    let sink: Arc<dyn StepSink> = Arc::new(sink);
    Ok((Canary::new(canary_config, Arc::new(driver), sink), config))
}

/// Handles `run`: one invocation, exit code reflects the outcome
async fn handle_run(
    config: Config,
    config_hash: Option<String>,
    url: Option<String>,
) -> anyhow::Result<ExitCode> {
    let (mut canary, _) = build_canary(config, config_hash, url)?;
    tracing::info!("Checking {}", canary.config().target);

    match canary.run().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(failure) => {
            tracing::error!("Canary failed ({}): {}", failure.kind(), failure);
            Ok(ExitCode::from(EXIT_RUN_FAILED))
        }
    }
}

/// Handles `watch`: periodic runs until interrupted or `--max-runs`
async fn handle_watch(
    config: Config,
    config_hash: Option<String>,
    url: Option<String>,
    interval: Option<u64>,
    max_runs: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let (mut canary, config) = build_canary(config, config_hash, url)?;
    let interval = Duration::from_secs(interval.unwrap_or(config.canary.interval_seconds).max(1));

    tracing::info!(
        "Watching {} every {}s",
        canary.config().target,
        interval.as_secs()
    );

    let summary = watch(&mut canary, interval, max_runs).await;
    if summary.failed > 0 {
        Ok(ExitCode::from(EXIT_RUN_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Handles `history`: prints recent steps and per-step pass rates
fn handle_history(config: &Config, limit: u32) -> anyhow::Result<ExitCode> {
    let path = config
        .output
        .database_path
        .as_deref()
        .context("No output.database-path configured; history is disabled")?;

    let history = SqliteHistory::open(Path::new(path))?;
    let steps = history.recent_steps(limit)?;

    println!("Database: {}\n", path);
    if steps.is_empty() {
        println!("No steps recorded yet");
        return Ok(ExitCode::SUCCESS);
    }

    for step in &steps {
        println!(
            "{}  {:<4}  {:<30} {:>6}ms  [{}]  {}",
            step.started_at,
            if step.passed { "PASS" } else { "FAIL" },
            step.name,
            step.duration_ms,
            step.config_hash.as_deref().map_or("-", |hash| &hash[..hash.len().min(12)]),
            step.diagnostic
        );
    }

    let mut names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    println!();
    for name in names {
        if let Some(rate) = history.pass_rate(name)? {
            println!("{}: {:.2}% passed", name, rate * 100.0);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Handles `notify`: maps an alarm event to a chat message and posts it
async fn handle_notify(
    config: &Config,
    event: &Path,
    channel: Option<NotifyChannel>,
    webhook_url: Option<String>,
    dry_run: bool,
) -> anyhow::Result<ExitCode> {
    let json = std::fs::read_to_string(event)
        .with_context(|| format!("Failed to read event file {}", event.display()))?;
    let alarm = AlarmTransition::from_any(&json)?;
    let message = build_message(channel.unwrap_or(config.notify.channel), &alarm);

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&message)?);
        return Ok(ExitCode::SUCCESS);
    }

    let url = resolve_webhook_url(config, webhook_url.as_deref())?;
    let client = reqwest::Client::new();
    let status = post_webhook(&client, &url, &message).await?;
    tracing::info!("Posted alarm '{}' to webhook ({})", alarm.alarm_name, status);

    Ok(ExitCode::SUCCESS)
}

/// Handles `check-config`: validates and prints the resolved configuration
fn handle_check_config(config: &Config) -> anyhow::Result<ExitCode> {
    let canary_config = CanaryConfig::from_config(config)?;

    println!("=== Canary-Runner Configuration ===\n");
    println!("Target: {}", canary_config.target);
    println!("Navigation timeout: {:?}", canary_config.navigation.timeout);
    println!("Wait until: {:?}", canary_config.navigation.wait_until);
    println!("Reset page: {}", canary_config.reset_page);
    println!("Interval: {}s", config.canary.interval_seconds);
    println!("User agent: {}", config.user_agent.header_value());
    println!(
        "Restricted URL parameters: {}",
        canary_config.restricted_url_parameters.join(", ")
    );
    println!(
        "History database: {}",
        config.output.database_path.as_deref().unwrap_or("(disabled)")
    );
    println!("Notify channel: {:?}", config.notify.channel);

    match canary_runner::url::validate_target(canary_config.target.as_str()) {
        Ok(hostname) => println!("\n✓ Step name will be: {}", hostname),
        Err(e) => println!("\n✗ Target will fail with a URL parse error: {}", e),
    }

    Ok(ExitCode::SUCCESS)
}
