//! Soil Dashboard - command-line front end
//!
//! Drives the dashboard core against a device backend, or runs the reference backend.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use soil_dashboard::{
    start_backend, BackendConfig, ChartConfig, ClientConfig, Command, Dashboard, HttpRemote,
    Series, UpdatePolicy, DEFAULT_BACKEND_PORT, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_MS,
};
use std::future::Future;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "soil_dashboard")]
#[command(about = "🌱 Soil Dashboard - remote soil monitor control")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Inspect and control a remote soil-monitoring device from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    url: String,

    /// Per-request timeout in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// How overlapping updates resolve: latest-issued or last-completed
    #[arg(long, default_value_t = UpdatePolicy::default())]
    policy: UpdatePolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the current command
    Command,

    /// Issue a command to the device
    Issue(IssueArgs),

    /// Submit a manual soil-moisture reading
    Submit(SubmitArgs),

    /// Fetch the reading log and show the chart series
    Logs(LogsArgs),

    /// Run the reference backend
    Serve(ServeArgs),
}

#[derive(Args)]
struct IssueArgs {
    /// Command name, e.g. "Start Water" (case-insensitive)
    command: String,
}

#[derive(Args)]
struct SubmitArgs {
    /// Reading value as entered
    value: String,
}

#[derive(Args)]
struct LogsArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_BACKEND_PORT)]
    port: u16,

    /// Reading log file
    #[arg(long, default_value = "soil_data.json")]
    log_path: String,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Commands::Serve(args) => serve_command(args).await,
        other => {
            let config = ClientConfig::new(&cli.url)
                .with_timeout(Duration::from_millis(cli.timeout_ms));
            let dashboard = Dashboard::new(HttpRemote::new(config)?, cli.policy);
            client_command(&dashboard, other).await
        }
    }
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG` wins when set; otherwise the flags pick the level.
fn log_filter(cli: &Cli, env: Option<&str>) -> EnvFilter {
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level(cli).to_string()))
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli, env.as_deref()))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Run `operation`, dropping it if Ctrl-C arrives first.
async fn cancellable<T>(operation: impl Future<Output = T>) -> anyhow::Result<T> {
    tokio::select! {
        result = operation => Ok(result),
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Cancelled"),
    }
}

async fn client_command(dashboard: &Dashboard<HttpRemote>, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Command => {
            cancellable(dashboard.refresh_command())
                .await?
                .context("Failed to fetch command")?;
            print_command(dashboard.state().command.as_ref());
        }
        Commands::Issue(args) => {
            let command = Command::from_input(&args.command);
            if !command.is_known() {
                info!("Issuing non-standard command '{}'", command);
            }
            cancellable(dashboard.issue_command(command))
                .await?
                .context("Failed to issue command")?;
            print_command(dashboard.state().command.as_ref());
        }
        Commands::Submit(args) => {
            cancellable(dashboard.submit_reading(&args.value))
                .await?
                .context("Failed to submit reading")?;
            println!(
                "Response: {}",
                dashboard.state().message.unwrap_or_default()
            );
        }
        Commands::Logs(args) => {
            cancellable(dashboard.refresh_log())
                .await?
                .context("Failed to fetch logs")?;
            match args.format.as_str() {
                "json" => {
                    let payload = dashboard.chart(ChartConfig::default());
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                "pretty" => print_series(&dashboard.state().series),
                other => anyhow::bail!("Unsupported format: {}. Use 'json' or 'pretty'", other),
            }
        }
        Commands::Serve(_) => unreachable!("serve is handled before a client is built"),
    }

    Ok(())
}

async fn serve_command(args: &ServeArgs) -> anyhow::Result<()> {
    let config = BackendConfig::new(&args.host, args.port)
        .with_log_path(&args.log_path)
        .with_cors(!args.no_cors);

    info!("Backend configuration:");
    info!("  - Bind address: {}", config.bind_address());
    info!("  - CORS enabled: {}", config.enable_cors);
    info!("  - Log file: {}", args.log_path);

    cancellable(start_backend(config)).await??;
    Ok(())
}

fn print_command(command: Option<&Command>) {
    match command {
        Some(command) => println!("Current Command: {}", command),
        None => println!("Current Command:"),
    }
}

fn print_series(series: &Series) {
    let chart = ChartConfig::default();
    println!("🌱 {}", chart.title);
    println!("==========================================");

    if series.is_empty() {
        println!("  (no readings)");
        return;
    }

    for (index, entry) in series.entries().iter().enumerate() {
        let value = if entry.is_valid() {
            format!("{:.1}", entry.soil_moisture)
        } else {
            "invalid".to_string()
        };
        println!(
            "  {:>8}  {:<19}  {}",
            series.axis_label(index),
            entry.timestamp,
            value
        );
    }
    println!();
    println!("  {} readings", series.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["soil_dashboard", "issue", "stop water"]).unwrap();
        match cli.command {
            Commands::Issue(args) => {
                assert_eq!(Command::from_input(&args.command), Command::StopWater)
            }
            _ => panic!("expected issue subcommand"),
        }
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["soil_dashboard", "command"]).unwrap();
        assert_eq!(cli.url, DEFAULT_BACKEND_URL);
        assert_eq!(cli.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cli.policy, UpdatePolicy::LatestIssued);
    }

    #[test]
    fn test_policy_flag() {
        let cli =
            Cli::try_parse_from(["soil_dashboard", "--policy", "last-completed", "logs"]).unwrap();
        assert_eq!(cli.policy, UpdatePolicy::LastCompleted);
    }

    #[test]
    fn test_log_flags_select_level() {
        let quiet = Cli::try_parse_from(["soil_dashboard", "command"]).unwrap();
        let verbose = Cli::try_parse_from(["soil_dashboard", "-v", "command"]).unwrap();
        let debug = Cli::try_parse_from(["soil_dashboard", "-d", "command"]).unwrap();

        assert_eq!(log_level(&quiet), Level::WARN);
        assert_eq!(log_level(&verbose), Level::INFO);
        assert_eq!(log_level(&debug), Level::DEBUG);
    }

    #[test]
    fn test_debug_flag_is_not_capped_by_empty_env() {
        let cli = Cli::try_parse_from(["soil_dashboard", "-d", "command"]).unwrap();

        let filter = log_filter(&cli, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter(&cli, Some(""));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = log_filter(&cli, Some("soil_dashboard=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
