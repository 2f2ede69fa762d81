use std::path::{Path, PathBuf};

use {
    clap::{Parser, Subcommand},
    miru_config::MiruConfig,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "miru", about = "Miru: LINE bot that describes your photos")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,
    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Config file to load instead of searching the default locations.
    #[arg(long, global = true, env = "MIRU_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server (default).
    Gateway,
    /// Load the configuration and verify the LINE credentials are present.
    CheckConfig,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Resolve the effective configuration: file, then environment, then flags.
fn resolve_config(
    path: Option<&Path>,
    bind: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<MiruConfig> {
    let mut config = match path {
        Some(path) => {
            let mut config = miru_config::load_config(path)?;
            miru_config::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            config
        },
        None => miru_config::discover_and_load(),
    };

    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "miru starting");

    let config = resolve_config(cli.config.as_deref(), cli.bind, cli.port)?;

    match cli.command {
        None | Some(Commands::Gateway) => miru_gateway::start_gateway(config).await,
        Some(Commands::CheckConfig) => {
            miru_config::ensure_credentials(&config)?;
            println!("config OK");
            println!("  listen:  {}:{}", config.server.bind, config.server.port);
            println!("  webhook: {}", config.server.webhook_path);
            println!(
                "  vision:  region={} endpoint={}",
                config.vision.region.as_deref().unwrap_or("(aws default)"),
                config.vision.endpoint.as_deref().unwrap_or("(aws default)")
            );
            Ok(())
        },
    }
}
