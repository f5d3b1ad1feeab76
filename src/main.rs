//! MCP Server Entry Point
//!
//! Parses the command line, initializes logging, loads configuration and
//! starts the server with the configured transport.

use anyhow::Result;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use mercury_mcp_server::core::{Config, McpServer, TransportService};

/// Mercury banking tools over the Model Context Protocol.
#[derive(Debug, Parser)]
#[command(name = "mercury_mcp_server", version, about)]
struct Cli {
    /// Mercury API key. Used only when MERCURY_API_KEY is unset or empty.
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error). Overrides MCP_LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()
        .with_api_key(cli.api_key)
        .with_log_level(cli.log_level);

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    config.report();

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config)?;

    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for the MCP stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
