use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::process::ExitCode;
use std::time::Duration;

use crate::core::Response;

#[derive(Parser)]
#[command(name = "database-mcp-server")]
#[command(about = "Database MCP server and admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server in the mode selected by MODE / MCP_CONFIG (default)
    Serve,
    /// Run the scripted demonstration and print every response
    Demo,
    /// Health check a running server
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Show health and the tools a running server exposes
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Call a tool on a running server
    Call {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
        /// Tool name
        #[arg(short, long)]
        tool: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => report(crate::infra::boot::run_server().await, None, "Server"),
        Commands::Demo => report(
            crate::infra::boot::run_mode(crate::infra::config::Mode::Demo, 0).await,
            None,
            "Demo",
        ),
        Commands::Health { url } => report(health_check(&url).await, Some("✅ Service is healthy"), "Health check"),
        Commands::Status { url } => report(show_status(&url).await, None, "Status check"),
        Commands::Call { url, tool, args } => report(call_remote(&url, &tool, &args).await, None, "Tool call"),
        Commands::Config { validate: _ } => report(
            validate_config().map_err(anyhow::Error::from),
            Some("✅ Configuration is valid"),
            "Configuration validation",
        ),
    }
}

fn report(result: anyhow::Result<()>, success: Option<&str>, what: &str) -> ExitCode {
    match result {
        Ok(()) => {
            if let Some(msg) = success {
                println!("{msg}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {what} failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn health_check(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("HTTP {}", response.status())
    }
}

fn validate_config() -> Result<(), crate::infra::config::ConfigError> {
    crate::infra::config::Config::load()?.validate()?;
    Ok(())
}

async fn post_message(url: &str, message: &Value) -> anyhow::Result<Response> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/mcp", url.trim_end_matches('/')))
        .json(message)
        .timeout(Duration::from_secs(5))
        .send()
        .await?;
    if !resp.status().is_success() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    Ok(resp.json::<Response>().await?)
}

async fn show_status(url: &str) -> anyhow::Result<()> {
    let healthy = health_check(url).await;
    println!(
        "🏥 Health Status: {}",
        if healthy.is_ok() { "✅ Healthy" } else { "❌ Unhealthy" }
    );
    // Nothing is listening; the tools request would fail the same way.
    let unreachable = matches!(&healthy, Err(e) if e.downcast_ref::<reqwest::Error>().is_some());
    if unreachable {
        return healthy;
    }

    match post_message(url, &json!({ "type": "tools/list" })).await {
        Ok(Response::Ok(crate::core::Reply::ToolsResponse { tools })) => {
            println!("🔧 Tools: ✅ {} available", tools.len());
            for t in tools {
                println!("  - {}: {}", t.name, t.description);
            }
        }
        Ok(other) => println!("🔧 Tools: ❌ unexpected reply {:?}", other),
        Err(e) => println!("🔧 Tools: ❌ {e}"),
    }

    println!("\n📋 Configuration:");
    for line in config_summary() {
        println!("  {line}");
    }
    Ok(())
}

/// Effective local settings, with the `MCP_CONFIG` overlay applied.
fn config_summary() -> Vec<String> {
    let mut lines = match crate::infra::config::Config::load() {
        Ok(cfg) => vec![format!("Mode: {}", cfg.mode), format!("Port: {}", cfg.port)],
        Err(e) => vec![format!("Config: ❌ {e}")],
    };
    lines.push(format!(
        "Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    ));
    lines
}

async fn call_remote(url: &str, tool: &str, args: &str) -> anyhow::Result<()> {
    let arguments: Value = serde_json::from_str(args)?;
    if !arguments.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }
    let resp = post_message(
        url,
        &json!({ "type": "tools/call", "tool_name": tool, "arguments": arguments }),
    )
    .await?;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    match resp.error_message() {
        Some(msg) => anyhow::bail!("{msg}"),
        None => Ok(()),
    }
}
