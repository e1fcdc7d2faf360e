//! Paykit CLI: inspect and call the Payman tools from a shell.
//!
//! Usage:
//!   paykit tools                   List the tools
//!   paykit schema [NAME]           Print tool definitions as JSON
//!   paykit call NAME --args JSON   Run one tool against the API
//!   paykit init --api-secret S     Write the config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;
use tracing::info;

use paykit::config::{self, ToolKitConfig};
use paykit::types::Environment;
use paykit::{tool_definitions, ToolKit};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "paykit")]
#[command(version)]
#[command(about = "Payman payments API exposed as LLM tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file [default: ~/.paykit/paykit.toml].
    #[arg(long)]
    config: Option<String>,

    /// Override the configured environment (production or sandbox).
    #[arg(long)]
    environment: Option<Environment>,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available tools.
    Tools,

    /// Print tool definitions (all, or one by name) as JSON.
    Schema {
        name: Option<String>,

        /// Render in the OpenAI `tools` format.
        #[arg(long)]
        openai: bool,
    },

    /// Run a single tool and print its result.
    Call {
        name: String,

        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Write a config file with the given credentials.
    Init {
        #[arg(long)]
        api_secret: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Tools => cmd_tools(),
        Commands::Schema { name, openai } => cmd_schema(name.as_deref(), openai),
        Commands::Call { name, args } => {
            cmd_call(&config_path, cli.environment, &name, &args).await
        }
        Commands::Init { api_secret } => cmd_init(&config_path, cli.environment, api_secret),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_tools() -> Result<()> {
    println!();
    println!("{}", "=== Payman tools ===".bold());
    println!();
    for def in tool_definitions() {
        println!("  {}", def.name.green().bold());
        println!("    {}", def.description.dimmed());
    }
    println!();
    Ok(())
}

fn cmd_schema(name: Option<&str>, openai: bool) -> Result<()> {
    let mut defs = tool_definitions();
    if let Some(name) = name {
        defs.retain(|d| d.name == name);
        if defs.is_empty() {
            bail!("Unknown tool: {}", name);
        }
    }

    let rendered: Vec<serde_json::Value> = if openai {
        defs.iter().map(|d| d.to_function_payload()).collect()
    } else {
        defs.iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<_, _>>()?
    };
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

async fn cmd_call(
    config_path: &Path,
    environment: Option<Environment>,
    name: &str,
    args: &str,
) -> Result<()> {
    let cfg = load(config_path, environment)?;
    let args: serde_json::Value =
        serde_json::from_str(args).context("--args must be valid JSON")?;

    let kit = ToolKit::build(cfg)?;
    info!("Calling {}", name);
    let result = kit.execute(name, args).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_init(config_path: &Path, environment: Option<Environment>, api_secret: String) -> Result<()> {
    let mut cfg = config::load_config(config_path)?;
    cfg.api_secret = api_secret;
    if let Some(env) = environment {
        cfg.environment = env;
    }
    cfg.validate()?;
    config::save_config(&cfg, config_path)?;

    println!(
        "{} Config written to {} (environment: {})",
        ">>>".green().bold(),
        config_path.display(),
        cfg.environment,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load config from file, then apply env and CLI overrides.
fn load(config_path: &Path, environment: Option<Environment>) -> Result<ToolKitConfig> {
    let mut cfg = config::load_config(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config::apply_env_overrides(&mut cfg)?;
    if let Some(env) = environment {
        cfg.environment = env;
    }
    Ok(cfg)
}
