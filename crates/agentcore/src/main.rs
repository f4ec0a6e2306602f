//! AgentCore POC - prompt-routing agent and order/FAQ tool server

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{agent_command, invoke_command, mcp_command, status_command, tools_command};

/// AgentCore POC - agent front-end and tool server
#[derive(Parser)]
#[command(name = "agentcore")]
#[command(about = "◆ Prompt-routing agent with order lookup and FAQ search tools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tool server
    Tools,
    /// Run the agent front-end
    Agent,
    /// Send prompts to an agent runtime, one turn at a time
    Invoke {
        /// Prompts to send, in order
        prompts: Vec<String>,
    },
    /// Exercise the tool runtime's JSON-RPC surface
    Mcp,
    /// Show resolved configuration
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (what, result) = match cli.command {
        Commands::Tools => ("Tool server", tools_command().await),
        Commands::Agent => ("Front-end", agent_command().await),
        Commands::Invoke { prompts } => ("Invoke", invoke_command(prompts).await),
        Commands::Mcp => ("MCP session", mcp_command().await),
        Commands::Status => ("Status", status_command().await),
    };

    if let Err(e) = result {
        error!("{} failed: {:#}", what, e);
        std::process::exit(1);
    }
}
