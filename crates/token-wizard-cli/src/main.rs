//! token-wizard CLI — ERC20 utility and governance contract generator.
//!
//! Two commands:
//! - `serve` runs the HTTP gateway (`/ut-contract`, `/gt-contract`)
//! - `generate` renders a contract from a JSON request file
//!
//! Both delegate to [`token_wizard_core::ContractWizard`].

mod commands;
mod output;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "token-wizard",
    about = "ERC20 contract generator — utility tokens, governance tokens, staking and rewards",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Address to listen on
        #[arg(long, env = "TOKEN_WIZARD_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(long, short, env = "TOKEN_WIZARD_PORT", default_value_t = token_wizard_server::ServerConfig::DEFAULT_PORT)]
        port: u16,
    },

    /// Generate a contract from a JSON request file
    Generate {
        /// Path to the request JSON (same body as the HTTP endpoints)
        #[arg(long, short)]
        request: PathBuf,

        /// Contract kind (prompts if omitted)
        #[arg(long, value_enum)]
        kind: Option<ContractKind>,

        /// Output path for the .sol file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum ContractKind {
    Utility,
    Governance,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Governance => "governance",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; the gateway logs requests at info by default
    let floor = u8::from(matches!(cli.command, Commands::Serve { .. }));
    let filter = match cli.verbose.max(floor) {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve::run(host, port).await?;
        }
        Commands::Generate {
            request,
            kind,
            output,
        } => {
            commands::generate::run(&request, kind, output.as_deref())?;
        }
    }

    Ok(())
}
