pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub use client::ApiClient;

#[derive(Parser)]
#[command(name = "salaries")]
#[command(about = "Salaries CLI - query the salary survey API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "API base URL (defaults to SALARY_API_URL, then the configured port on localhost)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Server status")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Salary statistics")]
    Salary {
        #[command(subcommand)]
        cmd: commands::salary::SalaryCommands,
    },

    #[command(about = "Local database management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::from_cli(cli.server.as_deref());

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
        Commands::Salary { cmd } => commands::salary::handle(cmd, &client, output_format).await,
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
