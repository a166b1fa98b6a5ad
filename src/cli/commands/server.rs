use clap::Subcommand;
use serde_json::Value;

use crate::cli::{utils, ApiClient, OutputFormat};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from API /health endpoint")]
    Health,

    #[command(about = "Show server information from API root endpoint")]
    Info,
}

pub async fn handle(cmd: ServerCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health => {
            let (status, body) = client.health().await?;
            utils::output(output_format, &body, |body| {
                let state = body["data"]["status"].as_str().unwrap_or("unknown");
                println!("{} {} ({})", client.base_url(), state, status);
                if let Some(err) = body["data"]["database_error"].as_str() {
                    println!("  database: {}", err);
                }
            })?;
            if !status.is_success() {
                anyhow::bail!("server is degraded");
            }
            Ok(())
        }
        ServerCommands::Info => {
            let body = client.info().await?;
            utils::output(output_format, &body, |body: &Value| {
                let data = &body["data"];
                println!(
                    "{} {}",
                    data["name"].as_str().unwrap_or("?"),
                    data["version"].as_str().unwrap_or("?")
                );
                if let Some(endpoints) = data["endpoints"].as_object() {
                    for (name, route) in endpoints {
                        println!("  {:<8} {}", name, route.as_str().unwrap_or_default());
                    }
                }
            })
        }
    }
}
