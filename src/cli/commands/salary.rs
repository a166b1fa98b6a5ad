use clap::Subcommand;

use crate::api::format::AverageSalaryRequest;
use crate::cli::{utils, ApiClient, OutputFormat};
use crate::types::Dimension;

#[derive(Subcommand)]
pub enum SalaryCommands {
    #[command(about = "Average salary, optionally filtered by job title, location and experience level")]
    Average {
        #[arg(long, help = "Job title label (exact match)")]
        area: Option<String>,
        #[arg(long, help = "Location label (exact match)")]
        location: Option<String>,
        #[arg(long, help = "Experience level label, e.g. Senior")]
        experience_level: Option<String>,
    },

    #[command(about = "List the values available for each filter")]
    Filters,

    #[command(about = "Search a dimension's labels by substring (diagnostics)")]
    Lookup {
        #[arg(help = "Dimension: job_title, location, experience_level, employment_type, role")]
        dimension: Dimension,
        #[arg(help = "Substring to search for")]
        query: Option<String>,
    },
}

pub async fn handle(cmd: SalaryCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SalaryCommands::Average { area, location, experience_level } => {
            let request = AverageSalaryRequest { area, location, experience_level };
            let response = client.average_salary(&request).await?;
            utils::output(output_format, &response, |r| {
                println!("Average salary: {:.2} {} ({} samples)", r.average_salary, r.currency, r.sample_size);
            })
        }
        SalaryCommands::Filters => {
            let response = client.filter_options().await?;
            utils::output(output_format, &response, |r| {
                println!("Job titles:        {}", utils::join_or_dash(&r.areas));
                println!("Locations:         {}", utils::join_or_dash(&r.locations));
                println!("Experience levels: {}", utils::join_or_dash(&r.experience_levels));
            })
        }
        SalaryCommands::Lookup { dimension, query } => {
            let response = client.lookup(dimension, query.as_deref().unwrap_or_default()).await?;
            utils::output(output_format, &response, |r| {
                if r.matches.is_empty() {
                    println!("No {} labels match '{}'", r.dimension, r.query);
                }
                for entity in &r.matches {
                    println!("{:>6}  {}", entity.id, entity.label.as_deref().unwrap_or("<null>"));
                }
            })
        }
    }
}
