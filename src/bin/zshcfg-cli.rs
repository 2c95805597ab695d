use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "zshcfg-cli")]
#[command(about = "Management CLI for the zsh configuration service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Print the saved configuration
    Load,
    /// Save a configuration blob read from a file
    Save {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Apply shell init and/or config contents read from files
    Apply {
        #[arg(long)]
        zshrc: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/api/status", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Load => {
            let res = client
                .get(format!("{}/api/load_config", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Save { file } => {
            let config = std::fs::read_to_string(&file)?;
            let res = client
                .post(format!("{}/api/save_config", cli.url))
                .json(&json!({ "config": config }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Apply { zshrc, config } => {
            let zshrc_content = zshrc.map(std::fs::read_to_string).transpose()?;
            let zsh_config = config.map(std::fs::read_to_string).transpose()?;
            let res = client
                .post(format!("{}/api/apply_config", cli.url))
                .json(&json!({
                    "zshrc_content": zshrc_content,
                    "zsh_config": zsh_config,
                }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
