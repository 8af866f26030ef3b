use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "daily-report")]
#[command(about = "Daily work reports with AI-generated monthly summaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Keep data in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Mint a session token for local development
    Token {
        /// Owner id placed in the token's `sub` claim
        #[arg(short, long)]
        subject: String,
        #[arg(long, default_value = "24")]
        ttl_hours: i64,
    },
    /// Apply PostgreSQL schema migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, in_memory } => {
            commands::serve::run(port, host, in_memory).await?;
        },
        Commands::Token { subject, ttl_hours } => {
            commands::token::run(&subject, ttl_hours)?;
        },
        Commands::Migrate => {
            commands::migrate::run().await?;
        },
    }

    Ok(())
}
