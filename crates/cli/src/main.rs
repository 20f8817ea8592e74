mod commands;
mod config;
mod prompt;
mod store;
#[cfg(test)]
mod test;
mod ui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use crate::{config::Config, prompt::TerminalPrompter, store::PgReviewTable};

#[derive(Parser)]
#[command(name = "site-admin")]
#[command(about = "Operator tools for the reviews table")]
#[command(version)]
#[command(after_help = "Examples:
  site-admin list       Show every review
  site-admin find       Show reviews that look like test data
  site-admin triage     Decide on flagged reviews one at a time
  site-admin cleanup    Delete every flagged review at once")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all reviews, newest first
    List,

    /// Show reviews that look like placeholder or test content
    Find,

    /// Delete every flagged review (asks you to type DELETE TESTS)
    Cleanup,

    /// Review flagged reviews one by one: delete, keep or stop
    Triage,

    /// Delete ALL reviews (asks you to type NUCLEAR)
    Purge,

    /// Create the reviews table if missing
    InitDb,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = envy::from_env::<Config>().context("DATABASE_URL is not set")?;

    let pool = ui::spin(
        "Connecting to database...",
        PgPoolOptions::new()
            .max_connections(config.admin_max_connections)
            .connect(&config.database_url),
    )
    .await
    .context("Failed to connect to database")?;

    let table = PgReviewTable::new(pool);
    let mut prompter = TerminalPrompter::new();

    match cli.command {
        Commands::List => commands::list::run(&table).await.map(drop),
        Commands::Find => commands::find::run(&table).await.map(drop),
        Commands::Cleanup => commands::cleanup::run(&table, &mut prompter).await.map(drop),
        Commands::Triage => commands::triage::run(&table, &mut prompter).await.map(drop),
        Commands::Purge => commands::purge::run(&table, &mut prompter).await.map(drop),
        Commands::InitDb => commands::init_db::run(&table).await,
    }
}
