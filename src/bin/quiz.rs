use std::{fs::create_dir_all, path::PathBuf};

use anyhow::Context;
use trivia_quiz::db;
use trivia_quiz::server::app::run_server;
use trivia_quiz::settings::Settings;
use trivia_quiz::telemetry::init_tracing;

use clap::Parser;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML config file
    #[clap(long, default_value = "quiz.toml")]
    config: PathBuf,
    /// Address to listen on, overrides the config
    #[clap(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config).context("Failed to load settings")?;
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }

    if let Some(parent) = settings.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).context("Failed to create directory for the database")?;
    }
    let pool = db::establish_connection(&settings.db_path)
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    if !settings.questions_dir.is_dir() {
        tracing::warn!(
            "Questions directory {} does not exist, no categories will be offered",
            settings.questions_dir.display()
        );
    }

    run_server(&settings, pool).await
}
