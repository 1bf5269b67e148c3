use clap::Parser;
use migration::MigrationCommand;
use sea_orm::Database;

const DEFAULT_DB_URL: &str = "sqlite://mural.db?mode=rwc";

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Mural database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | status
    command: String,

    /// Database URL; falls back to MURAL_DATABASE_URL, then a local SQLite file
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!("Unknown command: {other}. Use: up | down | fresh | reset | status");
            std::process::exit(2);
        }
    };

    let url = args
        .url
        .or_else(|| std::env::var("MURAL_DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string());

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to {url}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
