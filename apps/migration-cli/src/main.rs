use clap::Parser;
use db_infra::{orchestrate_migration, sanitize_db_url, DbSettings};
use migration::MigrationCommand;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Catalog database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Connection URL. Defaults to DATABASE_URL or the DB_* variables.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("info,sqlx=warn,sea_orm_migration=info")
        .init();

    let args = Args::parse();

    let settings = match args.database_url {
        Some(url) => DbSettings::new(url),
        None => match DbSettings::from_env() {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = %e, "no database configured");
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = settings.kind() {
        error!(error = %e, "unsupported database URL");
        std::process::exit(2);
    }
    if settings.url.contains(":memory:") {
        error!("in-memory SQLite is discarded when the CLI exits; use a file or Postgres URL");
        std::process::exit(2);
    }

    info!(url = %sanitize_db_url(&settings.url), command = ?args.command, "running migration");
    if let Err(e) = orchestrate_migration(&settings, args.command).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
}
