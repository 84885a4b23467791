use actix_web::{web, App, HttpServer};
use catalog_backend::config::AppConfig;
use catalog_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger};
use catalog_backend::routes;
use catalog_backend::state::StateBuilder;
use catalog_backend::telemetry;
use db_infra::bootstrap_db;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; the environment may come from the runtime.
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let mut builder = StateBuilder::new(config.security.clone()).with_rate_limit(config.rate_limit);
    match &config.db {
        Some(settings) => match bootstrap_db(settings).await {
            Ok(db) => {
                info!(db = ?settings, "database ready");
                builder = builder.with_db(db);
            }
            Err(e) => {
                error!(error = %e, "database bootstrap failed");
                std::process::exit(1);
            }
        },
        None => warn!("no database configured; using in-memory storage"),
    }

    let app_state = builder.build();
    let sweeper = app_state.rate_limiter.start_sweeper();
    let data = web::Data::new(app_state);
    let cors_origins = config.cors_origins.clone();

    info!(host = %config.host, port = config.port, "starting server");

    let result = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    sweeper.stop().await;
    info!("server stopped");
    result
}
