use actix_web::{middleware::Logger, web, App, HttpServer};
use hackathon_teams::config::EnvConfig;
use hackathon_teams::db::db_service::DbService;
use hackathon_teams::routes::configure_routes;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hackathon_teams=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EnvConfig::from_env().map_err(|e| {
        error!("configuration error: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let addr = format!("0.0.0.0:{}", config.port);

    let db_service = Arc::new(
        DbService::new(&config.db_url)
            .await
            .map_err(|e| {
                error!("database initialisation failed: {e}");
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?
    );

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&db_service)))
            .app_data(web::Data::new(config.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
