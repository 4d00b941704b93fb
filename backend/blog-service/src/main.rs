use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;

use blog_service::graphql::build_schema;
use blog_service::{handlers, logging, AppState, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    info!("Starting blog-service...");

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize storage")?;

    let schema = build_schema(state.clone());
    let bind_addr = config.server.bind_addr();
    info!(storage = %config.storage, "blog-service listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    info!("blog-service stopped");
    Ok(())
}
