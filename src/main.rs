mod config;
mod errors;
mod handlers;
mod models;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use services::{
    database::SurrealSubscriptionRepository,
    subscription::SubscriptionService,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::from_env().context("Failed to load configuration")?;

    // Storage is injected into the service; nothing reaches for a global handle
    let repository = SurrealSubscriptionRepository::connect(&config.database)
        .await
        .context("Failed to initialize database")?;
    let subscription_service = SubscriptionService::new(Arc::new(repository));

    let bind_address = (config.server.host.clone(), config.server.port);
    log::info!(
        "Starting subscription cost server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(web::Data::new(subscription_service.clone()))
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
