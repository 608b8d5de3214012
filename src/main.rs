use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, Result};
use config::Config;
use nbu_client::NbuClient;
use service::RateService;
use sqlx::postgres::PgPoolOptions;
use store::PgRateStore;

mod api;
mod config;
mod error;
mod exchange_rate;
mod nbu_client;
mod nbu_rate;
mod service;
mod store;
#[cfg(test)]
mod test_support;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Can't connect to the database")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Can't apply database migrations")?;

    let service = web::Data::new(RateService::new(
        Arc::new(PgRateStore::new(pool)),
        Arc::new(NbuClient::new(config.nbu_api_url.clone())),
    ));

    log::info!(
        "Listening on {}:{}, upstream {}",
        config.bind_address,
        config.port,
        config.nbu_api_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(api::configure)
    })
    .bind((config.bind_address.as_str(), config.port))
    .with_context(|| format!("Can't bind {}:{}", config.bind_address, config.port))?
    .run()
    .await?;

    Ok(())
}
