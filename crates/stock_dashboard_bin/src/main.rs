use actix_web::{App, HttpServer, middleware::Logger, web};
use dashboard_core::fetcher::PriceFetcher;
use log::{error, info};
use std::process::exit;
use yahoo_api::api::YahooAPI;

mod config;
mod page;
mod routes;
mod utils;
mod view;

use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not create config: {}", e);
            exit(1);
        }
    };

    let yahoo_api = match YahooAPI::new(&config.provider_url, config.timeout) {
        Ok(api) => api,
        Err(e) => {
            error!("Could not create data provider client: {}", e);
            exit(1);
        }
    };
    info!(
        "Data provider: {} (timeout {}s)",
        config.provider_url,
        config.timeout.as_secs()
    );

    let fetcher = web::Data::new(PriceFetcher::new(Box::new(yahoo_api)));

    info!("Listening on {}:{}", config.bind, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(fetcher.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
            .wrap(Logger::default())
    })
    .bind((config.bind.as_str(), config.port))?
    .workers(config.workers)
    .run()
    .await
}
