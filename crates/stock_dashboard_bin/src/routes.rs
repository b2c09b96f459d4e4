use actix_web::{HttpResponse, Responder, error, get, web};
use dashboard_core::fetcher::PriceFetcher;
use dashboard_core::inputs::InputParams;
use dashboard_core::pipeline;
use log::error;

use crate::page;
use crate::utils;
use crate::view::{DashboardView, ErrorResponse, HealthcheckResponse};

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::INDEX_HTML)
}

#[get("/api/dashboard")]
async fn get_dashboard(
    query: web::Query<InputParams>,
    fetcher: web::Data<PriceFetcher>,
) -> impl Responder {
    let mut params = query.into_inner();
    params.ticker = params.ticker.map(utils::sanitize_ticker);
    let inputs = params.collect(chrono::Local::now().date_naive());

    match pipeline::run(&fetcher, inputs).await {
        Ok(dashboard) => HttpResponse::Ok().json(DashboardView::from(dashboard)),
        Err(e) => {
            error!("get_dashboard | {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

#[get("/healthcheck")]
async fn healthcheck() -> impl Responder {
    web::Json(HealthcheckResponse {
        status: "ok".to_string(),
    })
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(HealthcheckResponse {
        status: "not found".to_string(),
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { error: message }),
        )
        .into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .service(index)
        .service(get_dashboard)
        .service(healthcheck);
}
