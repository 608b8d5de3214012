use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{RatesError, Result};
use crate::service::RateService;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    date: Option<String>,
}

impl DateQuery {
    fn parse(&self) -> Result<Option<NaiveDate>> {
        self.date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    RatesError::InvalidArgument(format!("date {raw:?} is not an ISO-8601 date: {e}"))
                })
            })
            .transpose()
    }
}

async fn current_rates(service: web::Data<RateService>) -> Result<HttpResponse> {
    let rates = service.get_current_rates().await?.into_rates();
    Ok(HttpResponse::Ok().json(rates))
}

async fn rates_by_date(
    service: web::Data<RateService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    let rates = service.get_rates_by_date(query.parse()?).await?;
    Ok(HttpResponse::Ok().json(rates))
}

async fn delete_rates(
    service: web::Data<RateService>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    let date = query.parse()?;
    service.delete_rates_by_date(date).await?;

    let date = date.map(|d| d.to_string()).unwrap_or_default();
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!(
            "Exchange rates for date {date} have been successfully deleted."
        )))
}

async fn latest_rates(service: web::Data<RateService>) -> Result<HttpResponse> {
    let rates = service.get_latest_rates().await?;
    Ok(HttpResponse::Ok().json(rates))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/currency")
            .route("/current", web::get().to(current_rates))
            .route("/rates", web::get().to(rates_by_date))
            .route("/delete", web::delete().to(delete_rates))
            .route("/latest", web::get().to(latest_rates)),
    );
}
