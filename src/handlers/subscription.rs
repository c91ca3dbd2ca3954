use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, put, HttpResponse};

use crate::errors::SubscriptionError;
use crate::models::common::{DataResponse, PriceQuery, TotalPriceResponse};
use crate::models::subscription::{SubscriptionDto, SubscriptionRequest};
use crate::services::subscription::SubscriptionService;

#[get("/subscriptions")]
pub async fn list_subscriptions(
    service: Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscriptions = service.list_subscriptions().await?;
    let dtos: Vec<SubscriptionDto> = subscriptions.iter().map(SubscriptionDto::from).collect();
    Ok(HttpResponse::Ok().json(DataResponse::new(dtos)))
}

#[get("/subscriptions/aggregate/total")]
pub async fn get_total_price(
    service: Data<SubscriptionService>,
    query: Query<PriceQuery>,
) -> Result<HttpResponse, SubscriptionError> {
    let total_price = service.total_price(&query).await?;
    Ok(HttpResponse::Ok().json(TotalPriceResponse { total_price }))
}

#[get("/subscriptions/{id}")]
pub async fn get_subscription(
    service: Data<SubscriptionService>,
    path: Path<String>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscription = service.get_subscription(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(SubscriptionDto::from(subscription))))
}

#[post("/subscription")]
pub async fn create_subscription(
    service: Data<SubscriptionService>,
    payload: Json<SubscriptionRequest>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscription = service.create_subscription(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(SubscriptionDto::from(subscription))))
}

#[put("/subscription/{id}")]
pub async fn update_subscription(
    service: Data<SubscriptionService>,
    path: Path<String>,
    payload: Json<SubscriptionRequest>,
) -> Result<HttpResponse, SubscriptionError> {
    let subscription = service
        .update_subscription(&path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(SubscriptionDto::from(subscription))))
}

#[delete("/subscription/{id}")]
pub async fn delete_subscription(
    service: Data<SubscriptionService>,
    path: Path<String>,
) -> Result<HttpResponse, SubscriptionError> {
    service.delete_subscription(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(true)))
}
