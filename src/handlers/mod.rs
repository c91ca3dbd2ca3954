pub mod health;
pub mod subscription;

use actix_web::web;

use crate::errors::SubscriptionError;

/// Register every route plus body and query-string error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| SubscriptionError::format(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| SubscriptionError::format(err.to_string()).into()),
    )
    .service(subscription::list_subscriptions)
    .service(subscription::get_total_price)
    .service(subscription::get_subscription)
    .service(subscription::create_subscription)
    .service(subscription::update_subscription)
    .service(subscription::delete_subscription)
    .service(health::health_check);
}
