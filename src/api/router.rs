use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{booking, coupon, health, user, vehicle};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Vehicle inventory; ?id= selects a single record
        .route(
            "/vehicles",
            get(vehicle::list_or_get_vehicles)
                .post(vehicle::create_vehicle)
                .put(vehicle::update_vehicle)
                .delete(vehicle::delete_vehicle),
        )

        // Bookings: rider creation + filtered listing for the dashboards
        .route("/bookings", get(booking::list_bookings).post(booking::create_booking))

        // Admin approval workflow
        .route("/admin/bookings/{id}", patch(booking::decide_booking))

        // Users & coupons
        .route(
            "/users",
            get(user::list_or_get_users)
                .post(user::register_user)
                .delete(user::delete_user),
        )
        .route("/coupons", get(coupon::list_coupons).post(coupon::create_coupon))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                }),
        )
        .with_state(state)
}
