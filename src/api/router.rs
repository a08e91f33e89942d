use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, item, availability, quote, reservation};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Catalog Admin
        .route("/api/v1/{tenant_id}/items", get(item::list_items))
        .route("/api/v1/{tenant_id}/items/{slug}", get(item::get_item).put(item::upsert_item).delete(item::delete_item))
        .route("/api/v1/{tenant_id}/items/{slug}/blocked-dates", get(item::get_blocked_dates).put(item::replace_blocked_dates))

        // Public Booking Flow
        .route("/api/v1/{tenant_id}/items/{slug}/dates", get(availability::get_available_dates))
        .route("/api/v1/{tenant_id}/items/{slug}/slots", get(availability::get_slots))
        .route("/api/v1/{tenant_id}/items/{slug}/quote", post(quote::create_quote))
        .route("/api/v1/{tenant_id}/items/{slug}/reservations", post(reservation::create_reservation).get(reservation::list_reservations))

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
                        tenant_id = tracing::field::Empty,
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
                })
        )
        .with_state(state)
}
