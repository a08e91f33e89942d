use booking_engine::{
    api::router::create_router,
    config::Config,
    infra::factory::bootstrap_state,
    state::AppState,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let state = Arc::new(bootstrap_state(&Config::default()).await.expect("bootstrap failed"));
        let router = create_router(state.clone());
        Self { router, state }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, value)
    }

    /// Upserts an item open every day 09:00-12:00 with hourly slots.
    pub async fn create_item(&self, tenant: &str, slug: &str, overrides: Value) -> Value {
        let mut payload = item_payload();
        if let (Some(target), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        let (status, body) = self
            .request("PUT", &format!("/api/v1/{}/items/{}", tenant, slug), Some(payload))
            .await;
        assert_eq!(status, StatusCode::OK, "item upsert failed: {body}");
        body
    }
}

#[allow(dead_code)]
pub fn item_payload() -> Value {
    json!({
        "name": "Escape Room",
        "timezone": "UTC",
        "unit_price": "25.00",
        "schedule": {
            "operating_days": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            "start_time": "09:00",
            "end_time": "12:00",
            "slot_interval_minutes": 60,
            "duration_minutes": 60,
            "capacity_per_slot": 4
        },
        "fees": {
            "mode": "pass_to_customer",
            "platform_fee_percent": "1.29",
            "processor_fee_percent": "2.9",
            "processor_fee_fixed": "0.30",
            "fee_label": "Booking fee",
            "show_fee_breakdown": true
        }
    })
}

/// The first `weekday` at least a week out, so lead times never interfere.
#[allow(dead_code)]
pub fn upcoming(weekday: Weekday) -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}
