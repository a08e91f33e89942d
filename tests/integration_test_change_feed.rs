mod common;

use booking_engine::infra::change_feed::AvailabilityChange;
use chrono::Weekday;
use common::{upcoming, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_widget_sees_catalog_and_booking_changes() {
    let app = TestApp::new().await;
    let mut rx = app.state.change_feed.subscribe();

    app.create_item("acme", "room", json!({})).await;
    assert_eq!(
        rx.recv().await.unwrap(),
        AvailabilityChange::ItemUpdated { tenant_id: "acme".into(), slug: "room".into() }
    );

    let date = upcoming(Weekday::Mon);
    app.request(
        "PUT",
        "/api/v1/acme/items/room/blocked-dates",
        Some(json!({ "blocked_dates": [(date + chrono::Duration::days(1)).to_string()] })),
    ).await;
    assert_eq!(
        rx.recv().await.unwrap(),
        AvailabilityChange::BlockedDatesChanged { tenant_id: "acme".into(), slug: "room".into() }
    );

    app.request("POST", "/api/v1/acme/items/room/reservations", Some(json!({
        "date": date.to_string(), "time": "09:00", "party_size": 3
    }))).await;
    match rx.recv().await.unwrap() {
        AvailabilityChange::ReservationCommitted { slug, date: d, spots_remaining, .. } => {
            assert_eq!(slug, "room");
            assert_eq!(d, date);
            assert_eq!(spots_remaining, 1);
        }
        other => panic!("unexpected change {other:?}"),
    }

    app.request("DELETE", "/api/v1/acme/items/room", None).await;
    assert_eq!(
        rx.recv().await.unwrap(),
        AvailabilityChange::ItemDeleted { tenant_id: "acme".into(), slug: "room".into() }
    );
}

#[tokio::test]
async fn test_rejected_writes_publish_nothing() {
    let app = TestApp::new().await;
    app.create_item("acme", "room", json!({})).await;
    let mut rx = app.state.change_feed.subscribe();

    let mut payload = common::item_payload();
    payload["schedule"]["slot_interval_minutes"] = json!(0);
    app.request("PUT", "/api/v1/acme/items/room", Some(payload)).await;

    app.request("POST", "/api/v1/acme/items/room/reservations", Some(json!({
        "date": upcoming(Weekday::Mon).to_string(), "time": "09:00", "party_size": 9
    }))).await;

    assert!(rx.try_recv().is_err());
}
