//! HTTP tests for the booking endpoints, driven through the router with
//! `tower::ServiceExt::oneshot` over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use booking_core::{RoomId, TicketStatus};
use booking_server::{AppState, build_router};
use booking_testing::InMemoryStore;
use booking_testing::fixtures::{self, TicketKind};
use booking_web::CORRELATION_ID_HEADER;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(store: &InMemoryStore) -> Router {
    booking_testing::init_test_tracing();
    build_router(AppState::new(store.clone()))
}

struct Call {
    method: &'static str,
    uri: String,
    token: Option<String>,
    body: Option<String>,
}

impl Call {
    fn new(method: &'static str, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            token: None,
            body: None,
        }
    }

    fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    fn json(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    fn raw_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    async fn send(self, app: Router) -> (StatusCode, Value) {
        let mut request = Request::builder().method(self.method).uri(self.uri);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if self.body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(self.body.map_or_else(Body::empty, Body::from))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

fn room_body(room: RoomId) -> Value {
    json!({ "roomId": room.get() })
}

// ============================================================================
// Authentication (every route)
// ============================================================================

#[tokio::test]
async fn every_route_requires_a_token() {
    let store = InMemoryStore::new();

    for call in [
        Call::new("GET", "/booking"),
        Call::new("POST", "/booking").json(&json!({ "roomId": 1 })),
        Call::new("PUT", "/booking/1").json(&json!({ "roomId": 1 })),
    ] {
        let (status, body) = call.send(app(&store)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let store = InMemoryStore::new();
    let (status, _) = Call::new("GET", "/booking")
        .token("not-a-session")
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_token_is_unauthorized() {
    let store = InMemoryStore::new();

    let (status, _) = Call::new("POST", "/booking")
        .token("")
        .json(&json!({ "roomId": 1 }))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// GET /booking
// ============================================================================

#[tokio::test]
async fn get_returns_booking_with_room() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (hotel, room) = fixtures::room_in_new_hotel(&store);
    let booking = store.create_booking(room.id, user.id);

    let (status, body) = Call::new("GET", "/booking")
        .token(&user.token)
        .send(app(&store))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": booking.id.get(),
            "Room": {
                "id": room.id.get(),
                "name": room.name,
                "capacity": room.capacity,
                "hotelId": hotel.get(),
                "createdAt": "2025-01-01T00:00:00.000Z",
                "updatedAt": "2025-01-01T00:00:00.000Z",
            }
        }])
    );
}

#[tokio::test]
async fn get_without_booking_is_not_found() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);

    let (status, body) = Call::new("GET", "/booking")
        .token(&user.token)
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn get_without_enrollment_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::signed_in_user(&store);

    let (status, _) = Call::new("GET", "/booking")
        .token(&user.token)
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// POST /booking
// ============================================================================

#[tokio::test]
async fn post_books_room_with_201() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);

    let (status, body) = Call::new("POST", "/booking")
        .token(&user.token)
        .json(&room_body(room.id))
        .send(app(&store))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let bookings = store.bookings();
    assert_eq!(bookings.len(), 1);
    assert_eq!(body, json!({ "bookingId": bookings[0].id.get() }));
    assert_eq!(bookings[0].room_id, room.id);
    assert_eq!(bookings[0].user_id, user.id);
}

#[tokio::test]
async fn post_without_room_id_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);

    for call in [
        Call::new("POST", "/booking"),
        Call::new("POST", "/booking").json(&json!({})),
        Call::new("POST", "/booking").json(&json!({ "roomId": 0 })),
        Call::new("POST", "/booking").json(&json!({ "roomId": "abc" })),
        Call::new("POST", "/booking").raw_body("{roomId:"),
    ] {
        let (status, body) = call.token(&user.token).send(app(&store)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
    }
    assert!(store.bookings().is_empty());
}

#[tokio::test]
async fn post_with_ineligible_ticket_is_forbidden() {
    for (kind, status) in [
        (TicketKind::WithHotel, TicketStatus::Reserved),
        (TicketKind::Remote, TicketStatus::Paid),
        (TicketKind::WithoutHotel, TicketStatus::Paid),
    ] {
        let store = InMemoryStore::new();
        let user = fixtures::ticket_holder(&store, kind, status);
        let (_, room) = fixtures::room_in_new_hotel(&store);

        let (code, _) = Call::new("POST", "/booking")
            .token(&user.token)
            .json(&room_body(room.id))
            .send(app(&store))
            .await;
        assert_eq!(code, StatusCode::FORBIDDEN, "{kind:?} / {status}");
    }
}

#[tokio::test]
async fn post_without_ticket_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::enrolled_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);

    let (status, _) = Call::new("POST", "/booking")
        .token(&user.token)
        .json(&room_body(room.id))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn post_unknown_room_is_not_found() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);

    let (status, body) = Call::new("POST", "/booking")
        .token(&user.token)
        .json(&json!({ "roomId": 9_999 }))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn post_full_room_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);
    fixtures::fill_room(&store, &room);

    let (status, _) = Call::new("POST", "/booking")
        .token(&user.token)
        .json(&room_body(room.id))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn storage_failure_is_500() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);
    let app = app(&store);
    store.set_unavailable(true);

    let (status, body) = Call::new("POST", "/booking")
        .token(&user.token)
        .json(&room_body(room.id))
        .send(app)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
}

// ============================================================================
// PUT /booking/:bookingId
// ============================================================================

#[tokio::test]
async fn put_moves_booking() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (hotel, from) = fixtures::room_in_new_hotel(&store);
    let to = store.create_room(hotel, 2);
    let booking = store.create_booking(from.id, user.id);

    let (status, body) = Call::new("PUT", format!("/booking/{}", booking.id))
        .token(&user.token)
        .json(&room_body(to.id))
        .send(app(&store))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], booking.id.get());
    assert_eq!(body["userId"], user.id.get());
    assert_eq!(body["roomId"], to.id.get());
    assert_eq!(body["createdAt"], "2025-01-01T00:00:00.000Z");
    assert_eq!(body["updatedAt"], "2025-01-01T00:00:00.000Z");
    assert_eq!(store.booking(booking.id).map(|b| b.room_id), Some(to.id));
}

#[tokio::test]
async fn put_with_invalid_ids_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);
    let booking = store.create_booking(room.id, user.id);

    for call in [
        Call::new("PUT", format!("/booking/{}", booking.id)).json(&json!({})),
        Call::new("PUT", format!("/booking/{}", booking.id)).json(&json!({ "roomId": -1 })),
        Call::new("PUT", "/booking/0").json(&room_body(room.id)),
        Call::new("PUT", "/booking/abc").json(&room_body(room.id)),
    ] {
        let (status, _) = call.token(&user.token).send(app(&store)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn put_to_unknown_room_is_not_found() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);
    let booking = store.create_booking(room.id, user.id);

    let (status, _) = Call::new("PUT", format!("/booking/{}", booking.id))
        .token(&user.token)
        .json(&json!({ "roomId": 9_999 }))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_to_full_room_is_forbidden() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (hotel, from) = fixtures::room_in_new_hotel(&store);
    let booking = store.create_booking(from.id, user.id);
    let full = store.create_room(hotel, 2);
    fixtures::fill_room(&store, &full);

    let (status, _) = Call::new("PUT", format!("/booking/{}", booking.id))
        .token(&user.token)
        .json(&room_body(full.id))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn put_of_someone_elses_booking_is_not_found() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let other = fixtures::eligible_user(&store);
    let (hotel, from) = fixtures::room_in_new_hotel(&store);
    let to = store.create_room(hotel, 2);
    store.create_booking(from.id, user.id);
    let theirs = store.create_booking(from.id, other.id);

    let (status, _) = Call::new("PUT", format!("/booking/{}", theirs.id))
        .token(&user.token)
        .json(&room_body(to.id))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_without_booking_is_not_found() {
    let store = InMemoryStore::new();
    let user = fixtures::eligible_user(&store);
    let (_, room) = fixtures::room_in_new_hotel(&store);

    let (status, _) = Call::new("PUT", "/booking/1")
        .token(&user.token)
        .json(&room_body(room.id))
        .send(app(&store))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Health & middleware
// ============================================================================

#[tokio::test]
async fn health_and_readiness() {
    let store = InMemoryStore::new();

    let (status, body) = Call::new("GET", "/health").send(app(&store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = Call::new("GET", "/ready").send(app(&store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ready" }));

    store.set_unavailable(true);
    let (status, body) = Call::new("GET", "/ready").send(app(&store)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn responses_carry_correlation_id() {
    let store = InMemoryStore::new();
    let request = Request::builder()
        .uri("/booking")
        .body(Body::empty())
        .unwrap();

    let response = app(&store).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}
