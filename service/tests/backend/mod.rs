//! In-process stand-in for the admin REST backend.
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use abi::{ApiConfig, Booking, BookingStatus, BookingsResponse, PaginationMeta, Property, User, UserRole};
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "hunter2";
pub const TOKEN: &str = "tok-olga";

#[derive(Clone)]
struct Backend {
    bookings: Arc<Mutex<Vec<Booking>>>,
    properties: Arc<Vec<Property>>,
    next_id: Arc<Mutex<u32>>,
}

#[derive(Deserialize)]
struct Login {
    email: String,
    password: String,
}

pub fn seed() -> Vec<Booking> {
    let mut b1 = Booking::new_pending("b1", "p1", "Ada", "2024-03-10", "2024-03-13")
        .with_status(BookingStatus::Confirmed);
    b1.total_amount = 545.0;
    vec![
        b1,
        Booking::new_pending("b2", "p1", "Bob", "2024-03-11T15:00:00Z", "2024-03-15T11:00:00Z"),
        Booking::new_pending("b3", "p2", "Cy", "2024-03-10", "2024-03-12"),
        Booking::new_pending("b4", "p1", "Dee", "2024-04-02", "2024-04-05"),
    ]
}

/// Serve `bookings` on an ephemeral port and return a config pointing at it.
pub async fn spawn(bookings: Vec<Booking>) -> ApiConfig {
    let backend = Backend {
        bookings: Arc::new(Mutex::new(bookings)),
        properties: Arc::new(vec![
            Property::new("p1", "Sea View Loft"),
            Property::new("p2", "Garden House"),
        ]),
        next_id: Arc::new(Mutex::new(100)),
    };
    let app = Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route(
            "/api/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/api/properties", get(list_properties))
        .route("/api/properties/:id", get(get_property))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiConfig {
        base_url: format!("http://{}/api", addr),
        timeout_ms: 2000,
    }
}

/// Serve a fixed JSON body for `GET /api/bookings`, for payloads the typed
/// model cannot produce.
pub async fn spawn_raw(body: serde_json::Value) -> ApiConfig {
    let app = Router::new().route("/api/bookings", get(move || async move { Json(body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ApiConfig {
        base_url: format!("http://{}/api", addr),
        timeout_ms: 2000,
    }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid token" }))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
}

/// Anonymous requests pass, a wrong token does not.
fn token_ok(headers: &HeaderMap) -> bool {
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => true,
        Some(value) => value == format!("Bearer {}", TOKEN),
    }
}

fn day_of(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}

async fn list_bookings(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !token_ok(&headers) {
        return unauthorized();
    }
    let bookings = backend.bookings.lock().unwrap();
    let matching: Vec<Booking> = bookings
        .iter()
        .filter(|b| params.get("propertyId").map_or(true, |p| &b.property_id == p))
        .filter(|b| params.get("status").map_or(true, |s| b.booking_status.as_str() == s.as_str()))
        .filter(|b| {
            params
                .get("endDate")
                .map_or(true, |end| day_of(&b.check_in_date) <= end.as_str())
        })
        .filter(|b| {
            params
                .get("startDate")
                .map_or(true, |start| day_of(&b.check_out_date) > start.as_str())
        })
        .cloned()
        .collect();

    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(50);
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let total = matching.len();
    let page: Vec<Booking> = matching.into_iter().skip(offset).take(limit).collect();
    let pagination = PaginationMeta {
        total: total as u64,
        limit: limit as u32,
        offset: offset as u32,
        has_more: offset + page.len() < total,
    };
    Json(BookingsResponse {
        bookings: page,
        pagination,
    })
    .into_response()
}

async fn get_booking(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    if id == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response();
    }
    let bookings = backend.bookings.lock().unwrap();
    match bookings.iter().find(|b| b.id == id) {
        Some(booking) => Json(json!({ "booking": booking })).into_response(),
        None => not_found(),
    }
}

async fn create_booking(State(backend): State<Backend>, Json(mut booking): Json<Booking>) -> Response {
    let mut next_id = backend.next_id.lock().unwrap();
    booking.id = format!("bk-{}", *next_id);
    *next_id += 1;
    backend.bookings.lock().unwrap().push(booking.clone());
    (StatusCode::CREATED, Json(booking)).into_response()
}

async fn update_booking(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(mut booking): Json<Booking>,
) -> Response {
    let mut bookings = backend.bookings.lock().unwrap();
    match bookings.iter_mut().find(|b| b.id == id) {
        Some(slot) => {
            booking.id = id;
            *slot = booking.clone();
            Json(booking).into_response()
        }
        None => not_found(),
    }
}

async fn delete_booking(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    let mut bookings = backend.bookings.lock().unwrap();
    let before = bookings.len();
    bookings.retain(|b| b.id != id);
    if bookings.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_properties(State(backend): State<Backend>) -> Response {
    Json(json!({ "properties": backend.properties.as_slice() })).into_response()
}

async fn get_property(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    match backend.properties.iter().find(|p| p.id == id) {
        Some(property) => Json(json!({ "property": property })).into_response(),
        None => not_found(),
    }
}

fn olga(email: String) -> User {
    User {
        id: "u1".into(),
        email,
        first_name: "Olga".into(),
        last_name: "Owner".into(),
        role: UserRole::PropertyOwner,
        profile_image_url: None,
    }
}

async fn login(Json(req): Json<Login>) -> Response {
    if req.password != PASSWORD {
        return unauthorized();
    }
    Json(json!({ "user": olga(req.email), "token": TOKEN })).into_response()
}

async fn me(headers: HeaderMap) -> Response {
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == format!("Bearer {}", TOKEN) => {
            Json(olga("owner@example.com".into())).into_response()
        }
        _ => unauthorized(),
    }
}
