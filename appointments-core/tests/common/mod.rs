//! In-process REST server implementing the `/appointments` resource.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use appointments_core::Appointment;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

/// City the server refuses to book, to exercise store-side rejection.
pub const REJECTED_CITY: &str = "Atlantide";

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, Appointment>,
}

impl Store {
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn insert(&self, appointment: Appointment) -> Appointment {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        let saved = appointment.with_id(id);
        inner.records.insert(id, saved.clone());
        saved
    }
}

/// Start the server on an ephemeral port; returns its base URL.
pub async fn spawn() -> (String, Store) {
    let store = Store::default();

    let app = Router::new()
        .route("/appointments", get(list).post(create))
        .route(
            "/appointments/{id}",
            get(get_one).put(update).delete(delete_one),
        )
        .route("/garbage/appointments", get(|| async { "this is not json" }))
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn rejected(appointment: &Appointment) -> Option<Response> {
    (appointment.city == REJECTED_CITY).then(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": format!("no service in {}", REJECTED_CITY) })),
        )
            .into_response()
    })
}

async fn list(State(store): State<Store>) -> Json<Vec<Appointment>> {
    let inner = store.inner.lock().unwrap();
    Json(inner.records.values().cloned().collect())
}

async fn get_one(State(store): State<Store>, Path(id): Path<u64>) -> Response {
    let inner = store.inner.lock().unwrap();
    match inner.records.get(&id) {
        Some(appointment) => Json(appointment.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(State(store): State<Store>, Json(appointment): Json<Appointment>) -> Response {
    if let Some(resp) = rejected(&appointment) {
        return resp;
    }
    if appointment.id.is_some() {
        return (StatusCode::BAD_REQUEST, "id is assigned by the server").into_response();
    }
    (StatusCode::CREATED, Json(store.insert(appointment))).into_response()
}

async fn update(
    State(store): State<Store>,
    Path(id): Path<u64>,
    Json(appointment): Json<Appointment>,
) -> Response {
    if let Some(resp) = rejected(&appointment) {
        return resp;
    }
    let mut inner = store.inner.lock().unwrap();
    match inner.records.get_mut(&id) {
        Some(existing) => {
            *existing = appointment.with_id(id);
            Json(existing.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_one(State(store): State<Store>, Path(id): Path<u64>) -> StatusCode {
    let mut inner = store.inner.lock().unwrap();
    match inner.records.remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}
