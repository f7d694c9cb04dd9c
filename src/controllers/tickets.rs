use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::engine::error::EngineError;
use crate::models::Customer;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tickets",
            post(purchase_ticket).get(list_all).delete(remove_customer),
        )
        .route("/tickets/receipt", get(get_receipt))
        .route("/tickets/section", get(list_section))
        .route("/tickets/seat", patch(modify_seat))
}

/* ---------- helpers ---------- */

// Engine errors are part of the contract surface, so each one gets a stable
// status; anything else coming out of a handler is a programming defect.
fn engine_error(err: EngineError) -> (StatusCode, Json<Value>) {
    let status = match err {
        EngineError::DuplicateCustomer(_) | EngineError::NoSeatsAvailable(_) => {
            StatusCode::CONFLICT
        }
        EngineError::InvalidPriceRange(_) | EngineError::InvalidSection(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
    };
    (
        status,
        Json(json!({ "success": false, "error": err.to_string() })),
    )
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

/* ---------- PURCHASE ---------- */

// POST /api/tickets
#[derive(Debug, Deserialize, Validate)]
struct PurchaseRequest {
    first_name: String,
    last_name: String,
    #[validate(email)]
    email: String,
    price_paid: u64,
    origin: String,
    destination: String,
}

async fn purchase_ticket(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": e.to_string() })),
        ));
    }

    let customer = Customer {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };
    let receipt = state
        .engine
        .purchase(customer, req.price_paid, &req.origin, &req.destination)
        .map_err(|e| {
            tracing::debug!("purchase rejected: {e}");
            engine_error(e)
        })?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/* ---------- RECEIPT ---------- */

// GET /api/tickets/receipt?email=
async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Query(q): Query<EmailQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let receipt = state.engine.receipt(&q.email).map_err(engine_error)?;
    Ok((StatusCode::OK, Json(receipt)))
}

/* ---------- SECTION / LIST ---------- */

// GET /api/tickets/section?section=
#[derive(Debug, Deserialize)]
struct SectionQuery {
    section: String,
}

async fn list_section(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SectionQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    // Raw string goes to the engine so it owns the A/B validation.
    let customers = state.engine.list_section(&q.section).map_err(engine_error)?;
    let count = customers.len();
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "customers": customers,
            "count": count
        })),
    ))
}

// GET /api/tickets
async fn list_all(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let customers = state.engine.list_all();
    let count = customers.len();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "customers": customers,
            "count": count
        })),
    )
}

/* ---------- REMOVE / MODIFY ---------- */

// DELETE /api/tickets?email=
async fn remove_customer(
    State(state): State<Arc<AppState>>,
    Query(q): Query<EmailQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    state.engine.remove(&q.email).map_err(engine_error)?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// PATCH /api/tickets/seat
#[derive(Debug, Deserialize)]
struct ModifySeatRequest {
    email: String,
    new_seat: String,
}

async fn modify_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModifySeatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    state
        .engine
        .modify_seat(&req.email, &req.new_seat)
        .map_err(engine_error)?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
