//! gateway.rs
//!
//! The public gateway: an outward-facing HTTP surface that translates the
//! public endpoint shapes (`/purchase-ticket`, `/get-ticket-receipt`, ...)
//! into calls against the booking API. It holds no booking state of its own;
//! upstream status codes and JSON bodies pass through untouched.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::config::GatewayConfig;

/// Thin reqwest client for the booking API. Connectivity failures surface as
/// 502 to the gateway caller.
#[derive(Clone)]
pub struct BookingApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookingApiClient {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn purchase(&self, body: Value) -> Response {
        let result = self
            .http
            .post(format!("{}/api/tickets", self.base_url))
            .json(&body)
            .send()
            .await;
        relay(result).await
    }

    pub async fn receipt(&self, email: &str) -> Response {
        let result = self
            .http
            .get(format!("{}/api/tickets/receipt", self.base_url))
            .query(&[("email", email)])
            .send()
            .await;
        relay(result).await
    }

    pub async fn section(&self, section: &str) -> Response {
        let result = self
            .http
            .get(format!("{}/api/tickets/section", self.base_url))
            .query(&[("section", section)])
            .send()
            .await;
        relay(result).await
    }

    pub async fn remove(&self, email: &str) -> Response {
        let result = self
            .http
            .delete(format!("{}/api/tickets", self.base_url))
            .query(&[("email", email)])
            .send()
            .await;
        relay(result).await
    }

    pub async fn modify_seat(&self, email: &str, new_seat: &str) -> Response {
        let result = self
            .http
            .patch(format!("{}/api/tickets/seat", self.base_url))
            .json(&json!({ "email": email, "new_seat": new_seat }))
            .send()
            .await;
        relay(result).await
    }
}

// Pass the upstream status and JSON body through as-is.
async fn relay(result: Result<reqwest::Response, reqwest::Error>) -> Response {
    match result {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            match upstream.json::<Value>().await {
                Ok(body) => (status, Json(body)).into_response(),
                Err(e) => {
                    error!("booking api returned an unreadable body: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        Json(json!({ "success": false, "error": "invalid upstream response" })),
                    )
                        .into_response()
                }
            }
        }
        Err(e) => {
            error!("booking api unreachable: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "success": false, "error": "booking api unreachable" })),
            )
                .into_response()
        }
    }
}

pub fn routes(client: BookingApiClient) -> Router {
    Router::new()
        .route("/purchase-ticket", post(purchase_ticket))
        .route("/get-ticket-receipt", get(get_ticket_receipt))
        .route("/view-users-in-section", get(view_users_in_section))
        .route("/remove-user", post(remove_user))
        .route("/modify-seat", post(modify_seat))
        .with_state(client)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn purchase_ticket(State(client): State<BookingApiClient>, Json(body): Json<Value>) -> Response {
    client.purchase(body).await
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

async fn get_ticket_receipt(
    State(client): State<BookingApiClient>,
    Query(q): Query<EmailQuery>,
) -> Response {
    client.receipt(&q.email).await
}

#[derive(Debug, Deserialize)]
struct SectionQuery {
    section: String,
}

async fn view_users_in_section(
    State(client): State<BookingApiClient>,
    Query(q): Query<SectionQuery>,
) -> Response {
    // The gateway rejects unknown sections before ever forwarding.
    if q.section != "A" && q.section != "B" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Section must be either A or B" })),
        )
            .into_response();
    }
    client.section(&q.section).await
}

#[derive(Debug, Deserialize)]
struct RemoveUserRequest {
    email: String,
}

async fn remove_user(
    State(client): State<BookingApiClient>,
    Json(req): Json<RemoveUserRequest>,
) -> Response {
    client.remove(&req.email).await
}

#[derive(Debug, Deserialize)]
struct ModifySeatRequest {
    email: String,
    new_seat: String,
}

async fn modify_seat(
    State(client): State<BookingApiClient>,
    Json(req): Json<ModifySeatRequest>,
) -> Response {
    client.modify_seat(&req.email, &req.new_seat).await
}
