use reqwest::StatusCode;
use serde_json::{json, Value};

use seatbook::config::{AppConfig, Config, GatewayConfig, PricingConfig, SectionConfig};
use seatbook::gateway::{self, BookingApiClient};
use seatbook::{app, AppState};

fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "seatbook=debug".to_string(),
        },
        sections: SectionConfig {
            capacity_a: 5,
            capacity_b: 10,
        },
        pricing: PricingConfig {
            band_min: 100,
            band_split: 1000,
        },
        gateway: GatewayConfig {
            port: 0,
            api_url: "http://localhost:8000".to_string(),
        },
    }
}

// Spawn the real router on an ephemeral port and return its base url.
async fn spawn_api() -> String {
    let state = AppState::new(test_config());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state).into_make_service())
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

fn purchase_body(email: &str, price: u64) -> Value {
    json!({
        "first_name": "Bob",
        "last_name": "Builder",
        "email": email,
        "price_paid": price,
        "origin": "London",
        "destination": "Paris"
    })
}

#[tokio::test]
async fn purchase_and_receipt_round_trip() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/tickets"))
        .json(&purchase_body("bob@x.com", 1500))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["seat"], "A_5");
    assert_eq!(receipt["origin"], "London");
    assert_eq!(receipt["destination"], "Paris");
    assert_eq!(receipt["price_paid"], 1500);

    let resp = client
        .get(format!("{base}/api/tickets/receipt"))
        .query(&[("email", "bob@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, receipt);
}

#[tokio::test]
async fn duplicate_purchase_is_a_conflict() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/tickets"))
        .json(&purchase_body("bob@x.com", 1500))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base}/api/tickets"))
        .json(&purchase_body("bob@x.com", 500))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("already holds a ticket"));
}

#[tokio::test]
async fn out_of_band_price_is_a_bad_request() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/tickets"))
        .json(&purchase_body("bob@x.com", 99))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_rejected_before_the_engine() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/tickets"))
        .json(&purchase_body("not-an-email", 1500))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was allocated for the rejected request.
    let resp = client
        .get(format!("{base}/api/tickets"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/tickets/receipt"))
        .query(&[("email", "ghost@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn section_listing_filters_and_validates() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    for (email, price) in [("prem@x.com", 2000), ("std@x.com", 200)] {
        let resp = client
            .post(format!("{base}/api/tickets"))
            .json(&purchase_body(email, price))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{base}/api/tickets/section"))
        .query(&[("section", "A")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["customers"][0]["customer"]["email"], "prem@x.com");

    let resp = client
        .get(format!("{base}/api/tickets/section"))
        .query(&[("section", "C")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn remove_and_modify_flow() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();

    for email in ["bob@x.com", "alice@x.com"] {
        client
            .post(format!("{base}/api/tickets"))
            .json(&purchase_body(email, 1500))
            .send()
            .await
            .unwrap();
    }

    let resp = client
        .delete(format!("{base}/api/tickets"))
        .query(&[("email", "bob@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let resp = client
        .get(format!("{base}/api/tickets/receipt"))
        .query(&[("email", "bob@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .patch(format!("{base}/api/tickets/seat"))
        .json(&json!({ "email": "alice@x.com", "new_seat": "B_7" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base}/api/tickets/receipt"))
        .query(&[("email", "alice@x.com")])
        .send()
        .await
        .unwrap();
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["seat"], "B_7");
}

/* ---------- gateway ---------- */

async fn spawn_gateway(api_url: &str) -> String {
    let client = BookingApiClient::from_config(&GatewayConfig {
        port: 0,
        api_url: api_url.to_string(),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, gateway::routes(client).into_make_service())
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn gateway_end_to_end() {
    let api = spawn_api().await;
    let gw = spawn_gateway(&api).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{gw}/purchase-ticket"))
        .json(&purchase_body("bob@x.com", 1500))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["seat"], "A_5");

    let resp = client
        .get(format!("{gw}/get-ticket-receipt"))
        .query(&[("email", "bob@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Unknown sections are rejected at the gateway, before forwarding.
    let resp = client
        .get(format!("{gw}/view-users-in-section"))
        .query(&[("section", "C")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{gw}/view-users-in-section"))
        .query(&[("section", "A")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 1);

    let resp = client
        .post(format!("{gw}/modify-seat"))
        .json(&json!({ "email": "bob@x.com", "new_seat": "B_3" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{gw}/remove-user"))
        .json(&json!({ "email": "bob@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn gateway_maps_unreachable_upstream_to_bad_gateway() {
    // Nothing listens on this port.
    let gw = spawn_gateway("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{gw}/get-ticket-receipt"))
        .query(&[("email", "bob@x.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
