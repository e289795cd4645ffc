//! Local stand-in for the MyDHL `shipments` endpoint.
//!
//! Accepts the same JSON body as the carrier, rejects requests missing
//! mandatory fields with a problem document, and confirms the rest with a
//! carrier-shaped response. Tracking numbers are sequential per app instance.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};
use uuid::Uuid;

pub const MESSAGE_REFERENCE_HEADER: &str = "message-reference";
const FIRST_TRACKING_NUMBER: u64 = 1_234_567_890;
/// Base64 of a minimal PDF header, stands in for the label.
pub const LABEL_CONTENT: &str = "JVBERi0xLjQK";

#[derive(Debug, Serialize, Deserialize)]
pub struct Problem {
    pub instance: String,
    pub detail: String,
    pub title: String,
    pub message: String,
    pub status: String,
}

#[derive(Clone)]
pub struct AppState {
    next_tracking_number: Arc<AtomicU64>,
}

pub fn app() -> Router {
    let state = AppState {
        next_tracking_number: Arc::new(AtomicU64::new(FIRST_TRACKING_NUMBER)),
    };
    Router::new()
        .route("/shipments", post(create_shipment))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Mandatory body fields as JSON pointers.
const MANDATORY: [&str; 6] = [
    "/plannedShippingDateAndTime",
    "/productCode",
    "/accounts/0/number",
    "/customerDetails/shipperDetails/postalAddress",
    "/customerDetails/receiverDetails/postalAddress",
    "/content/packages/0/weight",
];

fn missing_fields(body: &Value) -> Vec<&'static str> {
    MANDATORY
        .iter()
        .copied()
        .filter(|pointer| body.pointer(pointer).is_none())
        .collect()
}

fn problem(detail: String) -> Response {
    let body = Problem {
        instance: "/expressapi/shipments".to_string(),
        detail,
        title: "Bad request".to_string(),
        message: "Bad request".to_string(),
        status: "400".to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn create_shipment(State(state): State<AppState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let reference = headers
        .get(MESSAGE_REFERENCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let missing = missing_fields(&body);
    if !missing.is_empty() {
        warn!(%reference, ?missing, "rejecting shipment");
        return problem(format!("Missing mandatory parameter: {}", missing.join(", ")));
    }

    let tracking_number = state.next_tracking_number.fetch_add(1, Ordering::SeqCst).to_string();
    let pickup_requested = body.pointer("/pickup/isRequested").and_then(Value::as_str) == Some("true");
    let package_count = body
        .pointer("/content/packages")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    info!(%reference, %tracking_number, pickup_requested, package_count, "shipment created");

    let base = format!("/shipments/{tracking_number}");
    let packages: Vec<Value> = (1..=package_count)
        .map(|n| {
            let piece = format!("JD0146000{tracking_number}{n:02}");
            json!({
                "referenceNumber": n,
                "trackingNumber": piece,
                "trackingUrl": format!("{base}/tracking?pieceTrackingNumber={piece}"),
            })
        })
        .collect();

    let mut response = json!({
        "url": "/shipments",
        "shipmentTrackingNumber": tracking_number,
        "trackingUrl": format!("{base}/tracking"),
        "packages": packages,
        "documents": [{"imageFormat": "PDF", "content": LABEL_CONTENT, "typeCode": "label"}],
    });
    if pickup_requested {
        response["cancelPickupUrl"] = json!(format!("{base}/cancel-pickup"));
        response["dispatchConfirmationNumber"] = json!(format!("PRG{tracking_number}"));
    } else {
        response["warnings"] = json!(["No pickup was requested for this shipment"]);
    }
    if body.get("getRateEstimates").and_then(Value::as_str) == Some("true") {
        response["shipmentCharges"] = json!([
            {"currencyType": "BILLC", "priceCurrency": "EUR", "price": 42.5}
        ]);
    }

    let mut http_response = (StatusCode::CREATED, Json(response)).into_response();
    if let Ok(value) = HeaderValue::from_str(&reference) {
        http_response.headers_mut().insert(MESSAGE_REFERENCE_HEADER, value);
    }
    http_response
}
