use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Problem, LABEL_CONTENT, MESSAGE_REFERENCE_HEADER};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, body: &Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(MESSAGE_REFERENCE_HEADER, "d0e7832e-5c98-11ea-bc55-0242ac130003")
        .body(body.to_string())
        .unwrap()
}

fn shipment_body() -> Value {
    json!({
        "plannedShippingDateAndTime": "2024-03-04T14:30:00+01:00",
        "accounts": [{"typeCode": "shipper", "number": "123456789"}],
        "customerDetails": {
            "shipperDetails": {
                "postalAddress": {"postalCode": "10115", "cityName": "Berlin", "countryCode": "DE", "addressLine1": "Main St 1"},
                "contactInformation": {"fullName": "Max", "companyName": "ACME", "phone": "+4930123456"}
            },
            "receiverDetails": {
                "postalAddress": {"postalCode": "SW1A 2AA", "cityName": "London", "countryCode": "GB", "addressLine1": "High St 2"},
                "contactInformation": {"fullName": "Jane", "companyName": "Doe Ltd", "phone": "+44201234567"}
            }
        },
        "content": {"packages": [
            {"weight": 2.5, "dimensions": {"length": 30.0, "width": 20.0, "height": 10.0}},
            {"weight": 1.0, "dimensions": {"length": 10.0, "width": 10.0, "height": 10.0}}
        ]},
        "getRateEstimates": "false",
        "productCode": "P"
    })
}

// --- create ---

#[tokio::test]
async fn create_shipment_returns_201() {
    let resp = app()
        .oneshot(json_request("/shipments", &shipment_body()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(MESSAGE_REFERENCE_HEADER).unwrap().to_str().unwrap(),
        "d0e7832e-5c98-11ea-bc55-0242ac130003"
    );
    let body: Value = body_json(resp).await;
    assert_eq!(body["shipmentTrackingNumber"], "1234567890");
    assert_eq!(body["trackingUrl"], "/shipments/1234567890/tracking");
    assert_eq!(body["packages"].as_array().unwrap().len(), 2);
    assert_eq!(body["documents"][0]["content"], LABEL_CONTENT);
    assert!(body.get("cancelPickupUrl").is_none());
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn tracking_numbers_are_sequential() {
    let app = app();
    let first: Value = body_json(
        app.clone()
            .oneshot(json_request("/shipments", &shipment_body()))
            .await
            .unwrap(),
    )
    .await;
    let second: Value = body_json(
        app.oneshot(json_request("/shipments", &shipment_body()))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["shipmentTrackingNumber"], "1234567890");
    assert_eq!(second["shipmentTrackingNumber"], "1234567891");
}

#[tokio::test]
async fn requested_pickup_returns_dispatch_confirmation() {
    let mut body = shipment_body();
    body["pickup"] = json!({"isRequested": "true", "closeTime": "18:00", "location": "reception"});
    body["getRateEstimates"] = json!("true");
    let resp = app().oneshot(json_request("/shipments", &body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["cancelPickupUrl"], "/shipments/1234567890/cancel-pickup");
    assert_eq!(body["dispatchConfirmationNumber"], "PRG1234567890");
    assert!(body.get("warnings").is_none());
    assert_eq!(body["shipmentCharges"][0]["price"], 42.5);
}

#[tokio::test]
async fn missing_product_code_returns_problem() {
    let mut body = shipment_body();
    body.as_object_mut().unwrap().remove("productCode");
    let resp = app().oneshot(json_request("/shipments", &body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Problem = body_json(resp).await;
    assert_eq!(problem.status, "400");
    assert!(problem.detail.contains("/productCode"));
}

#[tokio::test]
async fn empty_packages_return_problem() {
    let mut body = shipment_body();
    body["content"]["packages"] = json!([]);
    let resp = app().oneshot(json_request("/shipments", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/shipments")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body("{not json".to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_shipments_is_not_allowed() {
    let resp = app()
        .oneshot(Request::builder().uri("/shipments").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
