//! Handler tests for the stock domain
//!
//! These drive `handlers::router` over the in-memory repository and check:
//! - Request deserialization, including lenient numbers and patch semantics
//! - The `{ success, data }` and `{ success: false, message, error, code }` envelopes
//! - HTTP status codes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_stock::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seeded_repository() -> InMemoryStockRepository {
    let repo = InMemoryStockRepository::new();
    repo.insert_project(Project {
        project_id: "P1".into(),
        project_name: "Lakeside".into(),
    })
    .await;
    repo.insert_property(Property {
        property_id: "PR1".into(),
        property_name: "Tower A".into(),
        project_id: Some("P1".into()),
    })
    .await;
    repo.insert_broker(Broker {
        broker_id: "B1".into(),
        broker_name: "Acme Realty".into(),
    })
    .await;
    repo
}

async fn app() -> Router {
    handlers::router(StockService::new(seeded_repository().await))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn minimal_stock() -> Value {
    json!({
        "project_id": "P1",
        "property_id": "PR1",
        "property_type": "residential",
        "size": "1200"
    })
}

#[tokio::test]
async fn test_create_stock_returns_201() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/", Some(minimal_stock())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["property_id"], "PR1");
    assert_eq!(body["data"]["hold_till_date"], Value::Null);
    assert!(body["data"]["stock_id"].is_i64());
}

#[tokio::test]
async fn test_create_stock_unknown_property_returns_400() {
    let app = app().await;

    let mut input = minimal_stock();
    input["property_id"] = json!("PR-MISSING");
    let (status, body) = send(&app, "POST", "/", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Property ID PR-MISSING does not exist.");

    let (_, list) = send(&app, "GET", "/", None).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_create_stock_missing_fields_returns_400() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/", Some(json!({"project_id": "P1"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["message"],
        "Required fields missing: property_id, property_type, size"
    );
}

#[tokio::test]
async fn test_create_stock_carries_optional_fields() {
    let app = app().await;

    let mut input = minimal_stock();
    input["size"] = json!(950);
    input["bsp"] = json!(4500000.5);
    input["broker_id"] = json!("B1");
    input["on_hold_status"] = json!(true);
    input["hold_till_date"] = json!("2025-06-30");
    input["hold_remarks"] = json!("token received");
    let (status, body) = send(&app, "POST", "/", Some(input)).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["size"], "950");
    assert_eq!(data["bsp"], 4500000.5);
    assert_eq!(data["broker_id"], "B1");
    assert_eq!(data["on_hold_status"], true);
    assert_eq!(data["hold_till_date"], "2025-06-30T00:00:00Z");
    assert_eq!(data["hold_remarks"], "token received");
}

#[tokio::test]
async fn test_create_stock_falsy_hold_date_is_null() {
    let app = app().await;

    for falsy in [json!(""), json!(false), json!(0), json!(null)] {
        let mut input = minimal_stock();
        input["hold_till_date"] = falsy.clone();
        let (status, body) = send(&app, "POST", "/", Some(input)).await;

        assert_eq!(status, StatusCode::CREATED, "{falsy}");
        assert_eq!(body["data"]["hold_till_date"], Value::Null, "{falsy}");
    }
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{\"project_id\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_update_stock_changes_only_supplied_fields() {
    let app = app().await;

    let mut input = minimal_stock();
    input["remarks"] = json!("corner unit");
    input["broker_id"] = json!("B1");
    let (_, created) = send(&app, "POST", "/", Some(input)).await;
    let stock_id = created["data"]["stock_id"].clone();

    let (status, body) = send(
        &app,
        "PUT",
        "/",
        Some(json!({
            "stock_id": stock_id,
            "size": "1300",
            "broker_id": null
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["size"], "1300");
    assert_eq!(data["broker_id"], Value::Null);
    assert_eq!(data["remarks"], "corner unit");
    assert_eq!(data["property_type"], "residential");
    assert_eq!(data["created_at"], created["data"]["created_at"]);
    assert_ne!(data["updated_at"], created["data"]["updated_at"]);
}

#[tokio::test]
async fn test_update_stock_accepts_string_id() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/", Some(minimal_stock())).await;
    let stock_id = created["data"]["stock_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        "/",
        Some(json!({"stock_id": stock_id.to_string(), "on_hold_status": true})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["on_hold_status"], true);
}

#[tokio::test]
async fn test_update_stock_without_id_returns_400() {
    let app = app().await;

    let (status, body) = send(&app, "PUT", "/", Some(json!({"remarks": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "stock_id is required");
}

#[tokio::test]
async fn test_update_unknown_stock_returns_404() {
    let app = app().await;

    let (status, body) = send(&app, "PUT", "/", Some(json!({"stock_id": 999, "remarks": "x"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Stock 999 not found");
}

#[tokio::test]
async fn test_update_cannot_clear_required_field() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/", Some(minimal_stock())).await;
    let (status, body) = send(
        &app,
        "PUT",
        "/",
        Some(json!({"stock_id": created["data"]["stock_id"], "property_type": null})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Fields cannot be cleared: property_type");
}

#[tokio::test]
async fn test_get_stock_joins_names() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/", Some(minimal_stock())).await;
    let stock_id = created["data"]["stock_id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/{}", stock_id), None).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["stock_id"], stock_id);
    assert_eq!(data["project_name"], "Lakeside");
    assert_eq!(data["property_name"], "Tower A");
    assert_eq!(data["broker_name"], Value::Null);
}

#[tokio::test]
async fn test_get_stock_errors() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "stock_id must be a numeric identifier");

    let (status, body) = send(&app, "GET", "/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_integral_decimal_id_names_the_same_stock() {
    let app = app().await;

    let (_, created) = send(&app, "POST", "/", Some(minimal_stock())).await;
    let stock_id = created["data"]["stock_id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/{}.0", stock_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock_id"], stock_id);

    let (status, body) = send(
        &app,
        "PUT",
        "/",
        Some(json!({"stock_id": format!("{}.0", stock_id), "remarks": "decimal id"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["remarks"], "decimal id");

    let (status, body) = send(&app, "GET", &format!("/{}.5", stock_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "stock_id must be a numeric identifier");
}

#[tokio::test]
async fn test_list_stock_most_recently_updated_first() {
    let app = app().await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, created) = send(&app, "POST", "/", Some(minimal_stock())).await;
        ids.push(created["data"]["stock_id"].as_i64().unwrap());
    }

    send(&app, "PUT", "/", Some(json!({"stock_id": ids[0], "remarks": "touched"}))).await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["stock_id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[0], ids[2], ids[1]]);
    assert_eq!(body["data"][0]["project_name"], "Lakeside");
}
