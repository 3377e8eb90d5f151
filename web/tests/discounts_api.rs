//! Discount endpoints over the demo data set.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::{error_message, server};
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_discounts_hides_expired() {
    let server = server();

    let visible: Vec<Value> = server.get("/api/v1/discounts").await.json();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["coupon_code"], "SAVE10");

    let all: Vec<Value> = server
        .get("/api/v1/discounts")
        .add_query_param("show_hidden", true)
        .await
        .json();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_discount_by_coupon() {
    let server = server();

    let found: Value = server.get("/api/v1/discounts/by-coupon/save10").await.json();
    assert_eq!(found["id"], 1);
    assert_eq!(found["requires_coupon_code"], true);

    let missing = server.get("/api/v1/discounts/by-coupon/NOPE").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        error_message(&missing.json()),
        "Discount with coupon code NOPE not found"
    );
}

#[tokio::test]
async fn test_requirements_and_usage_history() {
    let server = server();

    let all: Vec<Value> = server.get("/api/v1/discounts/1/requirements").await.json();
    assert_eq!(all.len(), 2);

    let top: Vec<Value> = server
        .get("/api/v1/discounts/1/requirements")
        .add_query_param("top_level_only", true)
        .await
        .json();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0]["is_group"], true);

    let usage: Value = server.get("/api/v1/discounts/1/usage-history").await.json();
    assert_eq!(usage["total_count"], 1);
    assert_eq!(usage["items"][0]["order_id"], 2);

    server
        .get("/api/v1/discounts/99/usage-history")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validate_discount() {
    let server = server();

    let valid: Value = server
        .post("/api/v1/discounts/1/validate")
        .add_query_param("customer_id", 1)
        .add_query_param("coupon_codes", "OTHER; save10")
        .await
        .json();
    assert_eq!(valid["is_valid"], true);
    assert_eq!(valid["customer_id"], 1);
    assert!(valid["errors"].as_array().unwrap().is_empty());

    let no_coupon: Value = server
        .post("/api/v1/discounts/1/validate")
        .add_query_param("customer_id", 1)
        .await
        .json();
    assert_eq!(no_coupon["is_valid"], false);

    let used_up: Value = server
        .post("/api/v1/discounts/1/validate")
        .add_query_param("customer_id", 2)
        .add_query_param("coupon_codes", "SAVE10")
        .await
        .json();
    assert_eq!(used_up["is_valid"], false);
    assert_eq!(
        used_up["errors"][0],
        "The discount usage limit has been reached"
    );

    let expired: Value = server
        .post("/api/v1/discounts/2/validate")
        .add_query_param("customer_id", 1)
        .await
        .json();
    assert_eq!(expired["errors"][0], "Discount has expired");
}

#[tokio::test]
async fn test_validate_discount_requires_customer() {
    let server = server();

    let response = server
        .post("/api/v1/discounts/1/validate")
        .add_query_param("customer_id", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&response.json()),
        "customer_id must be greater than zero"
    );
}

#[tokio::test]
async fn test_create_discount_validation() {
    let server = server();

    let missing_code = server
        .post("/api/v1/discounts")
        .json(&json!({"name": "Spring sale", "requires_coupon_code": true}))
        .await;
    missing_code.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&missing_code.json()),
        "coupon_code is required when requires_coupon_code is set"
    );

    let created = server
        .post("/api/v1/discounts")
        .json(&json!({
            "name": "Spring sale",
            "requires_coupon_code": true,
            "coupon_code": "SPRING",
            "use_percentage": true,
            "discount_percentage": 15.0,
            "is_active": true
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let fetched: Value = server.get(&format!("/api/v1/discounts/{id}")).await.json();
    assert_eq!(fetched["coupon_code"], "SPRING");

    server
        .delete(&format!("/api/v1/discounts/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
