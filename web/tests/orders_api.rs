//! Order subsystem endpoints over the demo data set.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::{error_message, server};
use serde_json::{json, Value};

#[tokio::test]
async fn test_get_order_carries_status_codes() {
    let server = server();

    let order: Value = server.get("/api/v1/orders/2").await.json();
    assert_eq!(order["customer_id"], 2);
    assert_eq!(order["order_status"], "Complete");
    assert_eq!(order["order_status_id"], 30);
    assert_eq!(order["payment_status"], "Paid");
    assert_eq!(order["payment_status_id"], 30);
    assert_eq!(order["order_total"], 8_098);

    let items: Vec<Value> = server.get("/api/v1/orders/2/items").await.json();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_order_lookups() {
    let server = server();

    let order: Value = server.get("/api/v1/orders/1").await.json();
    let guid = order["order_guid"].as_str().unwrap();

    let by_guid: Value = server
        .get(&format!("/api/v1/orders/by-guid/{guid}"))
        .await
        .json();
    assert_eq!(by_guid["id"], 1);

    let by_number: Value = server.get("/api/v1/orders/by-custom-number/2").await.json();
    assert_eq!(by_number["id"], 2);

    let bad_guid = server.get("/api/v1/orders/by-guid/not-a-guid").await;
    bad_guid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&bad_guid.json()),
        "'not-a-guid' is not a valid GUID"
    );

    server
        .get("/api/v1/orders/by-guid/6f1c9e2a-8d55-4a3b-9a36-0f8f2d4c1b77")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let missing = server.get("/api/v1/orders/42").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_message(&missing.json()), "Order with id 42 not found");
}

#[tokio::test]
async fn test_search_orders_by_status() {
    let server = server();

    let complete: Value = server
        .get("/api/v1/orders")
        .add_query_param("order_status_ids", "30")
        .await
        .json();
    assert_eq!(complete["total_count"], 1);
    assert_eq!(complete["items"][0]["id"], 2);

    let both: Value = server
        .get("/api/v1/orders")
        .add_query_param("order_status_ids", "10;30")
        .await
        .json();
    assert_eq!(both["total_count"], 2);

    let unknown = server
        .get("/api/v1/orders")
        .add_query_param("payment_status_ids", "99")
        .await;
    unknown.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&unknown.json()),
        "unknown payment status code 99"
    );
}

#[tokio::test]
async fn test_cancel_order() {
    let server = server();

    let refused = server.post("/api/v1/orders/2/cancel").await;
    refused.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&refused.json()), "Order 2 cannot be cancelled");

    let cancelled = server
        .post("/api/v1/orders/1/cancel")
        .add_query_param("notify_customer", true)
        .await;
    cancelled.assert_status_ok();
    let body: Value = cancelled.json();
    assert_eq!(body["order_status"], "Cancelled");
    assert_eq!(body["order_status_id"], 40);

    let notes: Vec<Value> = server.get("/api/v1/orders/1/notes").await.json();
    assert!(notes
        .iter()
        .any(|n| n["note"] == "Order has been cancelled. Customer notified"));
}

#[tokio::test]
async fn test_mark_order_as_paid() {
    let server = server();

    let paid: Value = server.post("/api/v1/orders/1/mark-as-paid").await.json();
    assert_eq!(paid["payment_status"], "Paid");
    assert_eq!(paid["order_status"], "Processing");
    assert!(!paid["paid_date_utc"].is_null());

    server
        .post("/api/v1/orders/1/mark-as-paid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_place_order_from_cart() {
    let server = server();

    let invalid = server
        .post("/api/v1/orders")
        .json(&json!({"customer_id": 0}))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);

    let placed = server
        .post("/api/v1/orders")
        .json(&json!({"customer_id": 1, "store_id": 1}))
        .await;
    placed.assert_status(StatusCode::CREATED);
    let order: Value = placed.json();
    assert_eq!(order["customer_id"], 1);
    assert_eq!(order["order_total"], 3_998);
    assert_eq!(order["order_status"], "Pending");

    let cart: Value = server.get("/api/v1/shopping-carts/1").await.json();
    assert!(cart["items"].as_array().unwrap().is_empty());

    let again = server
        .post("/api/v1/orders")
        .json(&json!({"customer_id": 1}))
        .await;
    again.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&again.json()), "Cart is empty");
}

#[tokio::test]
async fn test_reorder_reports_cart_warnings() {
    let server = server();

    let first: Value = server.post("/api/v1/orders/1/reorder").await.json();
    assert!(first["warnings"].as_array().unwrap().is_empty());

    let cart: Value = server.get("/api/v1/shopping-carts/1").await.json();
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_order() {
    let server = server();

    server
        .delete("/api/v1/orders/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/v1/orders/42")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_order_removes_its_shipments() {
    let server = server();

    // Shipment 2 belongs to order 1
    server.get("/api/v1/shipments/2").await.assert_status_ok();
    server
        .delete("/api/v1/orders/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/v1/shipments/2")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post("/api/v1/shipments/2/ship")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let shipments: Vec<Value> = server.get("/api/v1/orders/1/shipments").await.json();
    assert!(shipments.is_empty());
    let items: Vec<Value> = server.get("/api/v1/orders/1/items").await.json();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_order_notes() {
    let server = server();

    let blank = server
        .post("/api/v1/orders/1/notes")
        .json(&json!({"note": " "}))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&blank.json()), "note is required");

    let created = server
        .post("/api/v1/orders/1/notes")
        .json(&json!({"note": "Called the customer", "display_to_customer": false}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let note: Value = created.json();
    assert_eq!(note["order_id"], 1);

    let id = note["id"].as_i64().unwrap();
    server
        .delete(&format!("/api/v1/order-notes/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/api/v1/order-notes/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ship_then_deliver() {
    let server = server();

    let early = server.post("/api/v1/shipments/2/deliver").await;
    early.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&early.json()), "This shipment is not shipped yet");

    let shipped: Value = server.post("/api/v1/shipments/2/ship").await.json();
    assert!(!shipped["shipped_date_utc"].is_null());
    assert!(shipped["delivery_date_utc"].is_null());

    let twice = server.post("/api/v1/shipments/2/ship").await;
    twice.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&twice.json()), "This shipment is already shipped");

    let delivered: Value = server
        .post("/api/v1/shipments/2/deliver")
        .add_query_param("notify_customer", true)
        .await
        .json();
    assert!(!delivered["delivery_date_utc"].is_null());

    let order: Value = server.get("/api/v1/orders/1").await.json();
    assert_eq!(order["shipping_status"], "Delivered");
}

#[tokio::test]
async fn test_shipment_lookups() {
    let server = server();

    let shipments: Vec<Value> = server.get("/api/v1/orders/2/shipments").await.json();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0]["tracking_number"], "1Z999AA10123456784");

    let items: Vec<Value> = server.get("/api/v1/shipments/1/items").await.json();
    assert_eq!(items[0]["quantity"], 2);

    server
        .get("/api/v1/shipments/9")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gift_cards() {
    let server = server();

    let remaining: Value = server.get("/api/v1/gift-cards/1/remaining-amount").await.json();
    assert_eq!(remaining["remaining_amount"], 3_500);

    let usage: Vec<Value> = server.get("/api/v1/gift-cards/1/usage-history").await.json();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0]["used_value"], 1_500);

    let by_coupon: Value = server.get("/api/v1/gift-cards/by-coupon/gift-0001").await.json();
    assert_eq!(by_coupon["id"], 1);

    let by_order: Value = server
        .get("/api/v1/gift-cards")
        .add_query_param("purchased_with_order_id", 2)
        .await
        .json();
    assert_eq!(by_order["total_count"], 1);

    let negative = server
        .post("/api/v1/gift-cards")
        .json(&json!({"gift_card_coupon_code": "GIFT-0002", "amount": -5}))
        .await;
    negative.assert_status(StatusCode::BAD_REQUEST);

    let duplicate = server
        .post("/api/v1/gift-cards")
        .json(&json!({"gift_card_coupon_code": "gift-0001", "amount": 100}))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);

    server
        .post("/api/v1/gift-cards")
        .json(&json!({"gift_card_coupon_code": "GIFT-0002", "amount": 2_500}))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_gift_card_update_rejects_taken_code() {
    let server = server();

    let created: Value = server
        .post("/api/v1/gift-cards")
        .json(&json!({"gift_card_coupon_code": "GIFT-0002", "amount": 2_500}))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let clash = server
        .put(&format!("/api/v1/gift-cards/{id}"))
        .json(&json!({"gift_card_coupon_code": "gift-0001", "amount": 2_500}))
        .await;
    clash.assert_status(StatusCode::CONFLICT);

    let found: Value = server.get("/api/v1/gift-cards/by-coupon/gift-0001").await.json();
    assert_eq!(found["id"], 1);
}

#[tokio::test]
async fn test_return_request_status_change() {
    let server = server();

    let pending: Value = server
        .get("/api/v1/return-requests")
        .add_query_param("status_id", 0)
        .await
        .json();
    assert_eq!(pending["total_count"], 1);

    let unknown = server
        .put("/api/v1/return-requests/1/status")
        .json(&json!({"status_id": 15}))
        .await;
    unknown.assert_status(StatusCode::BAD_REQUEST);

    let too_many = server
        .put("/api/v1/return-requests/1/status")
        .json(&json!({"status_id": 10, "returned_quantity": 2}))
        .await;
    too_many.assert_status(StatusCode::BAD_REQUEST);

    let received: Value = server
        .put("/api/v1/return-requests/1/status")
        .json(&json!({"status_id": 10, "returned_quantity": 1, "staff_notes": "Box received"}))
        .await
        .json();
    assert_eq!(received["return_request_status"], "Received");
    assert_eq!(received["return_request_status_id"], 10);
    assert_eq!(received["returned_quantity"], 1);
    assert_eq!(received["staff_notes"], "Box received");
}

#[tokio::test]
async fn test_shopping_cart_flow() {
    let server = server();

    let cart: Value = server.get("/api/v1/shopping-carts/1").await.json();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["cart_type"], "ShoppingCart");

    let over_stock: Value = server
        .post("/api/v1/shopping-carts/1/items")
        .json(&json!({"product_id": 3, "quantity": 5}))
        .await
        .json();
    assert_eq!(over_stock["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(over_stock["items"][0]["quantity"], 2);

    let added: Value = server
        .post("/api/v1/shopping-carts/1/items")
        .json(&json!({"product_id": 1, "quantity": 1}))
        .await
        .json();
    assert!(added["warnings"].as_array().unwrap().is_empty());
    assert_eq!(added["items"].as_array().unwrap().len(), 2);

    let updated: Value = server
        .put("/api/v1/shopping-cart-items/1")
        .json(&json!({"quantity": 3}))
        .await
        .json();
    assert!(updated["warnings"].as_array().unwrap().is_empty());

    server
        .put("/api/v1/shopping-cart-items/1")
        .json(&json!({"quantity": 0}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .delete("/api/v1/shopping-cart-items/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/v1/shopping-carts/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let empty: Value = server.get("/api/v1/shopping-carts/1").await.json();
    assert!(empty["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_wishlist_is_separate() {
    let server = server();

    let wishlist: Value = server
        .post("/api/v1/shopping-carts/3/items")
        .json(&json!({"product_id": 2, "quantity": 1, "cart_type": "Wishlist"}))
        .await
        .json();
    assert_eq!(wishlist["cart_type"], "Wishlist");
    assert_eq!(wishlist["items"].as_array().unwrap().len(), 1);

    let cart: Value = server.get("/api/v1/shopping-carts/3").await.json();
    assert!(cart["items"].as_array().unwrap().is_empty());

    let listed: Value = server
        .get("/api/v1/shopping-carts/3")
        .add_query_param("cart_type", "Wishlist")
        .await
        .json();
    assert_eq!(listed["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cart_quantity_overflow_is_a_warning() {
    let server = server();
    let add_max = || {
        server
            .post("/api/v1/shopping-carts/77/items")
            .json(&json!({"product_id": 1, "quantity": i32::MAX, "cart_type": "Wishlist"}))
    };

    let first: Value = add_max().await.json();
    assert!(first["warnings"].as_array().unwrap().is_empty());

    let second = add_max().await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], i32::MAX);

    // The store keeps serving requests
    server.get("/api/v1/categories/1").await.assert_status_ok();
}

#[tokio::test]
async fn test_place_order_with_overflowing_total() {
    let server = server();

    let product: Value = server
        .post("/api/v1/products")
        .json(&json!({"name": "Private island", "price": i64::MAX - 1, "published": true}))
        .await
        .json();
    let product_id = product["id"].as_i64().unwrap();
    server
        .post("/api/v1/shopping-carts/9/items")
        .json(&json!({"product_id": product_id, "quantity": 2}))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/orders")
        .json(&json!({"customer_id": 9}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&response.json()),
        format!("Line total for product {product_id} is too large")
    );

    server.get("/api/v1/orders/1").await.assert_status_ok();
}
