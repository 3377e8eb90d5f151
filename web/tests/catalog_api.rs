//! Catalog endpoints over the demo data set.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::StatusCode;
use common::{error_message, server};
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_endpoints() {
    let server = server();

    let live = server.get("/health").await;
    live.assert_status_ok();
    assert_eq!(live.text(), "ok");

    let ready: Value = server.get("/health/ready").await.json();
    assert_eq!(ready["status"], "healthy");
    assert_eq!(ready["services"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let server = server();

    let response = server.get("/api/v1/categories/1").await;
    assert!(response.headers().contains_key("x-correlation-id"));
}

#[tokio::test]
async fn test_get_category_maps_entity() {
    let server = server();

    let response = server.get("/api/v1/categories/2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Computers");
    assert_eq!(body["parent_category_id"], 1);
    assert_eq!(body["published"], true);
}

#[tokio::test]
async fn test_non_positive_and_malformed_ids_are_rejected() {
    let server = server();

    for path in [
        "/api/v1/categories/0",
        "/api/v1/products/-3",
        "/api/v1/orders/0",
        "/api/v1/gift-cards/0/usage-history",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "BAD_REQUEST", "{path}");
        assert_eq!(error_message(&body), "id must be greater than zero", "{path}");
    }

    let response = server.get("/api/v1/manufacturers/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "'abc' is not a valid id");
}

#[tokio::test]
async fn test_unknown_ids_return_not_found() {
    let server = server();

    let cases = [
        ("/api/v1/categories/999", "Category with id 999 not found"),
        ("/api/v1/products/999", "Product with id 999 not found"),
        ("/api/v1/manufacturers/999", "Manufacturer with id 999 not found"),
        ("/api/v1/product-attributes/999", "Product attribute with id 999 not found"),
    ];
    for (path, message) in cases {
        let response = server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(error_message(&body), message);
    }
}

#[tokio::test]
async fn test_list_categories_paging() {
    let server = server();

    let page: Value = server
        .get("/api/v1/categories")
        .add_query_param("page_index", 0)
        .add_query_param("page_size", 3)
        .await
        .json();

    assert_eq!(page["items"].as_array().unwrap().len(), 3);
    assert_eq!(page["total_count"], 4);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_previous_page"], false);
    assert_eq!(page["has_next_page"], true);

    let hidden: Value = server
        .get("/api/v1/categories")
        .add_query_param("show_hidden", true)
        .await
        .json();
    assert_eq!(hidden["total_count"], 5);
}

#[tokio::test]
async fn test_categories_by_ids() {
    let server = server();

    let found: Vec<Value> = server
        .get("/api/v1/categories/by-ids")
        .add_query_param("ids", " 3; 1;;3 ")
        .await
        .json();
    assert_eq!(found.len(), 2);

    let response = server
        .get("/api/v1/categories/by-ids")
        .add_query_param("ids", "1;x")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response.json()), "'x' is not a valid id");
}

#[tokio::test]
async fn test_breadcrumb_starts_at_root() {
    let server = server();

    let crumbs: Vec<Value> = server.get("/api/v1/categories/3/breadcrumb").await.json();
    let names: Vec<&str> = crumbs.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Electronics", "Computers", "Notebooks"]);
}

#[tokio::test]
async fn test_create_update_delete_category() {
    let server = server();

    let blank = server
        .post("/api/v1/categories")
        .json(&json!({"name": "  "}))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&blank.json()), "name is required");

    let created = server
        .post("/api/v1/categories")
        .json(&json!({"name": "Books", "published": true}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let updated: Value = server
        .put(&format!("/api/v1/categories/{id}"))
        .json(&json!({"name": "Used books", "published": true, "parent_category_id": 4}))
        .await
        .json();
    assert_eq!(updated["name"], "Used books");
    assert_eq!(updated["parent_category_id"], 4);

    server
        .delete(&format!("/api/v1/categories/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/api/v1/categories/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_category_rejects_bad_parents() {
    let server = server();
    let put_parent = |id: i32, parent: i32| {
        server
            .put(&format!("/api/v1/categories/{id}"))
            .json(&json!({"name": "Renamed", "published": true, "parent_category_id": parent}))
    };

    let negative = put_parent(2, -1).await;
    negative.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&negative.json()), "parent_category_id must not be negative");

    let own = put_parent(2, 2).await;
    own.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&own.json()), "A category cannot be its own parent");

    // Notebooks (3) sits under Computers (2) under Electronics (1)
    let cycle = put_parent(1, 3).await;
    cycle.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&cycle.json()),
        "Category 3 is a descendant of category 1 and cannot be its parent"
    );

    let crumbs: Vec<Value> = server.get("/api/v1/categories/3/breadcrumb").await.json();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[0]["parent_category_id"], 0);
}

#[tokio::test]
async fn test_update_missing_category_is_not_found() {
    let server = server();

    server
        .put("/api/v1/categories/999")
        .json(&json!({"name": "Ghost"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/api/v1/categories/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() {
    let server = server();

    let response = server
        .post("/api/v1/categories")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_product_lookups() {
    let server = server();

    let by_sku: Value = server.get("/api/v1/products/by-sku/mba-13").await.json();
    assert_eq!(by_sku["id"], 1);
    assert_eq!(by_sku["price"], 119_900);

    let missing = server.get("/api/v1/products/by-sku/NOPE").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_message(&missing.json()), "Product with sku NOPE not found");

    let mappings: Vec<Value> = server.get("/api/v1/products/1/attribute-mappings").await.json();
    assert_eq!(mappings.len(), 2);

    let tiers: Vec<Value> = server.get("/api/v1/products/3/tier-prices").await.json();
    assert_eq!(tiers[0]["price"], 1_499);
}

#[tokio::test]
async fn test_search_products_by_category() {
    let server = server();

    let page: Value = server
        .get("/api/v1/products")
        .add_query_param("category_ids", "3")
        .await
        .json();
    assert_eq!(page["total_count"], 2);

    server
        .get("/api/v1/products")
        .add_query_param("category_ids", "3;zero")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_low_stock_products() {
    let server = server();

    let page: Value = server.get("/api/v1/products/low-stock").await.json();
    let ids: Vec<i64> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [3]);
}

#[tokio::test]
async fn test_product_price_uses_tier_prices() {
    let server = server();

    let single: Value = server.get("/api/v1/products/3/price").await.json();
    assert_eq!(single["quantity"], 1);
    assert_eq!(single["final_price"], 1_999);

    let bulk: Value = server
        .get("/api/v1/products/3/price")
        .add_query_param("quantity", 10)
        .add_query_param("customer_id", 1)
        .await
        .json();
    assert_eq!(bulk["final_price"], 1_499);
    assert_eq!(bulk["customer_id"], 1);

    server
        .get("/api/v1/products/3/price")
        .add_query_param("quantity", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_adjust_inventory() {
    let server = server();

    let zero = server
        .post("/api/v1/products/3/inventory")
        .json(&json!({"quantity_delta": 0}))
        .await;
    zero.assert_status(StatusCode::BAD_REQUEST);

    let adjusted = server
        .post("/api/v1/products/3/inventory")
        .json(&json!({"quantity_delta": 10, "message": "Restock"}))
        .await;
    adjusted.assert_status_ok();
    assert_eq!(adjusted.json::<Value>()["stock_quantity"], 13);
}

#[tokio::test]
async fn test_create_product_validates_price() {
    let server = server();

    server
        .post("/api/v1/products")
        .json(&json!({"name": "Broken", "price": -1}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let created = server
        .post("/api/v1/products")
        .json(&json!({"name": "Mouse", "sku": "MS-1", "price": 2_500, "published": true}))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(created.json::<Value>()["price"], 2_500);
}

#[tokio::test]
async fn test_update_product_rejects_taken_sku() {
    let server = server();

    let clash = server
        .put("/api/v1/products/3")
        .json(&json!({"name": "USB-C Cable", "sku": "mba-13", "price": 1_999, "published": true}))
        .await;
    clash.assert_status(StatusCode::CONFLICT);

    let owner: Value = server.get("/api/v1/products/by-sku/MBA-13").await.json();
    assert_eq!(owner["id"], 1);

    server
        .put("/api/v1/products/3")
        .json(&json!({"name": "USB-C Cable 2m", "sku": "CBL-USBC", "price": 1_999, "published": true}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_manufacturer_products() {
    let server = server();

    let page: Value = server.get("/api/v1/manufacturers/2/products").await.json();
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["product_id"], 2);
}
