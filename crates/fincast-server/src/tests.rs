//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, NaiveDate, Utc};
use fincast_core::db::Database;
use fincast_core::models::{NewTransaction, TransactionType};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), ServerConfig::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// The 15th of the month `n` months before today (always a valid date)
fn months_ago(n: u32) -> NaiveDate {
    let today = Utc::now().date_naive();
    let mut year = today.year();
    let mut month = today.month() as i32 - n as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 15).unwrap()
}

fn seed_expense(db: &Database, amount: f64, category: &str, date: NaiveDate) {
    db.insert_transaction(&NewTransaction {
        tx_type: TransactionType::Expense,
        amount,
        category: category.to_string(),
        description: None,
        date,
    })
    .unwrap();
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert!(json["uptime_seconds"].is_number());
    assert!(json["version"].is_string());
}

// ========== Transactions ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "type": "expense",
        "amount": 42.5,
        "category": "Food",
        "description": "weekly groceries",
        "date": "2026-03-14"
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["type"], "expense");
    assert_eq!(json["amount"], 42.5);
    // Category is normalized to lowercase
    assert_eq!(json["category"], "food");
    assert_eq!(json["date"], "2026-03-14");

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_transaction_rejects_non_positive_amount() {
    let (app, _db) = setup_test_app();

    for amount in [0.0, -5.0] {
        let body = serde_json::json!({
            "type": "expense",
            "amount": amount,
            "category": "food"
        });
        let response = app
            .clone()
            .oneshot(post_json("/api/transactions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_create_transaction_rejects_unknown_type() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "type": "transfer",
        "amount": 10.0,
        "category": "food"
    });
    let response = app
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transaction type"));
}

#[tokio::test]
async fn test_create_transaction_sanitizes_text() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "type": "expense",
        "amount": 10.0,
        "category": "  Fo<script>od  ",
        "description": "lunch <b>\"special\"</b>"
    });
    let response = app
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category"], "foscriptod");
    assert_eq!(json["description"], "lunch bspecial/b");
}

#[tokio::test]
async fn test_create_transaction_rejects_empty_category() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "type": "expense",
        "amount": 10.0,
        "category": "<>"
    });
    let response = app
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_transactions_filters_by_type() {
    let (app, db) = setup_test_app();

    seed_expense(&db, 10.0, "food", months_ago(0));
    db.insert_transaction(&NewTransaction {
        tx_type: TransactionType::Income,
        amount: 900.0,
        category: "salary".to_string(),
        description: None,
        date: months_ago(0),
    })
    .unwrap();

    let response = app
        .oneshot(get("/api/transactions?type=income"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], "salary");
}

#[tokio::test]
async fn test_delete_transaction() {
    let (app, db) = setup_test_app();
    seed_expense(&db, 10.0, "food", months_ago(0));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Budgets ==========

#[tokio::test]
async fn test_create_and_list_budgets() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/budgets",
            serde_json::json!({"category": "Food", "amount": 300.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category"], "food");
    // Budget type defaults to expense
    assert_eq!(json["type"], "expense");

    let response = app.oneshot(get("/api/budgets")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_budget_rejects_bad_amount() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/budgets",
            serde_json::json!({"category": "food", "amount": -1.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_budget_not_found() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/budgets/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Forecast ==========

#[tokio::test]
async fn test_forecast_without_history() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/forecast")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["prediction"].is_null());
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_forecast_moving_average() {
    let (app, db) = setup_test_app();
    seed_expense(&db, 100.0, "food", months_ago(3));
    seed_expense(&db, 200.0, "food", months_ago(2));
    seed_expense(&db, 300.0, "food", months_ago(1));

    let response = app.oneshot(get("/api/forecast")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["prediction"], 200.0);
    assert_eq!(json["strategy"], "moving-average");
    assert!(json["confidence"].is_number());
}

#[tokio::test]
async fn test_forecast_regression_strategy() {
    let (app, db) = setup_test_app();
    let base = months_ago(1);
    seed_expense(&db, 10.0, "food", base);
    seed_expense(&db, 20.0, "food", base + chrono::Duration::days(1));
    seed_expense(&db, 30.0, "food", base + chrono::Duration::days(2));

    let response = app
        .oneshot(get("/api/forecast?strategy=regression"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["prediction"], 40.0);
    assert_eq!(json["strategy"], "regression");
    assert!(json.get("confidence").is_none());
}

#[tokio::test]
async fn test_forecast_unknown_strategy() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(get("/api/forecast?strategy=prophet"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trends_shape() {
    let (app, db) = setup_test_app();
    let date = months_ago(1);
    seed_expense(&db, 75.0, "food", date);
    db.insert_transaction(&NewTransaction {
        tx_type: TransactionType::Income,
        amount: 1000.0,
        category: "salary".to_string(),
        description: None,
        date,
    })
    .unwrap();

    let response = app.oneshot(get("/api/forecast/trends")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let key = date.format("%Y-%m").to_string();
    assert_eq!(json[&key]["expenses"], 75.0);
    assert_eq!(json[&key]["income"], 1000.0);
}

#[tokio::test]
async fn test_accuracy_report() {
    let (app, db) = setup_test_app();
    seed_expense(&db, 100.0, "food", months_ago(4));
    seed_expense(&db, 200.0, "food", months_ago(3));
    seed_expense(&db, 300.0, "food", months_ago(2));
    seed_expense(&db, 240.0, "food", months_ago(1));

    let response = app.oneshot(get("/api/forecast/accuracy")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_predictions"], 1);
    assert_eq!(json["average_accuracy"], 83);
    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0]["predicted"], 200.0);
    assert_eq!(predictions[0]["actual"], 240.0);
    assert_eq!(predictions[0]["accuracy"], 83.33);
}

#[tokio::test]
async fn test_accuracy_report_empty_history() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/forecast/accuracy")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total_predictions"], 0);
    assert_eq!(json["average_accuracy"], 0);
    assert!(json["predictions"].as_array().unwrap().is_empty());
}

// ========== Recommendations ==========

#[tokio::test]
async fn test_recommendations_overspent_budget() {
    let (app, db) = setup_test_app();

    // Current-month food spending of 150 against a budget of 100
    seed_expense(&db, 150.0, "food", months_ago(0));
    app.clone()
        .oneshot(post_json(
            "/api/budgets",
            serde_json::json!({"category": "food", "amount": 100.0}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/recommendations")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let recs = json.as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["category"], "food");
    assert_eq!(recs[0]["priority"], "high");
    assert_eq!(recs[0]["message"], "Reduce spending in food by $50.00");
}

#[tokio::test]
async fn test_recommendations_empty_when_under_budget() {
    let (app, db) = setup_test_app();

    seed_expense(&db, 50.0, "food", months_ago(0));
    app.clone()
        .oneshot(post_json(
            "/api/budgets",
            serde_json::json!({"category": "food", "amount": 100.0}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/recommendations")).await.unwrap();
    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_surplus_recommendation_warning() {
    let (app, db) = setup_test_app();

    // 600 spent this month against an aggregate budget of 500
    seed_expense(&db, 350.0, "rent", months_ago(0));
    seed_expense(&db, 250.0, "food", months_ago(0));

    let response = app
        .oneshot(get("/api/recommendations/surplus?monthly_budget=500"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["kind"], "warning");
    assert_eq!(json["category"], "rent");
    assert!(json["message"].as_str().unwrap().contains("$100.00"));
}

#[tokio::test]
async fn test_surplus_recommendation_positive() {
    let (app, db) = setup_test_app();

    seed_expense(&db, 100.0, "food", months_ago(0));

    let response = app
        .oneshot(get("/api/recommendations/surplus?monthly_budget=500"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["kind"], "positive");
    assert!(json.get("category").is_none());
}

#[tokio::test]
async fn test_surplus_recommendation_requires_positive_budget() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(get("/api/recommendations/surplus?monthly_budget=-10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Sanitization helpers ==========

#[test]
fn test_sanitize_text() {
    assert_eq!(sanitize_text("  hello world  "), "hello world");
    assert_eq!(sanitize_text("<script>alert('x')</script>"), "scriptalert(x)/script");
    assert_eq!(sanitize_text("a\"b'c`d;e\\f"), "abcdef");
}

#[test]
fn test_normalize_category() {
    assert_eq!(normalize_category("  Food & Drink "), "food & drink");
    assert_eq!(normalize_category("<>"), "");
}
