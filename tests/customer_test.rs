mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::json;

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for path in ["/customers", "/dashboard", "/inventory", "/transactions/recent"] {
        let response = client
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 401, "{} should require auth", path);
    }
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/customers", app.address))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn create_customer_starts_with_zero_snapshots() {
    let app = TestApp::spawn().await;

    let customer = app.create_customer("Ramesh Kumar").await;

    assert_eq!(customer["name"], "Ramesh Kumar");
    assert_eq!(customer["balance_due"], "0");
    assert_eq!(customer["cylinders_out"], 0);
    assert!(customer["id"].as_str().is_some());
}

#[tokio::test]
async fn blank_and_missing_names_are_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/customers", app.address))
        .bearer_auth(app.bearer_token())
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 422);

    let response = client
        .post(format!("{}/customers", app.address))
        .bearer_auth(app.bearer_token())
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/customers", app.address))
        .bearer_auth(app.bearer_token())
        .json(&json!({ "phone": "+91 9876543210" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn invalid_emails_are_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/customers", app.address))
        .bearer_auth(app.bearer_token())
        .json(&json!({ "name": "Ramesh Kumar", "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn unknown_customers_return_404() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/customers/no-such-id", app.address))
        .bearer_auth(app.bearer_token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Customer not found");
}

#[tokio::test]
async fn detail_view_recomputes_stats_from_history() {
    let app = TestApp::spawn().await;
    let customer = app.create_customer("Ramesh Kumar").await;
    let id = customer["id"].as_str().unwrap();

    let body = app.get_json(&format!("/customers/{}", id)).await;
    assert_eq!(body["customer"]["name"], "Ramesh Kumar");
    assert_eq!(body["stats"]["total_amount"], "0");
    assert_eq!(body["stats"]["balance_due"], "0");
    assert_eq!(body["transactions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_matches_name_email_and_phone() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    app.create_customer("Ramesh Kumar").await;
    let response = client
        .post(format!("{}/customers", app.address))
        .bearer_auth(app.bearer_token())
        .json(&json!({
            "name": "Suresh Singh",
            "email": "suresh@example.com",
            "phone": "+91 9876543210"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let body = app.get_json("/customers?search=RAMESH").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["total_customers"], 2);
    assert_eq!(body["customers"][0]["name"], "Ramesh Kumar");

    let body = app.get_json("/customers?search=example.com").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["customers"][0]["name"], "Suresh Singh");

    let body = app.get_json("/customers?search=98765").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["customers"][0]["name"], "Suresh Singh");

    let body = app.get_json("/customers?search=nobody").await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["customers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn listing_windows_and_clamps_out_of_range_pages() {
    let app = TestApp::spawn().await;
    for i in 1..=23 {
        app.create_customer(&format!("Customer {:02}", i)).await;
    }

    let body = app.get_json("/customers?page=1&page_size=10").await;
    assert_eq!(body["total"], 23);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["customers"].as_array().unwrap().len(), 10);

    // Pages past the end clamp to the last page instead of erroring
    let body = app.get_json("/customers?page=5&page_size=10").await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["customers"].as_array().unwrap().len(), 3);

    // Page zero clamps to the first page
    let body = app.get_json("/customers?page=0&page_size=10").await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["customers"].as_array().unwrap().len(), 10);
}
