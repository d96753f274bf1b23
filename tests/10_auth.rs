mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};

use common::TestRequest;

#[tokio::test]
async fn root_and_health_are_public() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = TestRequest::new(Method::GET, "/").unauthenticated().send(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "MentorHub API (Rust)");
    assert!(body["endpoints"]["organization"].is_string(), "body: {}", body);

    let (status, body) =
        TestRequest::new(Method::GET, "/health").unauthenticated().send(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");

    Ok(())
}

#[tokio::test]
async fn domain_routes_require_a_token() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) =
        TestRequest::new(Method::GET, "/api/organization").unauthenticated().send(&app).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], true);

    Ok(())
}

#[tokio::test]
async fn non_bearer_schemes_are_rejected() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = TestRequest::new(Method::GET, "/api/identity")
        .auth("Basic dXNlcjpwYXNz")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].as_str().unwrap().contains("Bearer"));

    Ok(())
}

#[tokio::test]
async fn forged_signatures_are_rejected() -> Result<()> {
    let (app, _store) = common::test_app();

    let claims = mentorhub_api_rust::auth::Claims::new("intruder", vec![], 1);
    let forged = mentorhub_api_rust::auth::generate_jwt(&claims, "some-other-secret")?;

    let (status, _body) = TestRequest::new(Method::GET, "/api/identity")
        .auth(format!("Bearer {}", forged))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn valid_token_reaches_the_domain_logic() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/identity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], serde_json::json!([]));
    assert_eq!(body["has_more"], false);

    Ok(())
}
