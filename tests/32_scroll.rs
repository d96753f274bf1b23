mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use bson::doc;
use serde_json::Value;

use common::TestRequest;
use mentorhub_api_rust::store::DocumentStore;

#[tokio::test]
async fn listing_two_documents_fits_on_one_page() -> Result<()> {
    let (app, store) = common::test_app();
    store.create_document("Identity", doc! { "name": "beta", "description": "second" }).await?;
    store.create_document("Identity", doc! { "name": "alpha", "description": "first" }).await?;

    let (status, body) = common::get(&app, "/api/identity").await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "alpha");
    assert_eq!(items[1]["name"], "beta");
    assert_eq!(body["limit"], 10);
    assert_eq!(body["has_more"], false);
    assert_eq!(body["next_cursor"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn following_cursors_walks_the_full_collection_in_order() -> Result<()> {
    let (app, store) = common::test_app();
    for i in 0..12 {
        store.create_document("Consume", doc! { "name": format!("item-{:02}", i) }).await?;
    }

    let mut collected: Vec<String> = Vec::new();
    let mut uri = "/api/consume?limit=5".to_string();
    loop {
        let (status, body) = common::get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["limit"], 5);

        let items = body["items"].as_array().unwrap();
        assert!(items.len() <= 5);
        for item in items {
            collected.push(item["name"].as_str().unwrap().to_string());
        }

        if !body["has_more"].as_bool().unwrap() {
            assert_eq!(body["next_cursor"], Value::Null);
            break;
        }
        let cursor = body["next_cursor"].as_str().unwrap();
        assert_eq!(cursor, items.last().unwrap()["_id"].as_str().unwrap());
        uri = format!("/api/consume?limit=5&after_id={}", cursor);
    }

    let expected: Vec<String> = (0..12).map(|i| format!("item-{:02}", i)).collect();
    assert_eq!(collected, expected);

    Ok(())
}

#[tokio::test]
async fn name_filter_is_a_case_insensitive_substring_match() -> Result<()> {
    let (app, store) = common::test_app();
    store.create_document("Identity", doc! { "name": "Production Line" }).await?;
    store.create_document("Identity", doc! { "name": "staging" }).await?;
    store.create_document("Identity", doc! { "name": "prod-2" }).await?;

    let (status, body) = common::get(&app, "/api/identity?name=PROD").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> =
        body["items"].as_array().unwrap().iter().map(|i| i["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Production Line", "prod-2"]);

    Ok(())
}

#[tokio::test]
async fn descending_order_reverses_the_listing() -> Result<()> {
    let (app, store) = common::test_app();
    for name in ["alpha", "beta", "charlie"] {
        store.create_document("Identity", doc! { "name": name }).await?;
    }

    let (status, body) = common::get(&app, "/api/identity?order=desc").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> =
        body["items"].as_array().unwrap().iter().map(|i| i["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["charlie", "beta", "alpha"]);

    Ok(())
}

#[tokio::test]
async fn out_of_range_limits_name_the_parameter() -> Result<()> {
    let (app, _store) = common::test_app();

    for uri in ["/api/identity?limit=0", "/api/identity?limit=101"] {
        let (status, body) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"].as_str().unwrap().contains("limit"), "body: {}", body);
    }

    Ok(())
}

#[tokio::test]
async fn sort_fields_outside_the_allow_list_are_rejected() -> Result<()> {
    let (app, _store) = common::test_app();

    // consume-style domains cannot sort on audit stamps
    let (status, body) = common::get(&app, "/api/identity?sort_by=created.at_time").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("sort_by"));

    // control-style domains can
    let (status, _body) = common::get(&app, "/api/organization?sort_by=created.at_time").await;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn unknown_order_values_are_rejected() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/identity?order=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("order"));

    Ok(())
}

#[tokio::test]
async fn malformed_cursors_are_a_bad_request() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, body) = common::get(&app, "/api/identity?after_id=not-a-cursor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("after_id"));

    Ok(())
}

#[tokio::test]
async fn well_formed_but_unknown_cursors_are_not_found() -> Result<()> {
    let (app, store) = common::test_app();
    store.create_document("Identity", doc! { "name": "alpha" }).await?;

    let ghost = bson::oid::ObjectId::new().to_hex();
    let (status, body) = common::get(&app, &format!("/api/identity?after_id={}", ghost)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains(&ghost));

    Ok(())
}

#[tokio::test]
async fn read_only_domains_reject_writes() -> Result<()> {
    let (app, _store) = common::test_app();

    let (status, _body) =
        common::post(&app, "/api/identity", serde_json::json!({ "name": "x" })).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _body) = TestRequest::new(Method::PATCH, "/api/consume/0123456789abcdef01234567")
        .json(serde_json::json!({ "name": "x" }))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
