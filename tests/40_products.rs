mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use common::{sample_product, TestApp};

async fn create(app: &TestApp, token: &str) -> Result<String> {
    let res = app
        .request(Method::POST, "/api/products", Some(sample_product()), Some(token))
        .await?;
    anyhow::ensure!(res.status == StatusCode::CREATED, "create failed: {}", res.body);
    Ok(res.body["_id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn writes_without_token_are_denied() -> Result<()> {
    let app = TestApp::new()?;
    let id = uuid::Uuid::new_v4();

    let create = app
        .request(Method::POST, "/api/products", Some(sample_product()), None)
        .await?;
    let update = app
        .request(Method::PUT, &format!("/api/products/{}", id), Some(json!({ "stock": 1 })), None)
        .await?;
    let delete = app
        .request(Method::DELETE, &format!("/api/products/{}", id), None, None)
        .await?;

    for res in [create, update, delete] {
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["error"], "Access denied.");
    }
    assert_eq!(app.store.product_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn bad_and_expired_tokens_are_invalid() -> Result<()> {
    let app = TestApp::new()?;
    let expired = app.tokens.issue_at(
        "mail@doe.com",
        uuid::Uuid::new_v4(),
        Utc::now() - Duration::hours(2) - Duration::seconds(5),
    )?;

    for token in ["garbage", expired.as_str()] {
        let res = app
            .request(Method::POST, "/api/products", Some(sample_product()), Some(token))
            .await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["error"], "Invalid token.");
    }
    Ok(())
}

#[tokio::test]
async fn create_then_read_publicly() -> Result<()> {
    let app = TestApp::new()?;
    let token = app.signed_in("seller@doe.com").await?;

    let res = app
        .request(Method::POST, "/api/products", Some(sample_product()), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Rustic Wooden Chair");
    assert_eq!(res.body["imageURL"], "https://picsum.photos/500/500");
    let id = res.body["_id"].as_str().expect("_id").to_string();

    // defaults to the caller
    let claims = app.tokens.verify(&token)?;
    assert_eq!(res.body["_createdBy"], claims.id.to_string());

    let list = app.get("/api/products").await?;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().map(Vec::len), Some(1));

    let one = app.get(&format!("/api/products/{}", id)).await?;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body[0]["_id"], id.as_str());
    assert_eq!(one.body[0]["price"], 129.99);
    Ok(())
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_empty_array() -> Result<()> {
    let app = TestApp::new()?;

    for uri in [
        format!("/api/products/{}", uuid::Uuid::new_v4()),
        "/api/products/not-an-id".to_string(),
    ] {
        let res = app.get(&uri).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!([]));
    }
    Ok(())
}

#[tokio::test]
async fn invalid_product_body_is_400() -> Result<()> {
    let app = TestApp::new()?;
    let token = app.signed_in("seller@doe.com").await?;

    let res = app
        .request(Method::POST, "/api/products", Some(json!({ "name": "No price" })), Some(&token))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Invalid product"));
    assert_eq!(app.store.product_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn update_changes_only_given_fields() -> Result<()> {
    let app = TestApp::new()?;
    let token = app.signed_in("seller@doe.com").await?;
    let id = create(&app, &token).await?;
    let uri = format!("/api/products/{}", id);

    let res = app
        .request(Method::PUT, &uri, Some(json!({ "stock": 3, "isOnDiscount": true })), Some(&token))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Product updated successfully");

    let after = app.get(&uri).await?;
    assert_eq!(after.body[0]["stock"], 3);
    assert_eq!(after.body[0]["isOnDiscount"], true);
    assert_eq!(after.body[0]["name"], "Rustic Wooden Chair");
    Ok(())
}

#[tokio::test]
async fn delete_removes_product() -> Result<()> {
    let app = TestApp::new()?;
    let token = app.signed_in("seller@doe.com").await?;
    let id = create(&app, &token).await?;
    let uri = format!("/api/products/{}", id);

    let res = app.request(Method::DELETE, &uri, None, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Product deleted successfully");

    assert_eq!(app.get(&uri).await?.body, json!([]));

    let again = app.request(Method::DELETE, &uri, None, Some(&token)).await?;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], format!("Product with id {} not found", id));
    Ok(())
}

#[tokio::test]
async fn update_or_delete_missing_id_is_404() -> Result<()> {
    let app = TestApp::new()?;
    let token = app.signed_in("seller@doe.com").await?;

    for id in [uuid::Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let uri = format!("/api/products/{}", id);
        let expected = format!("Product with id {} not found", id);

        let put = app
            .request(Method::PUT, &uri, Some(json!({ "stock": 1 })), Some(&token))
            .await?;
        assert_eq!(put.status, StatusCode::NOT_FOUND);
        assert_eq!(put.body["error"], expected.as_str());

        let del = app.request(Method::DELETE, &uri, None, Some(&token)).await?;
        assert_eq!(del.status, StatusCode::NOT_FOUND);
        assert_eq!(del.body["error"], expected.as_str());
    }
    Ok(())
}
