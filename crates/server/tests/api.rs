use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create_ingredient(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/ingredients",
        Some(json!({ "name": name, "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn ingredient_create_and_fetch_round_trip() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/ingredients",
        Some(json!({ "name": "Salt", "description": "Fine sea salt" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Salt");
    assert!(created["id"].is_string());
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_null());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn ingredient_create_honours_client_id_and_created_at() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/ingredients",
        Some(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Pepper",
            "description": "Black, whole",
            "created_at": "2021-03-09T20:24:05Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    assert_eq!(created["created_at"], "2021-03-09T20:24:05Z");
}

#[tokio::test]
async fn ingredient_duplicate_name_conflicts() {
    let app = test_app().await;

    create_ingredient(&app, "Salt").await;
    let (status, body) = send(
        &app,
        "POST",
        "/ingredients",
        Some(json!({ "name": "Salt", "description": "again" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "\"Salt\" already present!" }));
}

#[tokio::test]
async fn ingredient_validation_failures_are_unprocessable() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/ingredients",
        Some(json!({ "name": "", "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/ingredients",
        Some(json!({ "name": "x".repeat(51), "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ingredient_missing_responses_are_not_found() {
    let app = test_app().await;
    let missing = "/ingredients/3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let expected = json!({ "error": "Ingredient does not exist" });

    let (status, body) = send(&app, "GET", missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let (status, body) = send(&app, "PATCH", missing, Some(json!({ "name": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let (status, body) = send(&app, "DELETE", missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn ingredient_patch_merges_fields() {
    let app = test_app().await;

    let created = create_ingredient(&app, "Salt").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/ingredients/{id}"),
        Some(json!({ "description": "Coarse" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Salt");
    assert_eq!(updated["description"], "Coarse");
    assert!(updated["updated_at"].is_string());
}

#[tokio::test]
async fn ingredient_delete_returns_snapshot() {
    let app = test_app().await;

    let created = create_ingredient(&app, "Salt").await;
    let id = created["id"].as_str().unwrap();

    let (status, snapshot) = send(&app, "DELETE", &format!("/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot, created);

    let (status, _) = send(&app, "DELETE", &format!("/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ingredient_list_supports_repeated_sort_and_filters() {
    let app = test_app().await;

    for name in ["ham", "hamburger bun", "salt"] {
        create_ingredient(&app, name).await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/ingredients?filters=name%20LIKE%20'%25ham%25'&sort=name:desc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["hamburger bun", "ham"]);

    let (status, body) = send(
        &app,
        "GET",
        "/ingredients?sort=name:asc&sort=created_at:desc&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_rejects_unknown_sort_and_injection_filters() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/recipes?sort=someword:up", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "error": "Invalid query: unsupported sort parameter: someword:up" })
    );

    let (status, _) = send(
        &app,
        "GET",
        "/ingredients?filters=%3B%20DROP%20TABLE%20ingredients",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recipe_lifecycle_over_http() {
    let app = test_app().await;

    let salt = create_ingredient(&app, "salt").await;
    let basil = create_ingredient(&app, "basil").await;

    // Create: the response is the bare shape, without the ingredient set.
    let (status, created) = send(
        &app,
        "POST",
        "/recipes",
        Some(json!({
            "name": "Focaccia",
            "description": "Ligurian style",
            "ingredients": [
                { "id": salt["id"], "name": salt["name"] },
                { "id": basil["id"], "name": basil["name"] }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Focaccia");
    assert!(created.get("ingredients").is_none());

    let id = created["id"].as_str().unwrap();

    // Get one: expanded with ingredients ordered by name.
    let (status, fetched) = send(&app, "GET", &format!("/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = fetched["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["basil", "salt"]);

    // The dedicated references endpoint returns the same `{id, name}` pairs.
    let (status, refs) = send(
        &app,
        "GET",
        &format!("/ingredients/recipes/{id}/ingredients"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refs, fetched["ingredients"]);

    // Patch: unlink salt, keep basil, rename.
    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/recipes/{id}"),
        Some(json!({
            "name": "Focaccia Genovese",
            "ingredients": [ { "id": salt["id"], "is_deleted": true } ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "Focaccia Genovese");
    assert!(patched["updated_at"].is_string());
    let names: Vec<&str> = patched["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["basil"]);

    // Delete: bare snapshot, then gone.
    let (status, snapshot) = send(&app, "DELETE", &format!("/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["name"], "Focaccia Genovese");
    assert!(snapshot.get("ingredients").is_none());

    let (status, body) = send(&app, "GET", &format!("/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Recipe does not exist" }));
}

#[tokio::test]
async fn recipe_create_with_unknown_ingredient_is_unprocessable() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/recipes",
        Some(json!({
            "name": "Focaccia",
            "description": "",
            "ingredients": [
                { "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "ghost" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "error": "Unknown ingredient: 3fa85f64-5717-4562-b3fc-2c963f66afa6"
        })
    );

    // Nothing was written.
    let (status, listed) = send(&app, "GET", "/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn recipe_list_is_bare_and_filterable() {
    let app = test_app().await;

    for name in ["Focaccia", "Farinata", "Trofie al pesto"] {
        let (status, _) = send(
            &app,
            "POST",
            "/recipes",
            Some(json!({ "name": name, "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/recipes?filters=name%20LIKE%20'F%25'&sort=name:asc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Farinata", "Focaccia"]);
    assert!(body[0].get("ingredients").is_none());
}

#[tokio::test]
async fn references_for_unknown_recipe_are_empty_not_404() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "GET",
        "/ingredients/recipes/3fa85f64-5717-4562-b3fc-2c963f66afa6/ingredients",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
