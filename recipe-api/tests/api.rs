use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use recipe_app::config::BootstrapSettings;
use recipe_app::infrastructure::db::run_migrations;
use recipe_app::infrastructure::security::TokenSigner;
use recipe_app::AppContext;
use sea_orm::Database;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> (Router, AppContext) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    run_migrations(&db).await.unwrap();
    let tokens = TokenSigner::new(
        "http-test-secret-that-is-long-enough!",
        chrono::Duration::hours(1),
    );
    let ctx = AppContext::new(db, tokens);
    (recipe_api::router(ctx.clone(), "http://localhost:3000"), ctx)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");
    body["userId"].as_str().unwrap().to_string()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn recipe_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A simple dish",
        "ingredients": "rice, water",
        "instructions": "Boil.",
        "category": "VEGAN",
        "imageUrl": null,
        "videoUrl": null,
    })
}

async fn seed(ctx: &AppContext, cooks: &[&str]) {
    let settings = BootstrapSettings {
        admin_username: "admin".to_string(),
        admin_email: "admin@recipe.local".to_string(),
        admin_password: Some("admin-password".to_string()),
        cooks: cooks.iter().map(|c| c.to_string()).collect(),
    };
    ctx.bootstrap.run(&settings).await.unwrap();
}

#[tokio::test]
async fn test_public_reads_and_anonymous_writes() {
    let (app, _ctx) = app().await;

    let (status, body) = send(&app, Method::GET, "/recipes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::POST, "/recipes", None, Some(recipe_body("Nope"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/recipes/feed", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_bearer_token_is_rejected() {
    let (app, _ctx) = app().await;
    let (status, body) = send(&app, Method::GET, "/recipes", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Session token is invalid");
}

#[tokio::test]
async fn test_auth_errors() {
    let (app, _ctx) = app().await;
    register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "email": "x@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already taken");

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_follow_rate_and_feed() {
    let (app, ctx) = app().await;
    let alice_id = register(&app, "alice").await;
    register(&app, "bob").await;
    seed(&ctx, &["alice"]).await;

    let alice = login(&app, "alice", "password123").await;
    let bob = login(&app, "bob", "password123").await;

    let (status, _) = send(&app, Method::POST, "/recipes", Some(&bob), Some(recipe_body("Nope"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, recipe) =
        send(&app, Method::POST, "/recipes", Some(&alice), Some(recipe_body("R1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recipe["user"]["username"], "alice");
    let recipe_id = recipe["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/recipes/feed", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let follow_uri = format!("/follow/{alice_id}");
    let (status, _) = send(&app, Method::POST, &follow_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, &follow_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (_, body) = send(&app, Method::GET, &format!("{follow_uri}/status"), Some(&bob), None).await;
    assert_eq!(body["isFollowing"], true);

    let (_, feed) = send(&app, Method::GET, "/recipes/feed", Some(&bob), None).await;
    assert_eq!(feed[0]["id"], recipe_id.as_str());
    assert_eq!(feed[0]["authorUsername"], "alice");

    let ratings_uri = format!("/recipes/{recipe_id}/ratings");
    let average_uri = format!("{ratings_uri}/average");
    for (score, expected) in [(4, 4.0), (2, 2.0)] {
        let (status, _) =
            send(&app, Method::POST, &ratings_uri, Some(&bob), Some(json!({ "score": score }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(&app, Method::GET, &average_uri, None, None).await;
        assert_eq!(body["averageRating"], expected);
    }
    let (_, ratings) = send(&app, Method::GET, &ratings_uri, None, None).await;
    assert_eq!(ratings.as_array().unwrap().len(), 1);

    let (status, _) =
        send(&app, Method::POST, &ratings_uri, Some(&bob), Some(json!({ "score": 9 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &follow_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &follow_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ownership_and_administration() {
    let (app, ctx) = app().await;
    let alice_id = register(&app, "alice").await;
    register(&app, "dave").await;
    seed(&ctx, &["alice", "dave"]).await;

    let alice = login(&app, "alice", "password123").await;
    let dave = login(&app, "dave", "password123").await;
    let admin = login(&app, "admin", "admin-password").await;

    let (_, recipe) = send(&app, Method::POST, "/recipes", Some(&alice), Some(recipe_body("Dal"))).await;
    let recipe_uri = format!("/recipes/{}", recipe["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::PUT, &recipe_uri, Some(&dave), Some(recipe_body("Mine"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) =
        send(&app, Method::PUT, &recipe_uri, Some(&alice), Some(recipe_body("Red Dal"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Red Dal");

    let comments_uri = format!("{recipe_uri}/comments");
    let (status, comment) = send(
        &app,
        Method::POST,
        &comments_uri,
        Some(&dave),
        Some(json!({ "content": "Needs more cumin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comment_uri = format!("{comments_uri}/{}", comment["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &comment_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &comment_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &recipe_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &recipe_uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &recipe_uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/users", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, users) = send(&app, Method::GET, "/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 3);
    assert!(users[0].get("passwordHash").is_none());

    let admin_id = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "admin")
        .and_then(|u| u["id"].as_str())
        .unwrap()
        .to_string();
    let (status, body) =
        send(&app, Method::DELETE, &format!("/users/{admin_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Admin user cannot delete their own account");

    let (status, _) =
        send(&app, Method::DELETE, &format!("/users/{alice_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, users) = send(&app, Method::GET, "/users", Some(&admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_profile_views() {
    let (app, ctx) = app().await;
    let alice_id = register(&app, "alice").await;
    seed(&ctx, &["alice"]).await;
    let alice = login(&app, "alice", "password123").await;

    send(&app, Method::POST, "/recipes", Some(&alice), Some(recipe_body("Pho"))).await;

    let (status, mine) = send(&app, Method::GET, "/profile/my-recipes", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["title"], "Pho");

    let (_, public) = send(&app, Method::GET, &format!("/users/{alice_id}/recipes"), None, None).await;
    assert_eq!(public, mine);

    let (status, _) = send(&app, Method::GET, "/profile/my-ratings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, found) = send(&app, Method::GET, "/recipes/search?keyword=pho", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, by_category) = send(&app, Method::GET, "/recipes/category/vegan", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_category.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/recipes/category/paleo", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_input_is_a_json_400() {
    let (app, ctx) = app().await;
    register(&app, "alice").await;
    seed(&ctx, &["alice"]).await;
    let alice = login(&app, "alice", "password123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let mut pescatarian = recipe_body("Trout");
    pescatarian["category"] = json!("PESCATARIAN");
    let (status, body) = send(&app, Method::POST, "/recipes", Some(&alice), Some(pescatarian)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("PESCATARIAN"));

    let (_, recipe) = send(&app, Method::POST, "/recipes", Some(&alice), Some(recipe_body("Salad"))).await;
    let ratings_uri = format!("/recipes/{}/ratings", recipe["id"].as_str().unwrap());
    let (status, body) =
        send(&app, Method::POST, &ratings_uri, Some(&alice), Some(json!({ "score": 4.5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/recipes/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::DELETE, "/users/42", Some(&alice), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
