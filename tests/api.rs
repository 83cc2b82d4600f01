//! End-to-end handler tests: the full router driven against the in-memory
//! store, one request per `oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use movies_api::{routes, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    routes::app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn arrival() -> Value {
    json!({
        "title": "Arrival",
        "year": "2016",
        "director": "Denis Villeneuve",
        "genre": ["sci-fi", "drama"],
    })
}

async fn create_movie(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/movies", Some(arrival())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("generated id").to_string()
}

async fn create_rating(app: &Router, movie_id: &str, score: f64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/ratings",
        Some(json!({
            "movie": movie_id,
            "text": "a thoroughly detailed review",
            "score": score,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("generated id").to_string()
}

#[tokio::test]
async fn create_then_get_returns_submitted_fields() {
    let app = app();
    let id = create_movie(&app).await;

    let (status, body) = send(&app, "GET", &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["title"], json!("Arrival"));
    assert_eq!(body["year"], json!("2016"));
    assert_eq!(body["director"], json!("Denis Villeneuve"));
    assert_eq!(body["genre"], json!(["sci-fi", "drama"]));
    assert_eq!(body["ratings"], json!([]));
}

#[tokio::test]
async fn list_movies_returns_all_records() {
    let app = app();
    let first = create_movie(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/movies",
        Some(json!({ "title": "Dune", "year": "2021", "director": "Denis Villeneuve" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body_list) = send(&app, "GET", "/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    let movies = body_list.as_array().expect("array of movies");
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["id"], json!(first));
    assert_eq!(movies[1]["id"], body["id"]);
    assert!(movies.iter().all(|m| m["ratings"].is_array()));
}

#[tokio::test]
async fn patch_updates_only_touched_fields() {
    let app = app();
    let id = create_movie(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/movies/{}", id),
        Some(json!({ "rate": "9.9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate"], json!("9.9"));
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["title"], json!("Arrival"));
}

#[tokio::test]
async fn patch_rejects_invalid_touched_fields() {
    let app = app();
    let id = create_movie(&app).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/movies/{}", id),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], json!("title is required"));
}

#[tokio::test]
async fn unknown_movie_id_is_404() {
    let app = app();
    let (status, body) = send(&app, "GET", "/movies/ffffffffffffffffffffffff", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "movie not found" }));
}

#[tokio::test]
async fn malformed_movie_id_is_404_resource_not_found() {
    let app = app();
    for (method, body) in [("GET", None), ("PATCH", Some(json!({ "rate": "5" }))), ("DELETE", None)] {
        let (status, response) = send(&app, method, "/movies/not-an-id", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response, json!({ "error": "Resource not found" }));
    }
}

#[tokio::test]
async fn error_responses_are_json() {
    let app = app();
    let request = Request::builder()
        .method("GET")
        .uri("/movies/ffffffffffffffffffffffff")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "{}", content_type);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    let id = create_movie(&app).await;

    let (status, body) = send(&app, "DELETE", &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_validation_names_every_offending_field() {
    let app = app();
    let (status, body) = send(&app, "POST", "/movies", Some(json!({ "duration": "1h 56m" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], json!("title is required"));
    assert_eq!(body["year"], json!("year is required"));
    assert_eq!(body["director"], json!("director is required"));
}

#[tokio::test]
async fn rating_create_rejects_bad_payloads() {
    let app = app();
    let movie_id = create_movie(&app).await;

    let cases = [
        (json!({ "text": "a thoroughly detailed review", "score": 4 }), "movie"),
        (json!({ "movie": &movie_id, "score": 4 }), "text"),
        (json!({ "movie": &movie_id, "text": "a thoroughly detailed review" }), "score"),
        (json!({ "movie": &movie_id, "text": "too short", "score": 4 }), "text"),
        (json!({ "movie": &movie_id, "text": "a thoroughly detailed review", "score": 0 }), "score"),
        (json!({ "movie": &movie_id, "text": "a thoroughly detailed review", "score": 6 }), "score"),
    ];
    for (payload, field) in cases {
        let (status, body) = send(&app, "POST", "/ratings", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert!(body[field].is_string(), "expected {} error for {}", field, payload);
    }
}

#[tokio::test]
async fn rating_against_unknown_movie_is_404() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/ratings",
        Some(json!({
            "movie": "ffffffffffffffffffffffff",
            "text": "a thoroughly detailed review",
            "score": 4,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "movie not found" }));
}

#[tokio::test]
async fn rating_reads_populate_the_movie() {
    let app = app();
    let movie_id = create_movie(&app).await;
    let rating_id = create_rating(&app, &movie_id, 4.5).await;

    let (status, body) = send(&app, "GET", "/ratings", None).await;
    assert_eq!(status, StatusCode::OK);
    let ratings = body.as_array().expect("array of ratings");
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["movie"]["id"], json!(movie_id));
    assert_eq!(ratings[0]["movie"]["title"], json!("Arrival"));

    let (status, body) = send(&app, "GET", &format!("/ratings/{}", rating_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movie"]["id"], json!(movie_id));
    assert_eq!(body["movie"]["title"], json!("Arrival"));
    assert_eq!(body["score"], json!(4.5));
}

#[tokio::test]
async fn movie_detail_lists_exactly_its_ratings() {
    let app = app();
    let first = create_movie(&app).await;
    let (_, body) = send(
        &app,
        "POST",
        "/movies",
        Some(json!({ "title": "Dune", "year": "2021", "director": "Denis Villeneuve" })),
    )
    .await;
    let second = body["id"].as_str().expect("id").to_string();

    let first_rating = create_rating(&app, &first, 5.0).await;
    create_rating(&app, &second, 3.0).await;
    create_rating(&app, &first, 4.0).await;

    let (status, body) = send(&app, "GET", &format!("/movies/{}", first), None).await;
    assert_eq!(status, StatusCode::OK);
    let ratings = body["ratings"].as_array().expect("ratings array");
    assert_eq!(ratings.len(), 2);
    assert_eq!(ratings[0]["id"], json!(first_rating));
    assert!(ratings.iter().all(|r| r["movie"] == json!(first)));

    let (_, body) = send(&app, "GET", &format!("/movies/{}", second), None).await;
    assert_eq!(body["ratings"].as_array().expect("ratings array").len(), 1);
}

#[tokio::test]
async fn rating_update_revalidates_and_populates() {
    let app = app();
    let movie_id = create_movie(&app).await;
    let rating_id = create_rating(&app, &movie_id, 2.0).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/ratings/{}", rating_id),
        Some(json!({ "score": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], json!(5.0));
    assert_eq!(body["movie"]["id"], json!(movie_id));

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/ratings/{}", rating_id),
        Some(json!({ "score": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["score"], json!("score must be between 1 and 5"));

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/ratings/{}", rating_id),
        Some(json!({ "movie": "ffffffffffffffffffffffff" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "movie not found" }));
}

#[tokio::test]
async fn deleting_a_movie_removes_its_ratings() {
    let app = app();
    let movie_id = create_movie(&app).await;
    create_rating(&app, &movie_id, 4.0).await;

    let (status, _) = send(&app, "DELETE", &format!("/movies/{}", movie_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/ratings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_rating_then_get_is_404() {
    let app = app();
    let movie_id = create_movie(&app).await;
    let rating_id = create_rating(&app, &movie_id, 4.0).await;

    let (status, _) = send(&app, "DELETE", &format!("/ratings/{}", rating_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/ratings/{}", rating_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "rating not found" }));
}

#[tokio::test]
async fn unmatched_routes_share_the_error_shape() {
    let app = app();
    let (status, body) = send(&app, "GET", "/directors", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));

    let (status, body) = send(&app, "PUT", "/movies", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn non_object_body_is_a_400() {
    let app = app();
    let (status, body) = send(&app, "POST", "/movies", Some(json!(["Arrival"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["body"], json!("body must be a JSON object"));
}
