use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tourism_agents::{AgentConfig, TourismAgent};
use tourism_api::{build_router, ApiState};
use tourism_core::{NO_PLACE_MESSAGE, SAMPLE_QUERIES};
use tourism_observability::AppMetrics;
use tourism_responders::{PlacesResponder, WeatherResponder};
use tower::ServiceExt;

struct FixedWeather;

impl WeatherResponder for FixedWeather {
    async fn get_weather(&self, place: &str) -> String {
        format!("In {place} it's currently 21.0°C with a chance of 10% to rain.")
    }
}

struct FixedPlaces;

impl PlacesResponder for FixedPlaces {
    async fn get_attractions(&self, place: &str) -> String {
        format!("In {place} these are the places you can go,\nColosseum\nPantheon")
    }
}

fn app() -> Router {
    let metrics = AppMetrics::shared();
    let agent = Arc::new(TourismAgent::new(
        FixedWeather,
        FixedPlaces,
        metrics.clone(),
        AgentConfig::default(),
    ));

    build_router(ApiState { agent, metrics })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_metrics() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["requests_total"], 0);
}

#[tokio::test]
async fn chat_merges_weather_and_places() {
    let response = app()
        .oneshot(post_json(
            "/api/chat",
            json!({ "message": "Weather and tourist sights in Rome?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let parsed = read_json(response).await;
    assert_eq!(parsed["status"], "success");
    assert_eq!(
        parsed["response"],
        "In Rome it's currently 21.0°C with a chance of 10% to rain. And these are the places you can go:\nColosseum\nPantheon"
    );
}

#[tokio::test]
async fn chat_without_place_asks_for_one() {
    let response = app()
        .oneshot(post_json("/api/chat", json!({ "message": "is it sunny?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["response"], NO_PLACE_MESSAGE);
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let response = app()
        .oneshot(post_json("/api/chat", json!({ "message": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "Empty message");
    assert_eq!(parsed["status"], "error");
}

#[tokio::test]
async fn chat_without_message_field_is_rejected() {
    let response = app()
        .oneshot(post_json("/api/chat", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "Empty message");
    assert_eq!(parsed["status"], "error");
}

#[tokio::test]
async fn analyze_returns_place_and_flags() {
    let response = app()
        .oneshot(post_json(
            "/api/analyze",
            json!({ "message": "I'm going to go to Bangalore, what is the temperature there?" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(
        parsed,
        json!({ "place": "Bangalore", "wants_weather": true, "wants_places": false })
    );
}

#[tokio::test]
async fn examples_lists_sample_queries() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/examples")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["examples"].as_array().unwrap().len(), SAMPLE_QUERIES.len());
}

#[tokio::test]
async fn chat_requests_are_counted() {
    let app = app();

    let chat = app
        .clone()
        .oneshot(post_json("/api/chat", json!({ "message": "Tourist attractions in Rome" })))
        .await
        .unwrap();
    assert_eq!(chat.status(), StatusCode::OK);

    let health = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = read_json(health).await;
    assert_eq!(parsed["metrics"]["requests_total"], 1);
    assert_eq!(parsed["metrics"]["places_calls_total"], 1);
    assert_eq!(parsed["metrics"]["weather_calls_total"], 0);
}
