use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tourism_agents::{AgentConfig, TourismAgent};
use tourism_core::{ChatInput, ChatReply, SAMPLE_QUERIES};
use tourism_observability::{AppMetrics, MetricsSnapshot};
use tourism_responders::{PlacesResponder, ResponderConfig, Responders, WeatherResponder};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

const MAX_BODY_BYTES: usize = 16 * 1024;

pub struct ApiState<W, P> {
    pub agent: Arc<TourismAgent<W, P>>,
    pub metrics: Arc<AppMetrics>,
}

impl<W, P> Clone for ApiState<W, P> {
    fn clone(&self) -> Self {
        Self {
            agent: self.agent.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ExamplesResponse {
    examples: &'static [&'static str],
}

pub fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();
    let responders = Responders::from_config(&ResponderConfig::from_env())
        .context("failed to build responders")?;

    let agent = Arc::new(TourismAgent::new(
        responders.weather,
        responders.places,
        metrics.clone(),
        AgentConfig::from_env(),
    ));

    Ok(build_router(ApiState { agent, metrics }))
}

pub fn build_router<W, P>(state: ApiState<W, P>) -> Router
where
    W: WeatherResponder + 'static,
    P: PlacesResponder + 'static,
{
    Router::new()
        .route("/health", get(health::<W, P>))
        .route("/api/chat", post(chat::<W, P>))
        .route("/api/analyze", post(analyze::<W, P>))
        .route("/api/examples", get(examples))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health<W, P>(State(state): State<ApiState<W, P>>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn chat<W, P>(State(state): State<ApiState<W, P>>, Json(input): Json<ChatInput>) -> Response
where
    W: WeatherResponder,
    P: PlacesResponder,
{
    let message = input.message.trim();
    if message.is_empty() {
        return empty_message();
    }

    let response = state.agent.process(message).await;
    (StatusCode::OK, Json(ChatReply::success(response))).into_response()
}

async fn analyze<W, P>(
    State(state): State<ApiState<W, P>>,
    Json(input): Json<ChatInput>,
) -> Response
where
    W: WeatherResponder,
    P: PlacesResponder,
{
    let message = input.message.trim();
    if message.is_empty() {
        return empty_message();
    }

    let analysis = state.agent.analyze(message);
    debug!(place = %analysis.place, "query analyzed");
    (StatusCode::OK, Json(analysis)).into_response()
}

async fn examples() -> impl IntoResponse {
    Json(ExamplesResponse {
        examples: SAMPLE_QUERIES,
    })
}

fn empty_message() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Empty message",
            status: "error",
        }),
    )
        .into_response()
}
