//! ETABS Viz HTTP Server

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use etabs_viz::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct OptionsResponse {
    stories: Vec<String>,
    load_cases: Vec<String>,
    directions: Vec<Direction>,
    scale_min: u32,
    scale_max: u32,
    join: JoinReport,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    story: Option<String>,
    case: Option<String>,
    direction: Option<String>,
    scale: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ViewResponse {
    success: bool,
    error: Option<String>,
    view: Option<DisplacementView>,
}

struct AppState {
    model: DisplacementModel,
    options: ViewerOptions,
}

type SharedState = Arc<AppState>;

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_options(State(state): State<SharedState>) -> impl IntoResponse {
    Json(OptionsResponse {
        stories: state.model.stories(),
        load_cases: state.model.load_cases(),
        directions: Direction::ALL.to_vec(),
        scale_min: ScaleFactor::MIN,
        scale_max: ScaleFactor::MAX,
        join: state.model.join_report().clone(),
    })
}

/// Query parameters on top of the configured defaults
fn build_selection(state: &AppState, query: ViewQuery) -> VizResult<Selection> {
    let defaults = state.model.default_selection();
    let story = query
        .story
        .or_else(|| defaults.as_ref().map(|s| s.story.clone()))
        .unwrap_or_default();
    let case = query
        .case
        .or_else(|| defaults.as_ref().map(|s| s.load_case.clone()))
        .unwrap_or_default();
    let direction = match query.direction {
        Some(d) => d.parse()?,
        None => state.options.direction,
    };
    let scale = match query.scale {
        Some(s) => ScaleFactor::new(s)?,
        None => state.options.scale,
    };
    Ok(Selection::new(&story, &case)
        .with_direction(direction)
        .with_scale(scale))
}

fn run_view(state: &AppState, query: ViewQuery) -> VizResult<DisplacementView> {
    let selection = build_selection(state, query)?;
    log::debug!("View request: {:?}", selection);
    state.model.view(&selection)
}

async fn view(State(state): State<SharedState>, Query(query): Query<ViewQuery>) -> impl IntoResponse {
    match run_view(&state, query) {
        Ok(view) => (
            StatusCode::OK,
            Json(ViewResponse {
                success: true,
                error: None,
                view: Some(view),
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ViewResponse {
                success: false,
                error: Some(e.to_string()),
                view: None,
            }),
        ),
    }
}

async fn view_csv(State(state): State<SharedState>, Query(query): Query<ViewQuery>) -> Response {
    match run_view(&state, query).and_then(|view| view.to_csv()) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"data.csv\""),
            ],
            csv,
        )
            .into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = ViewerOptions::default().with_env();
    let path = options
        .workbook
        .clone()
        .ok_or_else(|| anyhow::anyhow!("ETABS_WORKBOOK is not set"))?;
    let model = DisplacementModel::open_with(&path, &options)?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(8087);

    let state = Arc::new(AppState { model, options });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/options", get(list_options))
        .route("/api/v1/view", get(view))
        .route("/api/v1/view.csv", get(view_csv))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("ETABS Viz Server listening on http://{}", addr);
    println!("  Workbook:     {}", path.display());
    println!("  Health check: GET /health");
    println!("  Options:      GET /api/v1/options");
    println!("  View:         GET /api/v1/view?story=&case=&direction=&scale=");
    println!("  CSV export:   GET /api/v1/view.csv");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
