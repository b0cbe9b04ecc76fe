//! HTTP surface: one stateless generate + verify contract.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::daily;
use crate::error::GenerationFailed;
use crate::generator::{Draft, PuzzleGenerator};

pub const DEFAULT_ICON_BASE_URL: &str = "https://ddragon.leagueoflegends.com/cdn/13.24.1/img/champion";

#[derive(Clone)]
pub struct AppState {
    generator: PuzzleGenerator,
    icon_base_url: Arc<str>,
}

impl AppState {
    pub fn new(generator: PuzzleGenerator, icon_base_url: &str) -> Self {
        Self {
            generator,
            icon_base_url: icon_base_url.trim_end_matches('/').into(),
        }
    }

    fn icon_ref(&self, name: &str) -> String {
        let file: String = name.split_whitespace().collect();
        format!("{}/{}.png", self.icon_base_url, file)
    }

    fn entity_refs<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<EntityRef> {
        names
            .into_iter()
            .map(|name| EntityRef {
                name: name.to_string(),
                icon_ref: self.icon_ref(name),
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Generation(#[from] GenerationFailed),
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleResponse {
    pub rows: [String; 3],
    pub cols: [String; 3],
    pub puzzle_id: String,
    pub difficulty: f64,
}

impl From<Draft> for PuzzleResponse {
    fn from(draft: Draft) -> Self {
        Self {
            puzzle_id: draft.puzzle.id(),
            rows: draft.puzzle.rows,
            cols: draft.puzzle.cols,
            difficulty: draft.difficulty,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyResponse {
    #[serde(flatten)]
    pub puzzle: PuzzleResponse,
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    pub difficulty: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(alias = "champion")]
    pub entity_name: String,
    pub categories: [String; 2],
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub is_valid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRequest {
    pub row_category: String,
    pub col_category: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub name: String,
    pub icon_ref: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntitiesResponse {
    pub entities: Vec<EntityRef>,
}

pub fn build_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route("/api/generate", get(generate))
        .route("/api/daily", get(daily_challenge))
        .route("/api/query", post(verify_guess))
        .route("/api/valid-entities", post(valid_entities))
        .route("/api/entities", get(list_entities))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/generate
/// Fresh puzzle; `?difficulty=` steers the draw towards a target.
async fn generate(
    State(state): State<AppState>,
    query: Result<Query<GenerateQuery>, QueryRejection>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let Query(query) = query?;
    if query.difficulty.is_some_and(|target| !target.is_finite()) {
        return Err(ApiError::BadRequest("difficulty must be a finite number".into()));
    }
    let mut rng = rand::thread_rng();
    let draft = match query.difficulty {
        Some(target) => state.generator.generate_targeted(&mut rng, target)?,
        None => state.generator.generate(&mut rng)?,
    };
    Ok(Json(draft.into()))
}

/// GET /api/daily
async fn daily_challenge(State(state): State<AppState>) -> Result<Json<DailyResponse>, ApiError> {
    let date = daily::today();
    let draft = daily::challenge(&state.generator, date)?;
    Ok(Json(DailyResponse {
        puzzle: draft.into(),
        date: date.format("%Y-%m-%d").to_string(),
    }))
}

/// POST /api/query
async fn verify_guess(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(req) = payload?;
    let [row, col] = &req.categories;
    let is_valid = state.generator.verify_guess(&req.entity_name, row, col);
    tracing::info!(entity = %req.entity_name, row = %row, col = %col, is_valid, "verified guess");
    Ok(Json(VerifyResponse { is_valid }))
}

/// POST /api/valid-entities
async fn valid_entities(
    State(state): State<AppState>,
    payload: Result<Json<CellRequest>, JsonRejection>,
) -> Result<Json<EntitiesResponse>, ApiError> {
    let Json(req) = payload?;
    if req.row_category.is_empty() || req.col_category.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }
    let names = state
        .generator
        .valid_cell_entities(&req.row_category, &req.col_category);
    tracing::info!(
        row = %req.row_category,
        col = %req.col_category,
        found = names.len(),
        "listed valid entities"
    );
    Ok(Json(EntitiesResponse {
        entities: state.entity_refs(names),
    }))
}

/// GET /api/entities
async fn list_entities(State(state): State<AppState>) -> Json<EntitiesResponse> {
    let names = state.generator.roster().sorted_names();
    Json(EntitiesResponse {
        entities: state.entity_refs(names),
    })
}
