use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordnet_categories::{CategoryEngine, CategorySet, Strategy};
use wordnet_db::WordNet;
use wordnet_types::Pos;

pub const MAX_WORD_LEN: usize = 128;

#[derive(Clone)]
pub struct AppState {
    pub wordnet: Arc<WordNet>,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct CategoriesQuery {
    pub word: String,
    pub pos: Option<String>,
    pub strategy: Option<String>,
}

#[derive(Deserialize)]
pub struct TaggedQuery {
    pub word: String,
    pub tag: String,
    pub strategy: Option<String>,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    word: String,
    pos: Option<String>,
    strategy: &'static str,
    categories: Vec<String>,
}

#[derive(Serialize)]
struct StatsResponse {
    parts: Vec<String>,
    synsets: usize,
    lemmas: usize,
    skipped_lines: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/stats", get(stats))
        .route("/v1/categories", get(categories))
        .route("/v1/tagged", get(tagged))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let wn = &state.wordnet;
    Json(StatsResponse {
        parts: wn.loaded_parts().iter().map(Pos::to_string).collect(),
        synsets: wn.synset_count(),
        lemmas: wn.lemma_count(),
        skipped_lines: wn.stats().skipped_lines(),
    })
}

async fn categories(
    State(state): State<AppState>,
    Query(params): Query<CategoriesQuery>,
) -> Result<Response, ApiError> {
    let word = parse_word(&params.word)?;
    let pos = match params.pos.as_deref() {
        None => Pos::Noun,
        Some(raw) => Pos::from_name(raw)
            .ok_or_else(|| ApiError::bad_request(format!("invalid pos {raw:?}")))?,
    };
    let strategy = parse_strategy(params.strategy.as_deref())?;

    let engine = CategoryEngine::new(&state.wordnet);
    let found = engine.classify(word, pos, strategy);

    Ok(respond(
        &state,
        CategoriesResponse {
            word: word.to_string(),
            pos: Some(pos.to_string()),
            strategy: strategy.as_str(),
            categories: found.into_vec(),
        },
    ))
}

async fn tagged(
    State(state): State<AppState>,
    Query(params): Query<TaggedQuery>,
) -> Result<Response, ApiError> {
    let word = parse_word(&params.word)?;
    if params.tag.trim().is_empty() {
        return Err(ApiError::bad_request("tag is required"));
    }
    let strategy = parse_strategy(params.strategy.as_deref())?;

    let engine = CategoryEngine::new(&state.wordnet);
    let (pos, found) = match engine.classify_tagged(word, &params.tag, strategy) {
        Some((pos, found)) => (Some(pos.to_string()), found),
        None => (None, CategorySet::new()),
    };

    Ok(respond(
        &state,
        CategoriesResponse {
            word: word.to_string(),
            pos,
            strategy: strategy.as_str(),
            categories: found.into_vec(),
        },
    ))
}

fn parse_word(raw: &str) -> Result<&str, ApiError> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }
    if word.len() > MAX_WORD_LEN {
        return Err(ApiError::bad_request(format!(
            "word must be at most {MAX_WORD_LEN} bytes"
        )));
    }
    Ok(word)
}

fn parse_strategy(raw: Option<&str>) -> Result<Strategy, ApiError> {
    raw.map_or(Ok(Strategy::default()), str::parse)
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

// Loaded data is immutable for the life of the process.
fn respond(state: &AppState, body: CategoriesResponse) -> Response {
    if state.disable_cache {
        Json(body).into_response()
    } else {
        (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=300"),
            )],
            Json(body),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
