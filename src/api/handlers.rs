use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Genre, GenreDirectory, Item, ItemId, Strategy, TagId},
    services::engine::{EngineSnapshot, EngineStatus, Recommendations},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TogglePreferenceRequest {
    pub tag_id: TagId,
}

#[derive(Debug, Deserialize)]
pub struct SelectStrategyRequest {
    pub strategy: Strategy,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Tag id with its display name
#[derive(Debug, Serialize)]
pub struct GenreLabel {
    pub id: TagId,
    pub name: String,
}

impl GenreLabel {
    fn new(id: TagId, genres: &GenreDirectory) -> Self {
        Self {
            id,
            name: genres.label(id).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub title: String,
    pub overview: String,
    pub release_date: Option<NaiveDate>,
    pub quality_score: f64,
    pub genres: Vec<GenreLabel>,
    pub poster_ref: Option<String>,
    pub backdrop_ref: Option<String>,
    pub runtime_minutes: Option<u32>,
}

impl ItemResponse {
    fn new(item: &Item, genres: &GenreDirectory) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            overview: item.overview.clone(),
            release_date: item.release_date,
            quality_score: item.quality_score,
            genres: item
                .category_tags
                .iter()
                .map(|tag| GenreLabel::new(*tag, genres))
                .collect(),
            poster_ref: item.poster_ref.clone(),
            backdrop_ref: item.backdrop_ref.clone(),
            runtime_minutes: item.runtime_minutes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub sequence: u64,
    pub strategy: Strategy,
    pub preferences: Vec<GenreLabel>,
    pub items: Vec<ItemResponse>,
}

impl RecommendationsResponse {
    fn new(recommendations: &Recommendations, genres: &GenreDirectory) -> Self {
        Self {
            sequence: recommendations.sequence,
            strategy: recommendations.strategy,
            preferences: recommendations
                .preferences
                .iter()
                .map(|tag| GenreLabel::new(tag, genres))
                .collect(),
            items: recommendations
                .items
                .iter()
                .map(|item| ItemResponse::new(item, genres))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub strategy: Strategy,
    pub description: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct EngineStatusResponse {
    pub status: EngineStatus,
    pub strategy: Strategy,
    pub preferences: Vec<GenreLabel>,
    pub issued: u64,
    pub published: u64,
    pub discarded: u64,
}

impl EngineStatusResponse {
    fn new(snapshot: EngineSnapshot, genres: &GenreDirectory) -> Self {
        Self {
            status: snapshot.status,
            strategy: snapshot.strategy,
            preferences: snapshot
                .preferences
                .iter()
                .map(|tag| GenreLabel::new(tag, genres))
                .collect(),
            issued: snapshot.issued,
            published: snapshot.published,
            discarded: snapshot.discarded,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Get the full catalog in catalog order
pub async fn get_catalog(State(state): State<AppState>) -> Json<Vec<ItemResponse>> {
    let items = state
        .catalog
        .items()
        .iter()
        .map(|item| ItemResponse::new(item, &state.genres))
        .collect();
    Json(items)
}

/// Get the item highlighted on the landing page
pub async fn get_featured(State(state): State<AppState>) -> AppResult<Json<ItemResponse>> {
    let item = state
        .catalog
        .featured()
        .ok_or_else(|| AppError::NotFound("Catalog is empty".to_string()))?;
    Ok(Json(ItemResponse::new(item, &state.genres)))
}

/// Search titles, narrowed to the currently selected genres
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<ItemResponse>> {
    let preferences = state.engine.preferences().await;
    let items = state
        .catalog
        .search(&params.q, &preferences)
        .into_iter()
        .map(|item| ItemResponse::new(item, &state.genres))
        .collect();
    Json(items)
}

/// Get all genres that can be selected
pub async fn get_genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.genres.genres().to_vec())
}

/// Get the available strategies and which one is active
pub async fn get_strategies(State(state): State<AppState>) -> Json<Vec<StrategyResponse>> {
    let active = state.engine.strategy().await;
    let strategies = Strategy::ALL
        .into_iter()
        .map(|strategy| StrategyResponse {
            strategy,
            description: strategy.description(),
            active: strategy == active,
        })
        .collect();
    Json(strategies)
}

/// Get the selected genres in selection order
pub async fn get_preferences(State(state): State<AppState>) -> Json<Vec<GenreLabel>> {
    let preferences = state.engine.preferences().await;
    let labels = preferences
        .iter()
        .map(|tag| GenreLabel::new(tag, &state.genres))
        .collect();
    Json(labels)
}

/// Toggle a genre and return the recommendations that follow from it
pub async fn toggle_preference(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<TogglePreferenceRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    if !state.is_known_tag(request.tag_id) {
        return Err(AppError::InvalidInput(format!(
            "Unknown genre id {}",
            request.tag_id
        )));
    }

    let outcome = state.engine.toggle_preference(request.tag_id).await;
    tracing::info!(
        request_id = %request_id,
        tag_id = request.tag_id,
        selected = outcome.selected,
        sequence = outcome.sequence,
        "Preference toggled"
    );

    let recommendations = state.engine.wait_for(outcome.sequence).await?;
    Ok(Json(RecommendationsResponse::new(&recommendations, &state.genres)))
}

/// Switch the scoring strategy and return the resulting recommendations
pub async fn select_strategy(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SelectStrategyRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let sequence = state.engine.select_strategy(request.strategy).await;
    tracing::info!(
        request_id = %request_id,
        strategy = %request.strategy,
        sequence,
        "Strategy selected"
    );

    let recommendations = state.engine.wait_for(sequence).await?;
    Ok(Json(RecommendationsResponse::new(&recommendations, &state.genres)))
}

/// Get the latest published recommendations
pub async fn get_recommendations(State(state): State<AppState>) -> Json<RecommendationsResponse> {
    let recommendations = state.engine.current();
    Json(RecommendationsResponse::new(&recommendations, &state.genres))
}

/// Get the engine's analysis status
pub async fn get_engine_status(State(state): State<AppState>) -> Json<EngineStatusResponse> {
    let snapshot = state.engine.snapshot().await;
    Json(EngineStatusResponse::new(snapshot, &state.genres))
}
