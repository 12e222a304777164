//! Read-only catalog endpoints backed by MongoDB.
//!
//! List endpoints return at most 10 000 documents; a warning is logged when
//! a list is cut at that cap.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::storage::catalog;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(rename = "coinKey")]
    pub coin_key: Option<String>,
}

/// GET /api/streams?coinKey= — List streams
pub async fn list_streams(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<impl IntoResponse, AppError> {
    let streams = catalog::list_streams(&state.db, query.coin_key.as_deref()).await?;
    Ok(Json(streams))
}

/// GET /api/coins — List coins
pub async fn list_coins(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(catalog::list_coins(&state.db).await?))
}

/// GET /api/coins/:key — One coin
pub async fn get_coin(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let coin = catalog::get_coin(&state.db, &key)
        .await?
        .ok_or_else(|| AppError::NotFound("Coin not found".to_string()))?;
    Ok(Json(coin))
}

/// GET /api/chains — List chains
pub async fn list_chains(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(catalog::list_chains(&state.db).await?))
}

/// GET /api/chains/:chain_id — One chain
pub async fn get_chain(
    State(state): State<AppState>,
    Path(chain_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let chain = catalog::get_chain(&state.db, &chain_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chain not found".to_string()))?;
    Ok(Json(chain))
}
