use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use crate::db::StoreError;
use crate::error::ApiError;
use crate::models::{CreatePlayer, Player};
use crate::routes::AppState;

const NAME_REQUIRED: &str = "Name is required";
const PLAYER_NOT_FOUND: &str = "Player not found";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

// GET /players - List all players
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.store.all().await.map_err(|err| {
        tracing::error!(error = %err, "Error querying players from database");
        ApiError::Internal("Failed to retrieve players")
    })?;

    Ok(Json(players))
}

// POST /player - Add a new player
pub async fn create_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    // Decoded whatever the Content-Type says.
    let payload = CreatePlayer::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "Invalid input received for new player");
        ApiError::BadRequest(NAME_REQUIRED)
    })?;

    let new_player = payload.validate().map_err(|err| {
        tracing::warn!(error = %err, "Invalid input received for new player");
        ApiError::BadRequest(NAME_REQUIRED)
    })?;

    let player = state.store.insert(&new_player).await.map_err(|err| {
        tracing::error!(name = new_player.name(), error = %err, "Failed to add player to database");
        ApiError::Internal("Failed to add player")
    })?;

    tracing::info!(id = player.id, name = %player.name, "Player added");
    Ok((StatusCode::CREATED, Json(player)))
}

// DELETE /player/{id} - Remove a player by id
pub async fn delete_player(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    // A non-numeric id can't match any row.
    let Path(id) = id.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Player not found for malformed id");
        ApiError::NotFound(PLAYER_NOT_FOUND)
    })?;

    let player = state.store.find(id).await.map_err(|err| delete_error(id, err))?;
    state.store.delete(&player).await.map_err(|err| delete_error(id, err))?;

    tracing::info!(id, "Player deleted");
    Ok(Json(MessageResponse { message: "Player deleted" }))
}

fn delete_error(id: i64, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => {
            tracing::warn!(id, "Player not found");
            ApiError::NotFound(PLAYER_NOT_FOUND)
        }
        StoreError::Storage(err) => {
            tracing::error!(id, error = %err, "Failed to delete player");
            ApiError::Internal("Failed to delete player")
        }
    }
}
