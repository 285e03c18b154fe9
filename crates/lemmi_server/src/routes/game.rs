//! `/api/game`

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lemmi_shared::{validation, GameScore, SubmitScoreRequest};

use crate::error::ApiResult;
use crate::state::AppState;

/// Appends a finished game. Answers 201 with the stored record.
pub async fn submit_score(
    State(state): State<AppState>,
    body: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GameScore>)> {
    let Json(request) = body?;
    request.validate()?;
    let record = state
        .store()
        .add_score(&request.wallet_address, &request.game, request.score);
    tracing::info!(
        wallet = %record.wallet_address,
        game = %record.game,
        score = record.score,
        "score submitted"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Scores of a wallet in one game, highest first.
pub async fn list_scores(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Json<Vec<GameScore>>> {
    let Path((wallet_address, game)) = path?;
    validation::wallet_address(&wallet_address)?;
    validation::game_name(&game)?;
    Ok(Json(state.store().scores(&wallet_address, &game)))
}
