//! `/api/skills/:walletAddress`

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use lemmi_shared::{validation, SkillReward, UpsertSkillsRequest};

use crate::error::{ApiError, ApiResult, Resource};
use crate::state::AppState;

/// Skill reward of a wallet or 404.
pub async fn get_skills(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<SkillReward>> {
    let Path(wallet_address) = path?;
    validation::wallet_address(&wallet_address)?;
    state
        .store()
        .skill_reward(&wallet_address)
        .map(Json)
        .ok_or(ApiError::NotFound(Resource::SkillReward))
}

/// Replaces the skill reward of a wallet.
pub async fn upsert_skills(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpsertSkillsRequest>, JsonRejection>,
) -> ApiResult<Json<SkillReward>> {
    let Path(wallet_address) = path?;
    validation::wallet_address(&wallet_address)?;
    let Json(update) = body?;
    update.validate()?;
    Ok(Json(state.store().upsert_skills(&wallet_address, &update)))
}
