//! `/api/wallet/:address`

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use lemmi_shared::{validation, UpsertWalletRequest, Wallet};

use crate::error::{ApiError, ApiResult, Resource};
use crate::state::AppState;

/// Returns the wallet or 404.
pub async fn get_wallet(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Wallet>> {
    let Path(address) = path?;
    validation::wallet_address(&address)?;
    state
        .store()
        .wallet(&address)
        .map(Json)
        .ok_or(ApiError::NotFound(Resource::Wallet))
}

/// Creates the wallet on first post, otherwise updates the given fields.
pub async fn upsert_wallet(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpsertWalletRequest>, JsonRejection>,
) -> ApiResult<Json<Wallet>> {
    let Path(address) = path?;
    validation::wallet_address(&address)?;
    let Json(update) = body?;
    update.validate()?;
    tracing::debug!(%address, ?update, "wallet upsert");
    Ok(Json(state.store().upsert_wallet(&address, &update)))
}
