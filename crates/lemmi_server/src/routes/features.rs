//! `/api/features/:walletAddress`

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use lemmi_shared::{validation, Features};

use crate::error::ApiResult;
use crate::state::AppState;

/// Flags derived from the wallet record. Unknown wallets get all-off.
pub async fn get_features(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Features>> {
    let Path(wallet_address) = path?;
    validation::wallet_address(&wallet_address)?;
    let wallet = state.store().wallet(&wallet_address);
    Ok(Json(Features::for_wallet(wallet.as_ref())))
}
