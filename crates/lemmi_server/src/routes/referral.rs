//! `/api/referral`
//!
//! Both parameterised routes share the `:key` segment name; it holds a
//! wallet address for the lookup and a code for the click.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use lemmi_shared::{validation, CreateReferralRequest, Referral};

use crate::error::{ApiError, ApiResult, Resource};
use crate::state::AppState;

/// Returns the wallet's referral, creating it on first call.
pub async fn create_referral(
    State(state): State<AppState>,
    body: Result<Json<CreateReferralRequest>, JsonRejection>,
) -> ApiResult<Json<Referral>> {
    let Json(request) = body?;
    request.validate()?;
    let referral = state.store().get_or_create_referral(&request.wallet_address)?;
    Ok(Json(referral))
}

/// Referral owned by a wallet.
pub async fn get_referral(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Referral>> {
    let Path(wallet_address) = path?;
    validation::wallet_address(&wallet_address)?;
    state
        .store()
        .referral_by_wallet(&wallet_address)
        .map(Json)
        .ok_or(ApiError::NotFound(Resource::Referral))
}

/// Counts one click on a code.
pub async fn record_click(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Referral>> {
    let Path(code) = path?;
    validation::referral_code(&code)?;
    let referral = state
        .store()
        .record_click(&code)
        .ok_or(ApiError::NotFound(Resource::Referral))?;
    tracing::debug!(%code, clicks = referral.click_count, "referral click");
    Ok(Json(referral))
}
