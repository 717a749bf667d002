use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

use soapbox_service::AccountError;
use soapbox_types::api::Credentials;
use soapbox_types::models::Account;

use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, StatusCode> {
    state.accounts.register(req).map(Json).map_err(status_for)
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<Account>, StatusCode> {
    state.accounts.login(req).map(Json).map_err(status_for)
}

fn status_for(err: AccountError) -> StatusCode {
    match err {
        AccountError::InvalidLogin => StatusCode::UNAUTHORIZED,
        AccountError::Storage(e) => {
            // Operator-facing detail stays in the log; the client gets a bare 500.
            error!("account storage failure: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    }
}
