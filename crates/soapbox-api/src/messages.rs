use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use soapbox_service::MessageError;
use soapbox_types::api::{MessagePatch, NewMessage};
use soapbox_types::models::Message;

use crate::AppState;

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Message>>, StatusCode> {
    state.messages.list_all().map(Json).map_err(internal)
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    let found = state.messages.get_by_id(id).map_err(internal)?;
    Ok(okay_or_empty(found))
}

pub async fn post_message(
    State(state): State<AppState>,
    Json(req): Json<NewMessage>,
) -> Result<Json<Message>, StatusCode> {
    state.messages.post(req).map(Json).map_err(status_for)
}

pub async fn patch_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<MessagePatch>,
) -> Result<Json<Message>, StatusCode> {
    state.messages.patch_by_id(id, patch).map(Json).map_err(status_for)
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, StatusCode> {
    let deleted = state.messages.delete_by_id(id).map_err(internal)?;
    Ok(okay_or_empty(deleted))
}

pub async fn get_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    state.messages.list_by_author(account_id).map(Json).map_err(internal)
}

/// Absent records answer 200 with an empty body, not 404 and not `null`.
fn okay_or_empty(message: Option<Message>) -> Response {
    match message {
        Some(found) => Json(found).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

fn status_for(err: MessageError) -> StatusCode {
    match err {
        MessageError::Storage(e) => {
            error!("message storage failure: {e:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

fn internal(err: anyhow::Error) -> StatusCode {
    error!("message storage failure: {err:#}");
    StatusCode::INTERNAL_SERVER_ERROR
}
