pub mod accounts;
pub mod messages;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use soapbox_service::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/messages", get(messages::get_all).post(messages::post_message))
        .route(
            "/messages/{id}",
            get(messages::get_by_id)
                .patch(messages::patch_by_id)
                .delete(messages::delete_by_id),
        )
        .route("/accounts/{account_id}/messages", get(messages::get_by_account))
        .with_state(state)
}
