use axum::extract::State;
use tracing::info;

use crate::web::site::Route;
use crate::web::state::AppState;
use crate::web::types::{PageResponse, WebError};
use crate::web::visitor::Visitor;

/// ANY /sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    mut visitor: Visitor,
) -> Result<PageResponse, WebError> {
    if let Some(user) = visitor.current_user() {
        info!(user_id = %user.id, login = %user.login, "User signed out");
    }

    visitor.sign_out().await?;

    Ok(state.redirect(Route::Home))
}
