use axum::{extract::State, http::Method};
use tracing::{info, warn};

use crate::web::site::Route;
use crate::web::state::AppState;
use crate::web::types::{FormInput, PageResponse, WebError};
use crate::web::views::SignInView;
use crate::web::visitor::Visitor;

/// GET|POST /sign-in
///
/// `login` may hold either the account login or its email.
pub async fn sign_in(
    State(state): State<AppState>,
    method: Method,
    mut visitor: Visitor,
    FormInput(params): FormInput,
) -> Result<PageResponse, WebError> {
    let mut error = false;

    if method == Method::POST {
        match (params.get("login"), params.get("password")) {
            (Some(login), Some(password)) => {
                match state.accounts.authenticate(login, password).await? {
                    Some(user) => {
                        visitor.sign_in(&user).await?;
                        info!(user_id = %user.id(), login = %user.login(), "User signed in");
                        return Ok(state.redirect(Route::Home));
                    }
                    None => {
                        warn!(login = %login, "Sign-in rejected");
                        error = true;
                    }
                }
            }
            _ => error = true,
        }
    }

    state.page(&SignInView { error }, &visitor)
}
