use axum::{extract::State, http::Method};

use crate::domain::FieldErrors;
use crate::infrastructure::user::Registration;
use crate::web::site::Route;
use crate::web::state::AppState;
use crate::web::types::{FormInput, PageResponse, WebError};
use crate::web::views::SignUpView;
use crate::web::visitor::Visitor;

/// GET|POST /sign-up
///
/// A successful submission signs the new account in and redirects home.
/// Anything else shows the form, re-filled with the submitted values.
pub async fn sign_up(
    State(state): State<AppState>,
    method: Method,
    mut visitor: Visitor,
    FormInput(params): FormInput,
) -> Result<PageResponse, WebError> {
    let errors = if method == Method::POST {
        match state.accounts.register(&params).await? {
            Registration::Created(user) => {
                visitor.sign_in(&user).await?;
                return Ok(state.redirect(Route::Home));
            }
            Registration::Rejected(errors) => errors,
        }
    } else {
        FieldErrors::new()
    };

    let countries = state.accounts.countries().await?;

    state.page(
        &SignUpView {
            countries: &countries,
            errors: &errors,
            params: &params,
        },
        &visitor,
    )
}
