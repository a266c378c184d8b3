use axum::{extract::State, http::Uri};
use tracing::debug;

use crate::web::state::AppState;
use crate::web::types::{PageResponse, WebError};
use crate::web::views::NotFoundView;
use crate::web::visitor::Visitor;

/// Fallback for every unmatched path
pub async fn not_found(
    State(state): State<AppState>,
    uri: Uri,
    visitor: Visitor,
) -> Result<PageResponse, WebError> {
    debug!(path = %uri.path(), "No route matched");

    let html = state.renderer.render(&NotFoundView, visitor.current_user())?;
    Ok(PageResponse::NotFound(html))
}
