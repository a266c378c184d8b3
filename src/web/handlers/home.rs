use axum::extract::State;

use crate::web::state::AppState;
use crate::web::types::{PageResponse, WebError};
use crate::web::views::MainView;
use crate::web::visitor::Visitor;

/// GET /
pub async fn home(State(state): State<AppState>, visitor: Visitor) -> Result<PageResponse, WebError> {
    state.page(&MainView, &visitor)
}
