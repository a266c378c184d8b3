//! Handler results

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// What a page handler produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    /// `200` with a rendered document
    Page(String),
    /// `302` to the given location, no body
    Redirect(String),
    /// `404` with a rendered document
    NotFound(String),
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Page(html) => (StatusCode::OK, Html(html)).into_response(),
            Self::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            Self::NotFound(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        }
    }
}
