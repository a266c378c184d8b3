//! Form extractor that reports rejections as plain-text errors

use axum::{
    extract::{FromRequest, Request},
    http::{header, Method},
    Form as AxumForm,
};

use crate::domain::FormParams;

use super::error::WebError;

/// Submitted form fields: the query string for GET, the urlencoded body
/// for POST.
///
/// A POST that declares no content type carries no form and reads as empty;
/// one that declares a non-form type is rejected.
#[derive(Debug, Clone, Default)]
pub struct FormInput(pub FormParams);

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bodyless = req.method() != Method::GET
            && req.method() != Method::HEAD
            && !req.headers().contains_key(header::CONTENT_TYPE);

        if bodyless {
            return Ok(Self(FormParams::new()));
        }

        match AxumForm::<FormParams>::from_request(req, state).await {
            Ok(AxumForm(params)) => Ok(Self(params)),
            Err(rejection) => Err(WebError::new(rejection.status(), rejection.body_text())),
        }
    }
}
