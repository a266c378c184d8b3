//! The person behind a request, as told by their session

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::{session, Session};
use tracing::warn;

use crate::domain::{CurrentUser, User};

use super::types::WebError;

/// Session key holding the signed-in account
pub const CURRENT_USER_KEY: &str = "current_user";

/// Per-request view of the session.
///
/// Loaded once by the extractor; handlers read `current_user` from here
/// instead of touching the session directly.
#[derive(Debug, Clone)]
pub struct Visitor {
    session: Session,
    current_user: Option<CurrentUser>,
}

impl Visitor {
    pub async fn load(session: Session) -> Result<Self, WebError> {
        let current_user = match session.get::<CurrentUser>(CURRENT_USER_KEY).await {
            Ok(user) => user,
            Err(session::Error::SerdeJson(e)) => {
                warn!(error = %e, "Discarding unreadable session identity");
                session.remove_value(CURRENT_USER_KEY).await?;
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            session,
            current_user,
        })
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Make `user` the session identity under a fresh session id
    pub async fn sign_in(&mut self, user: &User) -> Result<(), WebError> {
        let current = CurrentUser::from(user);

        self.session.cycle_id().await?;
        self.session.insert(CURRENT_USER_KEY, &current).await?;
        self.current_user = Some(current);

        Ok(())
    }

    /// Forget the session identity; a no-op for anonymous visitors
    pub async fn sign_out(&mut self) -> Result<(), WebError> {
        if self.current_user.take().is_some() {
            self.session.remove_value(CURRENT_USER_KEY).await?;
        }

        Ok(())
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, message)| WebError::new(status, message))?;

        Self::load(session).await
    }
}
