use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use tracing::debug;

use crate::{error::AppError, services::builder::TripDraft};

pub const DRAFT_COOKIE: &str = "caravan_draft";
pub const DRAFT_PATH: &str = "/build-trip";

/// The visitor's trip builder state, kept in an encrypted cookie.
pub struct DraftSession {
    jar: PrivateCookieJar,
    pub draft: TripDraft,
}

#[async_trait]
impl<S> FromRequestParts<S> for DraftSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let draft = jar
            .get(DRAFT_COOKIE)
            .and_then(|cookie| match serde_json::from_str(cookie.value()) {
                Ok(draft) => Some(draft),
                Err(err) => {
                    debug!("discarding unreadable trip draft: {err}");
                    None
                }
            })
            .unwrap_or_default();
        Ok(Self { jar, draft })
    }
}

impl DraftSession {
    pub fn persist(self) -> Result<PrivateCookieJar, AppError> {
        let value = serde_json::to_string(&self.draft)?;
        let cookie = Cookie::build((DRAFT_COOKIE, value))
            .path(DRAFT_PATH)
            .http_only(true)
            .same_site(SameSite::Lax);
        Ok(self.jar.add(cookie))
    }

    pub fn clear(self) -> PrivateCookieJar {
        self.jar.remove(Cookie::build(DRAFT_COOKIE).path(DRAFT_PATH))
    }
}
