//! Per-request context: who is asking and what flash is pending.
//!
//! Replaces ambient session globals with an explicit value that handlers and
//! guards receive as an extractor.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
};
use std::convert::Infallible;

use crate::domain::access::Viewer;
use crate::domain::entities::SessionUser;
use crate::i18n::Locale;
use crate::state::AppState;
use crate::web::flash::{FLASH_COOKIE, Flash};

pub const SESSION_COOKIE: &str = "session";

/// Session identity, pending flash and locale for the current request.
///
/// Extraction never fails and never touches the database: the session cookie
/// is verified by signature only.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session: Option<SessionUser>,
    pub flash: Option<Flash>,
    pub locale: Locale,
}

impl RequestContext {
    pub fn viewer(&self) -> Viewer {
        Viewer::from_session(self.session.as_ref())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(SessionUser::is_admin)
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|value| state.auth_service.verify_session(&value));

        let flash = read_cookie(&parts.headers, FLASH_COOKIE).and_then(|value| Flash::decode(&value));

        Ok(Self {
            session,
            flash,
            locale: state.locale,
        })
    }
}

/// Extracts a cookie value by name.
///
/// Handles multiple `Cookie` headers and multiple cookies per header by
/// splitting on semicolons; other cookies are ignored.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name && !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

/// `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(value: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}")
}

/// `Set-Cookie` value that ends the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
