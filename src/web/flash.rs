//! One-shot flash messages carried across a redirect in a cookie.
//!
//! The cookie holds `<kind>.<message key>`; the text itself is looked up in
//! the message catalogue when the next page renders, so nothing user-supplied
//! ever travels through it.

use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use std::str::FromStr;

use crate::i18n::Message;

pub const FLASH_COOKIE: &str = "flash";

/// Visual severity, matching the stylesheet's alert classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Info => "info",
            FlashKind::Warning => "warning",
            FlashKind::Danger => "danger",
        }
    }
}

impl FromStr for FlashKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(FlashKind::Success),
            "info" => Ok(FlashKind::Info),
            "warning" => Ok(FlashKind::Warning),
            "danger" => Ok(FlashKind::Danger),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: Message,
}

impl Flash {
    pub fn new(kind: FlashKind, message: Message) -> Self {
        Self { kind, message }
    }

    /// Cookie value, e.g. `danger.not_found_or_denied`.
    pub fn encode(&self) -> String {
        format!("{}.{}", self.kind.as_str(), self.message.key())
    }

    /// Parses a cookie value; unknown kinds or keys yield `None`.
    pub fn decode(value: &str) -> Option<Self> {
        let (kind, key) = value.split_once('.')?;
        Some(Self {
            kind: kind.parse().ok()?,
            message: Message::from_key(key)?,
        })
    }

    /// `Set-Cookie` value storing this flash until the next page view.
    pub fn set_cookie(&self) -> String {
        format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=300",
            self.encode()
        )
    }
}

/// `Set-Cookie` value that deletes a consumed flash.
pub fn clear_flash_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Queues a flash message and redirects (303 See Other) to `target`.
pub fn redirect_with_flash(target: &str, kind: FlashKind, message: Message) -> Response {
    redirect_with_cookies(target, Flash::new(kind, message), &[])
}

/// Like [`redirect_with_flash`], with additional `Set-Cookie` values.
pub fn redirect_with_cookies(target: &str, flash: Flash, extra_cookies: &[String]) -> Response {
    let mut response = (
        AppendHeaders([(SET_COOKIE, flash.set_cookie())]),
        Redirect::to(target),
    )
        .into_response();

    for cookie in extra_cookies {
        if let Ok(value) = cookie.parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}
