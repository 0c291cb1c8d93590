//! Login, registration and logout.

use askama::Template;
use axum::{Form, extract::State, response::Response};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Role;
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::{RequestContext, clear_session_cookie, session_cookie};
use crate::web::flash::{Flash, FlashKind, redirect_with_cookies, redirect_with_flash};
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

/// Letters, digits, underscore and dot.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").expect("valid username regex"));

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
}

pub fn login_page(ctx: &RequestContext) -> Result<Response, AppError> {
    render(
        ctx,
        &LoginTemplate {
            layout: Layout::new(ctx, "Log in"),
        },
    )
}

pub fn register_page(ctx: &RequestContext) -> Result<Response, AppError> {
    render(
        ctx,
        &RegisterTemplate {
            layout: Layout::new(ctx, "Register"),
        },
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /login`
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state
        .auth_service
        .login(form.username.trim(), &form.password)
        .await
    {
        Ok(user) => {
            let cookie = session_cookie(
                &state.auth_service.issue_session(&user),
                state.auth_service.session_ttl_seconds(),
            );
            Ok(redirect_with_cookies(
                &Route::Home.url(),
                Flash::new(FlashKind::Success, Message::LoginSucceeded),
                &[cookie],
            ))
        }
        Err(AppError::Unauthorized { .. }) => Ok(redirect_with_flash(
            &Route::Login.url(),
            FlashKind::Danger,
            Message::LoginFailed,
        )),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: String,

    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[serde(default)]
    #[validate(must_match(other = "password"))]
    pub password_confirm: String,
}

/// `POST /register`. New accounts always get the `user` role.
pub async fn register_handler(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        tracing::debug!(errors = %errors, "registration rejected");
        return Ok(redirect_with_flash(
            &Route::Register.url(),
            FlashKind::Danger,
            Message::InvalidForm,
        ));
    }

    match state
        .auth_service
        .register(&form.username, &form.email, &form.password, Role::User)
        .await
    {
        Ok(_) => Ok(redirect_with_flash(
            &Route::Login.url(),
            FlashKind::Success,
            Message::Registered,
        )),
        Err(AppError::Conflict { .. }) => Ok(redirect_with_flash(
            &Route::Register.url(),
            FlashKind::Danger,
            Message::UsernameTaken,
        )),
        Err(e) => Err(e),
    }
}

/// `POST /logout`
pub async fn logout_handler() -> Response {
    redirect_with_cookies(
        &Route::Home.url(),
        Flash::new(FlashKind::Info, Message::LoggedOut),
        &[clear_session_cookie()],
    )
}
