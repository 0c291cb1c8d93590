//! Admin panel: dashboard, user roles, content moderation, badges and
//! backup/restore. Every page and action requires the admin role.

use askama::Template;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::header::CONTENT_DISPOSITION,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use super::optional_text;
use crate::domain::entities::{Badge, BadgeInput, Backup, Role};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::flash::{FlashKind, redirect_with_flash};
use crate::web::front_controller::PageQuery;
use crate::web::guard::{coerce_id, guard_badge_edit, require_current_admin};
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub users: i64,
    pub events: i64,
    pub hadiths: i64,
    pub badges: i64,
}

pub async fn dashboard_page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_current_admin(state, ctx).await {
        return Ok(redirect);
    }

    let page = DashboardTemplate {
        layout: Layout::new(ctx, "Admin dashboard"),
        users: state.users.count().await?,
        events: state.events.count().await?,
        hadiths: state.hadiths.count().await?,
        badges: state.badges.count().await?,
    };
    render(ctx, &page)
}

#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub action: String,
    pub roles: Vec<RoleOption>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub layout: Layout,
    pub users: Vec<UserRow>,
}

pub async fn users_page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_current_admin(state, ctx).await {
        return Ok(redirect);
    }

    let users = state
        .users
        .list()
        .await?
        .into_iter()
        .map(|user| UserRow {
            action: format!("/admin/users/{}/role", user.id),
            roles: Role::ALL
                .iter()
                .map(|role| RoleOption {
                    value: role.as_str(),
                    selected: *role == user.role,
                })
                .collect(),
            id: user.id,
            username: user.username,
            email: user.email,
        })
        .collect();

    let page = UsersTemplate {
        layout: Layout::new(ctx, "Users"),
        users,
    };
    render(ctx, &page)
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    #[serde(default)]
    pub role: String,
}

/// `POST /admin/users/{id}/role`
///
/// Admins cannot change their own role, so the panel always keeps at least
/// one admin.
pub async fn update_role_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Result<Response, AppError> {
    let session = match require_current_admin(&state, &ctx).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let target = Route::AdminUsers.url();
    let id = coerce_id(Some(&raw_id));

    let Ok(role) = form.role.parse::<Role>() else {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::InvalidForm));
    };
    if id == session.user_id {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::InvalidForm));
    }

    if !state.users.update_role(id, role).await? {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::UserNotFound));
    }

    tracing::info!(admin_id = session.user_id, user_id = id, role = %role, "role changed");
    Ok(redirect_with_flash(&target, FlashKind::Success, Message::RoleUpdated))
}

/// Record types an admin can delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Event,
    Hadith,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Event => "event",
            ContentKind::Hadith => "hadith",
        }
    }
}

impl FromStr for ContentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(ContentKind::Event),
            "hadith" => Ok(ContentKind::Hadith),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentRow {
    pub kind: &'static str,
    pub title: String,
    pub href: String,
    pub delete_action: String,
}

impl ContentRow {
    fn new(kind: ContentKind, id: i64, title: String, view: Route) -> Self {
        Self {
            kind: kind.as_str(),
            title,
            href: view.url_for_id(id),
            delete_action: format!("/admin/content/{}/{id}/delete", kind.as_str()),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/content.html")]
pub struct ContentTemplate {
    pub layout: Layout,
    pub rows: Vec<ContentRow>,
}

pub async fn content_page(state: &AppState, ctx: &RequestContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_current_admin(state, ctx).await {
        return Ok(redirect);
    }

    let events = state.events.list(None).await?;
    let hadiths = state.hadiths.list(None).await?;

    let rows = events
        .into_iter()
        .map(|e| ContentRow::new(ContentKind::Event, e.id, e.title, Route::ViewEvent))
        .chain(hadiths.into_iter().map(|h| {
            let title = h.excerpt(80);
            ContentRow::new(ContentKind::Hadith, h.id, title, Route::ViewHadith)
        }))
        .collect();

    let page = ContentTemplate {
        layout: Layout::new(ctx, "Content"),
        rows,
    };
    render(ctx, &page)
}

/// `POST /admin/content/{kind}/{id}/delete`
pub async fn delete_content_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((raw_kind, raw_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let session = match require_current_admin(&state, &ctx).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let target = Route::AdminContent.url();
    let id = coerce_id(Some(&raw_id));

    let Ok(kind) = raw_kind.parse::<ContentKind>() else {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::InvalidForm));
    };

    let deleted = match kind {
        ContentKind::Event => state.events.delete(id).await?,
        ContentKind::Hadith => state.hadiths.delete(id).await?,
    };

    if !deleted {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::ItemNotFound));
    }

    tracing::info!(admin_id = session.user_id, kind = kind.as_str(), id, "content deleted");
    Ok(redirect_with_flash(&target, FlashKind::Success, Message::ContentDeleted))
}

#[derive(Template)]
#[template(path = "admin/badges.html")]
pub struct BadgesTemplate {
    pub layout: Layout,
    pub badges: Vec<Badge>,
    /// True when `badge_to_edit` is set; the form is then prefilled.
    pub editing: bool,
    pub form: BadgeForm,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BadgeForm {
    /// Empty for a new badge.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub icon: String,
}

impl BadgeForm {
    fn from_badge(badge: &Badge) -> Self {
        Self {
            id: badge.id.to_string(),
            name: badge.name.clone(),
            description: badge.description.clone(),
            icon: badge.icon.clone().unwrap_or_default(),
        }
    }

    pub fn parse(&self) -> Option<BadgeInput> {
        self.validate().ok()?;
        let name = optional_text(&self.name)?;

        Some(BadgeInput {
            name,
            description: self.description.trim().to_string(),
            icon: optional_text(&self.icon),
        })
    }
}

/// Badge administration.
///
/// With `edit_badge_id` present, the badge guard runs first: it requires
/// the admin role (ownership plays no part) and redirects back here when the
/// requester is not an admin or the badge does not exist.
pub async fn badges_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let badge_to_edit = match query.edit_badge_id.as_deref() {
        Some(raw) => {
            let id = coerce_id(Some(raw));
            match guard_badge_edit(ctx, id, || state.badges.find_by_id(id)).await {
                Ok(badge) => Some(badge),
                Err(redirect) => return Ok(redirect),
            }
        }
        None => None,
    };

    if let Err(redirect) = require_current_admin(state, ctx).await {
        return Ok(redirect);
    }

    let badges = state.badges.list().await?;

    let page = BadgesTemplate {
        layout: Layout::new(ctx, "Badges"),
        editing: badge_to_edit.is_some(),
        form: badge_to_edit
            .as_ref()
            .map(BadgeForm::from_badge)
            .unwrap_or_default(),
        badges,
    };
    render(ctx, &page)
}

/// `POST /admin/badges`: creates a badge, or updates one when `id` is set.
pub async fn save_badge_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<BadgeForm>,
) -> Result<Response, AppError> {
    if let Err(redirect) = require_current_admin(&state, &ctx).await {
        return Ok(redirect);
    }
    let target = Route::AdminBadges.url();

    let Some(input) = form.parse() else {
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::InvalidForm));
    };

    let saved = if form.id.trim().is_empty() {
        state.badges.create(input).await.map(Some)
    } else {
        state.badges.update(coerce_id(Some(&form.id)), input).await
    };

    let badge = match saved {
        Ok(Some(badge)) => badge,
        Ok(None) => {
            return Ok(redirect_with_flash(
                &target,
                FlashKind::Danger,
                Message::BadgeNotFound,
            ));
        }
        Err(AppError::Conflict { .. }) => {
            return Ok(redirect_with_flash(
                &target,
                FlashKind::Danger,
                Message::BadgeNameTaken,
            ));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(badge_id = badge.id, "badge saved");
    Ok(redirect_with_flash(&target, FlashKind::Success, Message::BadgeSaved))
}

#[derive(Template)]
#[template(path = "admin/backup_restore.html")]
pub struct BackupRestoreTemplate {
    pub layout: Layout,
}

pub async fn backup_restore_page(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<Response, AppError> {
    if let Err(redirect) = require_current_admin(state, ctx).await {
        return Ok(redirect);
    }

    render(
        ctx,
        &BackupRestoreTemplate {
            layout: Layout::new(ctx, "Backup and restore"),
        },
    )
}

/// `GET /admin/backup`: JSON snapshot of events, hadiths and badges.
pub async fn backup_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let session = match require_current_admin(&state, &ctx).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };

    let backup = state.backups.export().await?;
    tracing::info!(
        admin_id = session.user_id,
        events = backup.events.len(),
        hadiths = backup.hadiths.len(),
        badges = backup.badges.len(),
        "backup exported"
    );

    let disposition = format!(
        "attachment; filename=\"ilm-portal-backup-{}.json\"",
        Utc::now().format("%Y%m%d")
    );
    Ok(([(CONTENT_DISPOSITION, disposition)], Json(backup)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct RestoreForm {
    #[serde(default)]
    pub backup: String,
}

/// `POST /admin/restore`: replaces events, hadiths and badges.
pub async fn restore_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<RestoreForm>,
) -> Result<Response, AppError> {
    let session = match require_current_admin(&state, &ctx).await {
        Ok(session) => session,
        Err(redirect) => return Ok(redirect),
    };
    let target = Route::AdminBackupRestore.url();

    let backup = match serde_json::from_str::<Backup>(&form.backup) {
        Ok(backup) if backup.is_supported() => backup,
        Ok(backup) => {
            tracing::warn!(version = backup.version, "unsupported backup version");
            return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::RestoreInvalid));
        }
        Err(e) => {
            tracing::warn!(error = %e, "malformed backup");
            return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::RestoreInvalid));
        }
    };

    if let Err(problem) = backup.check() {
        tracing::warn!(%problem, "backup rejected");
        return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::RestoreInvalid));
    }

    // Records whose author is not an account here are handed to the admin
    // performing the restore.
    match state.backups.restore(backup, session.user_id).await {
        Ok(()) => {}
        Err(e @ (AppError::Validation { .. } | AppError::Conflict { .. })) => {
            tracing::warn!(error = %e, "backup violates a database constraint");
            return Ok(redirect_with_flash(&target, FlashKind::Danger, Message::RestoreInvalid));
        }
        Err(e) => return Err(e),
    }
    tracing::info!(admin_id = session.user_id, "backup restored");

    Ok(redirect_with_flash(&target, FlashKind::Success, Message::RestoreSucceeded))
}
