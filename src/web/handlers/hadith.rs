//! Hadith collection: listing, detail, add and edit forms, and their POSTs.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;
use validator::Validate;

use super::{ListItem, optional_text};
use crate::domain::access::can_edit;
use crate::domain::entities::{BookmarkKind, Hadith, HadithInput};
use crate::error::AppError;
use crate::i18n::Message;
use crate::state::AppState;
use crate::web::context::RequestContext;
use crate::web::flash::{FlashKind, redirect_with_flash};
use crate::web::front_controller::PageQuery;
use crate::web::guard::{coerce_id, guard_edit, require_login};
use crate::web::layout::{Layout, render};
use crate::web::route::Route;

#[derive(Template)]
#[template(path = "hadiths.html")]
pub struct HadithsTemplate {
    pub layout: Layout,
    pub search: String,
    pub items: Vec<ListItem>,
    pub can_add: bool,
}

#[derive(Template)]
#[template(path = "hadith_view.html")]
pub struct HadithViewTemplate {
    pub layout: Layout,
    pub hadith: Hadith,
    pub has_grade: bool,
    pub can_edit: bool,
    pub edit_href: String,
    pub can_bookmark: bool,
    pub bookmark_kind: &'static str,
}

#[derive(Template)]
#[template(path = "hadith_form.html")]
pub struct HadithFormTemplate {
    pub layout: Layout,
    pub action: String,
    pub form: HadithForm,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HadithForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 5000))]
    pub text: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub narrator: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub source: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub grade: String,
}

impl HadithForm {
    fn from_hadith(hadith: &Hadith) -> Self {
        Self {
            text: hadith.text.clone(),
            narrator: hadith.narrator.clone(),
            source: hadith.source.clone(),
            grade: hadith.grade.clone().unwrap_or_default(),
        }
    }

    pub fn parse(&self) -> Option<HadithInput> {
        self.validate().ok()?;

        let text = self.text.trim();
        let narrator = self.narrator.trim();
        let source = self.source.trim();
        if text.is_empty() || narrator.is_empty() || source.is_empty() {
            return None;
        }

        Some(HadithInput {
            text: text.to_string(),
            narrator: narrator.to_string(),
            source: source.to_string(),
            grade: optional_text(&self.grade),
        })
    }
}

pub async fn list_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let search = query.search();
    let hadiths = state.hadiths.list(search.clone()).await?;

    let page = HadithsTemplate {
        layout: Layout::new(ctx, "Hadith"),
        search: search.unwrap_or_default(),
        items: hadiths.iter().map(ListItem::from).collect(),
        can_add: ctx.session.is_some(),
    };
    render(ctx, &page)
}

pub async fn view_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let id = coerce_id(query.id.as_deref());

    let Some(hadith) = state.hadiths.find_by_id(id).await? else {
        return Ok(redirect_with_flash(
            &Route::Hadith.url(),
            FlashKind::Danger,
            Message::HadithNotFound,
        ));
    };

    let page = HadithViewTemplate {
        layout: Layout::new(ctx, hadith.excerpt(40)),
        has_grade: hadith.grade.is_some(),
        can_edit: can_edit(&ctx.viewer(), &hadith),
        edit_href: Route::EditHadith.url_for_id(hadith.id),
        can_bookmark: ctx.session.is_some(),
        bookmark_kind: BookmarkKind::Hadith.as_str(),
        hadith,
    };
    render(ctx, &page)
}

pub fn add_page(ctx: &RequestContext) -> Result<Response, AppError> {
    if let Err(redirect) = require_login(ctx) {
        return Ok(redirect);
    }

    let page = HadithFormTemplate {
        layout: Layout::new(ctx, "Add hadith"),
        action: "/hadiths".to_string(),
        form: HadithForm::default(),
    };
    render(ctx, &page)
}

pub async fn edit_page(
    state: &AppState,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Response, AppError> {
    let id = coerce_id(query.id.as_deref());

    let hadith = match guard_edit(ctx, Route::Hadith, id, || state.hadiths.find_by_id(id)).await {
        Ok(hadith) => hadith,
        Err(redirect) => return Ok(redirect),
    };

    let page = HadithFormTemplate {
        layout: Layout::new(ctx, "Edit hadith"),
        action: format!("/hadiths/{}", hadith.id),
        form: HadithForm::from_hadith(&hadith),
    };
    render(ctx, &page)
}

/// `POST /hadiths`
pub async fn create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<HadithForm>,
) -> Result<Response, AppError> {
    let owner_id = match require_login(&ctx) {
        Ok(session) => session.user_id,
        Err(redirect) => return Ok(redirect),
    };

    let Some(input) = form.parse() else {
        return Ok(redirect_with_flash(
            &Route::AddHadith.url(),
            FlashKind::Danger,
            Message::InvalidForm,
        ));
    };

    let hadith = state.hadiths.create(owner_id, input).await?;
    tracing::info!(hadith_id = hadith.id, owner_id, "hadith created");

    Ok(redirect_with_flash(
        &Route::ViewHadith.url_for_id(hadith.id),
        FlashKind::Success,
        Message::HadithSaved,
    ))
}

/// `POST /hadiths/{id}`
pub async fn update_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
    Form(form): Form<HadithForm>,
) -> Result<Response, AppError> {
    let id = coerce_id(Some(&raw_id));

    if let Err(redirect) = guard_edit(&ctx, Route::Hadith, id, || state.hadiths.find_by_id(id)).await
    {
        return Ok(redirect);
    }

    let Some(input) = form.parse() else {
        return Ok(redirect_with_flash(
            &Route::EditHadith.url_for_id(id),
            FlashKind::Danger,
            Message::InvalidForm,
        ));
    };

    match state.hadiths.update(id, input).await? {
        Some(hadith) => {
            tracing::info!(hadith_id = hadith.id, user_id = ?ctx.user_id(), "hadith updated");
            Ok(redirect_with_flash(
                &Route::ViewHadith.url_for_id(hadith.id),
                FlashKind::Success,
                Message::HadithSaved,
            ))
        }
        None => Ok(redirect_with_flash(
            &Route::Hadith.url(),
            FlashKind::Danger,
            Message::HadithNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_text_narrator_source() {
        let form = HadithForm {
            text: "Actions are judged by intentions".to_string(),
            narrator: "Umar ibn al-Khattab".to_string(),
            source: "Bukhari 1".to_string(),
            grade: " ".to_string(),
        };
        let input = form.parse().unwrap();
        assert_eq!(input.grade, None);

        let blank_narrator = HadithForm {
            narrator: "   ".to_string(),
            ..form.clone()
        };
        assert!(blank_narrator.parse().is_none());

        let missing_source = HadithForm {
            source: String::new(),
            ..form
        };
        assert!(missing_source.parse().is_none());
    }
}
