#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;

use ilm_portal::application::services::AuthService;
use ilm_portal::domain::entities::{
    Ayah, Backup, Badge, BadgeInput, Bookmark, BookmarkKind, Event, EventInput, Hadith,
    HadithInput, NewUser, Role, User,
};
use ilm_portal::domain::repositories::{
    BackupRepository, BadgeRepository, BookmarkRepository, EventRepository, HadithRepository,
    QuranRepository, UserRepository,
};
use ilm_portal::error::AppError;
use ilm_portal::i18n::Locale;
use ilm_portal::state::AppState;
use ilm_portal::web::routes;

pub const TEST_SECRET: &str = "test-signing-secret-that-is-long-enough";

mock! {
    pub Users {}
    #[async_trait]
    impl UserRepository for Users {
        async fn create(&self, new_user: NewUser) -> Result<User, AppError>;
        async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
        async fn list(&self) -> Result<Vec<User>, AppError>;
        async fn update_role(&self, id: i64, role: Role) -> Result<bool, AppError>;
        async fn count(&self) -> Result<i64, AppError>;
    }
}

mock! {
    pub Events {}
    #[async_trait]
    impl EventRepository for Events {
        async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
        async fn list(&self, search: Option<String>) -> Result<Vec<Event>, AppError>;
        async fn recent(&self, limit: i64) -> Result<Vec<Event>, AppError>;
        async fn timeline(&self, century: Option<i32>) -> Result<Vec<Event>, AppError>;
        async fn with_coordinates(&self) -> Result<Vec<Event>, AppError>;
        async fn create(&self, owner_id: i64, input: EventInput) -> Result<Event, AppError>;
        async fn update(&self, id: i64, input: EventInput) -> Result<Option<Event>, AppError>;
        async fn delete(&self, id: i64) -> Result<bool, AppError>;
        async fn count(&self) -> Result<i64, AppError>;
    }
}

mock! {
    pub Hadiths {}
    #[async_trait]
    impl HadithRepository for Hadiths {
        async fn find_by_id(&self, id: i64) -> Result<Option<Hadith>, AppError>;
        async fn list(&self, search: Option<String>) -> Result<Vec<Hadith>, AppError>;
        async fn recent(&self, limit: i64) -> Result<Vec<Hadith>, AppError>;
        async fn create(&self, owner_id: i64, input: HadithInput) -> Result<Hadith, AppError>;
        async fn update(&self, id: i64, input: HadithInput) -> Result<Option<Hadith>, AppError>;
        async fn delete(&self, id: i64) -> Result<bool, AppError>;
        async fn count(&self) -> Result<i64, AppError>;
    }
}

mock! {
    pub Badges {}
    #[async_trait]
    impl BadgeRepository for Badges {
        async fn find_by_id(&self, id: i64) -> Result<Option<Badge>, AppError>;
        async fn list(&self) -> Result<Vec<Badge>, AppError>;
        async fn create(&self, input: BadgeInput) -> Result<Badge, AppError>;
        async fn update(&self, id: i64, input: BadgeInput) -> Result<Option<Badge>, AppError>;
        async fn for_user(&self, user_id: i64) -> Result<Vec<Badge>, AppError>;
        async fn count(&self) -> Result<i64, AppError>;
    }
}

mock! {
    pub Bookmarks {}
    #[async_trait]
    impl BookmarkRepository for Bookmarks {
        async fn list_for_user(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError>;
        async fn toggle(
            &self,
            user_id: i64,
            kind: BookmarkKind,
            item_id: i64,
        ) -> Result<Option<bool>, AppError>;
    }
}

mock! {
    pub Quran {}
    #[async_trait]
    impl QuranRepository for Quran {
        async fn search(&self, query: &str, limit: i64) -> Result<Vec<Ayah>, AppError>;
    }
}

mock! {
    pub Backups {}
    #[async_trait]
    impl BackupRepository for Backups {
        async fn export(&self) -> Result<Backup, AppError>;
        async fn restore(&self, backup: Backup, fallback_owner: i64) -> Result<(), AppError>;
    }
}

/// One mock per repository. A mock left without expectations panics on any
/// call, so it doubles as proof that no query ran.
#[derive(Default)]
pub struct Mocks {
    pub users: MockUsers,
    pub events: MockEvents,
    pub hadiths: MockHadiths,
    pub badges: MockBadges,
    pub bookmarks: MockBookmarks,
    pub quran: MockQuran,
    pub backups: MockBackups,
}

impl Mocks {
    pub fn into_state(self) -> AppState {
        let users: Arc<dyn UserRepository> = Arc::new(self.users);

        AppState {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                TEST_SECRET.to_string(),
                3600,
            )),
            users,
            events: Arc::new(self.events),
            hadiths: Arc::new(self.hadiths),
            badges: Arc::new(self.badges),
            bookmarks: Arc::new(self.bookmarks),
            quran: Arc::new(self.quran),
            backups: Arc::new(self.backups),
            locale: Locale::En,
        }
    }

    pub fn into_server(self) -> TestServer {
        server(self.into_state())
    }

    /// Makes `users.find_by_id` return `user` for its id, as many times as asked.
    pub fn stored_user(&mut self, user: User) {
        self.users
            .expect_find_by_id()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(user.clone())));
    }
}

pub fn server(state: AppState) -> TestServer {
    TestServer::new(routes::routes().with_state(state)).unwrap()
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.org"),
        password_hash: String::new(),
        role,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Auth service keyed like the one in [`Mocks::into_state`].
pub fn auth_service() -> AuthService {
    AuthService::new(Arc::new(MockUsers::new()), TEST_SECRET.to_string(), 3600)
}

/// `Cookie` header value carrying a valid session for `user`.
pub fn session_for(user: &User) -> String {
    format!("session={}", auth_service().issue_session(user))
}

/// Like [`user`], with a stored hash of `password`.
pub fn user_with_password(id: i64, role: Role, password: &str) -> User {
    User {
        password_hash: auth_service().hash_password(password).unwrap(),
        ..user(id, role)
    }
}

pub fn event(id: i64, owner: i64) -> Event {
    Event {
        id,
        user_id: owner,
        title: format!("Event {id}"),
        description: "Description".to_string(),
        hijri_year: 2,
        location: Some("Badr".to_string()),
        latitude: Some(23.73),
        longitude: Some(38.77),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn hadith(id: i64, owner: i64) -> Hadith {
    Hadith {
        id,
        user_id: owner,
        text: format!("Hadith text {id}"),
        narrator: "Abu Hurairah".to_string(),
        source: "Muslim".to_string(),
        grade: Some("Sahih".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn badge(id: i64) -> Badge {
    Badge {
        id,
        name: format!("Badge {id}"),
        description: "Awarded for study".to_string(),
        icon: Some("star".to_string()),
        created_at: Utc::now(),
    }
}
