//! Page identifiers understood by the front controller.
//!
//! The `page` query parameter is resolved against a static lookup table into
//! a [`Route`]. The table is closed: an absent parameter means [`Route::Home`],
//! and any other unknown key (including the empty string) resolves to `None`,
//! which the front controller answers with the not-found page.

use url::form_urlencoded;

/// Path the front controller is mounted at, used when building redirects.
pub const FRONT_CONTROLLER_PATH: &str = "/index.php";

/// One variant per page of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Events,
    ViewEvent,
    AddEvent,
    EditEvent,
    QuranSearch,
    Hadith,
    ViewHadith,
    AddHadith,
    EditHadith,
    Bookmarks,
    Profile,
    MapView,
    Timeline,
    AdminDashboard,
    AdminUsers,
    AdminContent,
    AdminBadges,
    AdminBackupRestore,
}

/// Route key lookup table. Keys are matched exactly and case-sensitively.
pub const ROUTES: [(&str, Route); 21] = [
    ("home", Route::Home),
    ("login", Route::Login),
    ("register", Route::Register),
    ("events", Route::Events),
    ("view_event", Route::ViewEvent),
    ("add_event", Route::AddEvent),
    ("edit_event", Route::EditEvent),
    ("quran_search", Route::QuranSearch),
    ("hadith", Route::Hadith),
    ("view_hadith", Route::ViewHadith),
    ("add_hadith", Route::AddHadith),
    ("edit_hadith", Route::EditHadith),
    ("bookmarks", Route::Bookmarks),
    ("profile", Route::Profile),
    ("map_view", Route::MapView),
    ("timeline", Route::Timeline),
    ("admin_dashboard", Route::AdminDashboard),
    ("admin_users", Route::AdminUsers),
    ("admin_content", Route::AdminContent),
    ("admin_badges", Route::AdminBadges),
    ("admin_backup_restore", Route::AdminBackupRestore),
];

impl Route {
    /// Resolves the raw `page` parameter.
    ///
    /// `None` (parameter absent) defaults to [`Route::Home`]; a present but
    /// unknown key yields `None`.
    pub fn resolve(page: Option<&str>) -> Option<Route> {
        let key = page.unwrap_or("home");
        ROUTES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, route)| *route)
    }

    /// The `page` key for this route.
    pub fn key(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(k, _)| *k)
            .unwrap_or("home")
    }

    /// Front-controller URL for this route, e.g. `/index.php?page=events`.
    pub fn url(self) -> String {
        self.url_with(&[])
    }

    /// Front-controller URL with extra query parameters.
    pub fn url_with(self, params: &[(&str, &str)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", self.key());
        for (name, value) in params {
            query.append_pair(name, value);
        }
        format!("{FRONT_CONTROLLER_PATH}?{}", query.finish())
    }

    /// URL of the page showing one record, e.g. `?page=view_event&id=5`.
    pub fn url_for_id(self, id: i64) -> String {
        self.url_with(&[("id", &id.to_string())])
    }

    /// True for the pages of the admin panel.
    pub fn is_admin_page(self) -> bool {
        matches!(
            self,
            Route::AdminDashboard
                | Route::AdminUsers
                | Route::AdminContent
                | Route::AdminBadges
                | Route::AdminBackupRestore
        )
    }
}
