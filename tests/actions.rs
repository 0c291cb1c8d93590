mod common;

use axum::http::StatusCode;
use axum_test::TestResponse;
use common::{Mocks, event, session_for, user, user_with_password};
use ilm_portal::domain::entities::{Backup, Event};
use ilm_portal::domain::entities::{BookmarkKind, Role};
use ilm_portal::error::AppError;
use mockall::predicate::eq;
use serde_json::json;

fn location(response: &TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn assert_redirect(response: &TestResponse, target: &str, flash: &str) {
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(response), target);
    let cookies = set_cookies(response);
    assert!(
        cookies.iter().any(|c| c.starts_with(&format!("flash={flash};"))),
        "expected flash {flash}, got {cookies:?}"
    );
}

fn event_form(title: &str) -> Vec<(&'static str, String)> {
    vec![
        ("title", title.to_string()),
        ("description", "The first major battle".to_string()),
        ("hijri_year", "2".to_string()),
        ("location", "Badr".to_string()),
        ("latitude", "23.73".to_string()),
        ("longitude", "38.77".to_string()),
    ]
}

fn register_form<'a>(
    username: &'a str,
    email: &'a str,
    password: &'a str,
    confirm: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("username", username),
        ("email", email),
        ("password", password),
        ("password_confirm", confirm),
    ]
}

#[tokio::test]
async fn test_login_success_sets_session() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_username()
        .withf(|name| name == "user5")
        .times(1)
        .returning(|_| Ok(Some(user_with_password(5, Role::User, "correct horse"))));
    let server = mocks.into_server();

    let response = server
        .post("/login")
        .form(&[("username", " user5 "), ("password", "correct horse")])
        .await;

    assert_redirect(&response, "/index.php?page=home", "success.login_succeeded");
    assert!(
        set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("session=") && c.contains("Max-Age=3600"))
    );
}

#[tokio::test]
async fn test_login_wrong_password_redirects_back() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Ok(Some(user_with_password(5, Role::User, "correct horse"))));
    let server = mocks.into_server();

    let response = server
        .post("/login")
        .form(&[("username", "user5"), ("password", "battery staple")])
        .await;

    assert_redirect(&response, "/index.php?page=login", "danger.login_failed");
    assert!(!set_cookies(&response).iter().any(|c| c.starts_with("session=")));
}

#[tokio::test]
async fn test_login_unknown_user_redirects_back() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Ok(None));
    let server = mocks.into_server();

    let response = server
        .post("/login")
        .form(&[("username", "nobody"), ("password", "whatever1")])
        .await;

    assert_redirect(&response, "/index.php?page=login", "danger.login_failed");
}

#[tokio::test]
async fn test_register_creates_plain_user() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Ok(None));
    mocks
        .users
        .expect_create()
        .withf(|new_user| {
            new_user.username == "aisha"
                && new_user.role == Role::User
                && new_user.password_hash != "long enough"
        })
        .times(1)
        .returning(|_| Ok(user(7, Role::User)));
    let server = mocks.into_server();

    let response = server
        .post("/register")
        .form(&register_form("aisha", "aisha@example.org", "long enough", "long enough"))
        .await;

    assert_redirect(&response, "/index.php?page=login", "success.registered");
}

#[tokio::test]
async fn test_register_rejects_invalid_form_without_queries() {
    let server = Mocks::default().into_server();

    for form in [
        register_form("a", "a@example.org", "long enough", "long enough"),
        register_form("bad name!", "a@example.org", "long enough", "long enough"),
        register_form("aisha", "not-an-email", "long enough", "long enough"),
        register_form("aisha", "a@example.org", "short", "short"),
        register_form("aisha", "a@example.org", "long enough", "different"),
    ] {
        let response = server.post("/register").form(&form).await;
        assert_redirect(&response, "/index.php?page=register", "danger.invalid_form");
    }
}

#[tokio::test]
async fn test_register_taken_username() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Ok(Some(user(1, Role::User))));
    mocks.users.expect_create().never();
    let server = mocks.into_server();

    let response = server
        .post("/register")
        .form(&register_form("user1", "a@example.org", "long enough", "long enough"))
        .await;

    assert_redirect(&response, "/index.php?page=register", "danger.username_taken");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = Mocks::default().into_server();

    let response = server
        .post("/logout")
        .add_header("cookie", session_for(&user(5, Role::User)))
        .await;

    assert_redirect(&response, "/index.php?page=home", "info.logged_out");
    assert!(
        set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("session=;") && c.contains("Max-Age=0"))
    );
}

#[tokio::test]
async fn test_create_event_requires_login() {
    let server = Mocks::default().into_server();

    let response = server.post("/events").form(&event_form("Badr")).await;

    assert_redirect(&response, "/index.php?page=login", "warning.login_required");
}

#[tokio::test]
async fn test_create_event_stores_owner() {
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_create()
        .withf(|owner, input| *owner == 5 && input.title == "Battle of Badr" && input.hijri_year == 2)
        .times(1)
        .returning(|owner, _| Ok(event(12, owner)));
    let server = mocks.into_server();

    let response = server
        .post("/events")
        .add_header("cookie", session_for(&user(5, Role::User)))
        .form(&event_form("Battle of Badr"))
        .await;

    assert_redirect(&response, "/index.php?page=view_event&id=12", "success.event_saved");
}

#[tokio::test]
async fn test_create_event_invalid_form() {
    let server = Mocks::default().into_server();
    let mut form = event_form("Badr");
    form[2].1 = "not a year".to_string();

    let response = server
        .post("/events")
        .add_header("cookie", session_for(&user(5, Role::User)))
        .form(&form)
        .await;

    assert_redirect(&response, "/index.php?page=add_event", "danger.invalid_form");
}

#[tokio::test]
async fn test_update_event_stranger_denied_without_write() {
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_find_by_id()
        .with(eq(5))
        .times(1)
        .returning(|id| Ok(Some(event(id, 5))));
    mocks.events.expect_update().never();
    let server = mocks.into_server();

    let response = server
        .post("/events/5")
        .add_header("cookie", session_for(&user(9, Role::User)))
        .form(&event_form("Hijacked"))
        .await;

    assert_redirect(&response, "/index.php?page=events", "danger.not_found_or_denied");
}

#[tokio::test]
async fn test_update_event_by_ulama() {
    let mut mocks = Mocks::default();
    mocks
        .events
        .expect_find_by_id()
        .returning(|id| Ok(Some(event(id, 5))));
    mocks
        .events
        .expect_update()
        .withf(|id, input| *id == 5 && input.title == "Corrected title")
        .times(1)
        .returning(|id, _| Ok(Some(event(id, 5))));
    let server = mocks.into_server();

    let response = server
        .post("/events/5")
        .add_header("cookie", session_for(&user(9, Role::Ulama)))
        .form(&event_form("Corrected title"))
        .await;

    assert_redirect(&response, "/index.php?page=view_event&id=5", "success.event_saved");
}

#[tokio::test]
async fn test_bookmark_toggle() {
    let mut mocks = Mocks::default();
    mocks
        .bookmarks
        .expect_toggle()
        .with(eq(5), eq(BookmarkKind::Event), eq(3))
        .times(1)
        .returning(|_, _, _| Ok(Some(true)));
    mocks
        .bookmarks
        .expect_toggle()
        .with(eq(5), eq(BookmarkKind::Hadith), eq(404))
        .times(1)
        .returning(|_, _, _| Ok(None));
    let server = mocks.into_server();
    let cookie = session_for(&user(5, Role::User));

    let response = server
        .post("/bookmarks")
        .add_header("cookie", cookie.clone())
        .form(&[("kind", "event"), ("item_id", "3")])
        .await;
    assert_redirect(&response, "/index.php?page=bookmarks", "success.bookmark_added");

    let response = server
        .post("/bookmarks")
        .add_header("cookie", cookie.clone())
        .form(&[("kind", "hadith"), ("item_id", "404")])
        .await;
    assert_redirect(&response, "/index.php?page=bookmarks", "danger.item_not_found");

    let response = server
        .post("/bookmarks")
        .add_header("cookie", cookie)
        .form(&[("kind", "ayah"), ("item_id", "1")])
        .await;
    assert_redirect(&response, "/index.php?page=bookmarks", "danger.invalid_form");
}

#[tokio::test]
async fn test_role_change_requires_admin() {
    let mut mocks = Mocks::default();
    mocks.users.expect_update_role().never();
    let server = mocks.into_server();

    let response = server
        .post("/admin/users/2/role")
        .add_header("cookie", session_for(&user(3, Role::Ulama)))
        .form(&[("role", "admin")])
        .await;

    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");
}

#[tokio::test]
async fn test_role_change_by_admin() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .users
        .expect_update_role()
        .with(eq(2), eq(Role::Ulama))
        .times(1)
        .returning(|_, _| Ok(true));
    let server = mocks.into_server();
    let cookie = session_for(&user(1, Role::Admin));

    let response = server
        .post("/admin/users/2/role")
        .add_header("cookie", cookie.clone())
        .form(&[("role", "ulama")])
        .await;
    assert_redirect(&response, "/index.php?page=admin_users", "success.role_updated");

    let response = server
        .post("/admin/users/1/role")
        .add_header("cookie", cookie.clone())
        .form(&[("role", "user")])
        .await;
    assert_redirect(&response, "/index.php?page=admin_users", "danger.invalid_form");

    let response = server
        .post("/admin/users/2/role")
        .add_header("cookie", cookie)
        .form(&[("role", "superuser")])
        .await;
    assert_redirect(&response, "/index.php?page=admin_users", "danger.invalid_form");
}

#[tokio::test]
async fn test_admin_deletes_content() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .hadiths
        .expect_delete()
        .with(eq(4))
        .times(1)
        .returning(|_| Ok(true));
    mocks
        .events
        .expect_delete()
        .with(eq(99))
        .times(1)
        .returning(|_| Ok(false));
    let server = mocks.into_server();
    let cookie = session_for(&user(1, Role::Admin));

    let response = server
        .post("/admin/content/hadith/4/delete")
        .add_header("cookie", cookie.clone())
        .await;
    assert_redirect(&response, "/index.php?page=admin_content", "success.content_deleted");

    let response = server
        .post("/admin/content/event/99/delete")
        .add_header("cookie", cookie.clone())
        .await;
    assert_redirect(&response, "/index.php?page=admin_content", "danger.item_not_found");

    let response = server
        .post("/admin/content/ayah/1/delete")
        .add_header("cookie", cookie)
        .await;
    assert_redirect(&response, "/index.php?page=admin_content", "danger.invalid_form");
}

#[tokio::test]
async fn test_save_badge_update_missing() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .badges
        .expect_update()
        .withf(|id, input| *id == 8 && input.name == "Hafiz")
        .times(1)
        .returning(|_, _| Ok(None));
    let server = mocks.into_server();

    let response = server
        .post("/admin/badges")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .form(&[("id", "8"), ("name", "Hafiz"), ("description", ""), ("icon", "")])
        .await;

    assert_redirect(&response, "/index.php?page=admin_badges", "danger.badge_not_found");
}

#[tokio::test]
async fn test_save_badge_duplicate_name_flashes() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .badges
        .expect_create()
        .withf(|input| input.name == "Hafiz")
        .times(1)
        .returning(|_| {
            Err(AppError::conflict(
                "Duplicate value",
                json!({"constraint": "badges_name_key"}),
            ))
        });
    let server = mocks.into_server();

    let response = server
        .post("/admin/badges")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .form(&[("id", ""), ("name", "Hafiz"), ("description", ""), ("icon", "")])
        .await;

    assert_redirect(&response, "/index.php?page=admin_badges", "danger.badge_name_taken");
}

#[tokio::test]
async fn test_demoted_admin_cookie_is_refused() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::User));
    mocks.events.expect_delete().never();
    mocks.backups.expect_restore().never();
    mocks.users.expect_count().never();
    let server = mocks.into_server();
    let cookie = session_for(&user(1, Role::Admin));

    let response = server
        .post("/admin/content/event/5/delete")
        .add_header("cookie", cookie.clone())
        .await;
    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");

    let backup = serde_json::to_string(&Backup::new(vec![], vec![], vec![])).unwrap();
    let response = server
        .post("/admin/restore")
        .add_header("cookie", cookie.clone())
        .form(&[("backup", backup)])
        .await;
    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");

    let response = server
        .get("/index.php?page=admin_dashboard")
        .add_header("cookie", cookie)
        .await;
    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");
}

#[tokio::test]
async fn test_deleted_admin_account_is_refused() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_find_by_id()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(None));
    mocks.hadiths.expect_delete().never();
    let server = mocks.into_server();

    let response = server
        .post("/admin/content/hadith/4/delete")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .await;

    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");
}

#[tokio::test]
async fn test_backup_download() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .backups
        .expect_export()
        .times(1)
        .returning(|| {
            Ok(ilm_portal::domain::entities::Backup::new(
                vec![event(1, 1)],
                vec![],
                vec![],
            ))
        });
    let server = mocks.into_server();

    let response = server
        .get("/admin/backup")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .await;

    response.assert_status_ok();
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"ilm-portal-backup-"));
    let body: serde_json::Value = response.json();
    assert_eq!(body["version"], 1);
    assert_eq!(body["events"][0]["title"], "Event 1");
}

#[tokio::test]
async fn test_backup_requires_admin() {
    let server = Mocks::default().into_server();

    let response = server
        .get("/admin/backup")
        .add_header("cookie", session_for(&user(2, Role::User)))
        .await;

    assert_redirect(&response, "/index.php?page=home", "danger.access_denied");
}

#[tokio::test]
async fn test_restore_rejects_malformed_and_future_backups() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks.backups.expect_restore().never();
    let server = mocks.into_server();
    let cookie = session_for(&user(1, Role::Admin));

    let future = json!({
        "version": 2,
        "created_at": "2025-01-01T00:00:00Z",
        "events": [],
        "hadiths": [],
        "badges": []
    })
    .to_string();

    for backup in ["{not json".to_string(), String::new(), future] {
        let response = server
            .post("/admin/restore")
            .add_header("cookie", cookie.clone())
            .form(&[("backup", backup)])
            .await;
        assert_redirect(
            &response,
            "/index.php?page=admin_backup_restore",
            "danger.restore_invalid",
        );
    }
}

#[tokio::test]
async fn test_restore_valid_backup() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .backups
        .expect_restore()
        .withf(|backup, owner| backup.events.len() == 1 && *owner == 1)
        .times(1)
        .returning(|_, _| Ok(()));
    let server = mocks.into_server();

    let backup = serde_json::to_string(&Backup::new(
        vec![event(3, 1)],
        vec![],
        vec![],
    ))
    .unwrap();

    let response = server
        .post("/admin/restore")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .form(&[("backup", backup)])
        .await;

    assert_redirect(
        &response,
        "/index.php?page=admin_backup_restore",
        "success.restore_succeeded",
    );
}

#[tokio::test]
async fn test_restore_rejects_backup_breaking_table_constraints() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks.backups.expect_restore().never();
    let server = mocks.into_server();
    let cookie = session_for(&user(1, Role::Admin));

    let year_zero = Event {
        hijri_year: 0,
        ..event(3, 1)
    };
    let off_map = Event {
        latitude: Some(95.0),
        ..event(4, 1)
    };

    for broken in [year_zero, off_map] {
        let backup = serde_json::to_string(&Backup::new(vec![broken], vec![], vec![])).unwrap();
        let response = server
            .post("/admin/restore")
            .add_header("cookie", cookie.clone())
            .form(&[("backup", backup)])
            .await;
        assert_redirect(
            &response,
            "/index.php?page=admin_backup_restore",
            "danger.restore_invalid",
        );
    }
}

#[tokio::test]
async fn test_restore_constraint_violation_flashes() {
    let mut mocks = Mocks::default();
    mocks.stored_user(user(1, Role::Admin));
    mocks
        .backups
        .expect_restore()
        .times(1)
        .returning(|_, _| {
            Err(AppError::bad_request(
                "Constraint violation",
                json!({"constraint": "events_user_id_fkey"}),
            ))
        });
    let server = mocks.into_server();

    let backup = serde_json::to_string(&Backup::new(vec![event(3, 42)], vec![], vec![])).unwrap();
    let response = server
        .post("/admin/restore")
        .add_header("cookie", session_for(&user(1, Role::Admin)))
        .form(&[("backup", backup)])
        .await;

    assert_redirect(
        &response,
        "/index.php?page=admin_backup_restore",
        "danger.restore_invalid",
    );
}

#[tokio::test]
async fn test_health() {
    let mut mocks = Mocks::default();
    mocks.users.expect_count().times(1).returning(|| Ok(3));
    let server = mocks.into_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_health_reports_database_failure() {
    let mut mocks = Mocks::default();
    mocks
        .users
        .expect_count()
        .returning(|| Err(AppError::internal("connection refused", json!({}))));
    let server = mocks.into_server();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
