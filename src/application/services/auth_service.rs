//! Account authentication: password digests, login, registration and
//! signed session cookies.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, SessionUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Prefix identifying the password digest scheme.
const PASSWORD_SCHEME: &str = "hs256";

const SALT_LEN: usize = 16;

/// HMAC rounds applied to new password digests.
const PASSWORD_ITERATIONS: u32 = 100_000;

/// Upper bound accepted from a stored digest.
const MAX_PASSWORD_ITERATIONS: u32 = 10_000_000;

/// Service for authenticating users and issuing sessions.
///
/// Passwords are stored as salted, iterated HMAC-SHA256 digests keyed by the
/// server secret. Sessions are stateless: the cookie carries the user's id, name,
/// role and expiry, signed with the same secret, so resolving the requester
/// never needs a database round trip.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    secret: String,
    session_ttl_seconds: i64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - account repository
    /// - `secret` - HMAC key for password digests and session signatures
    /// - `session_ttl_seconds` - lifetime of issued sessions
    pub fn new(users: Arc<dyn UserRepository>, secret: String, session_ttl_seconds: i64) -> Self {
        Self {
            users,
            secret,
            session_ttl_seconds,
        }
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key length")
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Format: `hs256$<iterations>$<hex salt>$<hex digest>`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system RNG fails.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::fill(&mut salt).map_err(|e| {
            AppError::internal("Random generator failure", json!({"error": e.to_string()}))
        })?;

        let digest = self
            .stretched_mac(&salt, password, PASSWORD_ITERATIONS)
            .finalize()
            .into_bytes();

        Ok(format!(
            "{PASSWORD_SCHEME}${PASSWORD_ITERATIONS}${}${}",
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    /// Chains `iterations` HMAC rounds over the salt and password; the
    /// returned MAC holds the last round, not yet finalized.
    fn stretched_mac(&self, salt: &[u8], password: &str, iterations: u32) -> HmacSha256 {
        let mut mac = self.mac();
        mac.update(salt);
        mac.update(password.as_bytes());

        for _ in 1..iterations {
            let block = mac.finalize().into_bytes();
            mac = self.mac();
            mac.update(&block);
            mac.update(password.as_bytes());
        }

        mac
    }

    /// Checks a password against a stored digest in constant time.
    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        let mut parts = stored.splitn(4, '$');
        let (Some(PASSWORD_SCHEME), Some(iterations), Some(salt_hex), Some(digest_hex)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        if !(1..=MAX_PASSWORD_ITERATIONS).contains(&iterations) {
            return false;
        }

        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };

        self.stretched_mac(&salt, password, iterations)
            .verify_slice(&expected)
            .is_ok()
    }

    /// Verifies credentials and returns the matching account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password does not match; both cases are indistinguishable to callers.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.users.find_by_username(username).await?;

        match user {
            Some(user) if self.verify_password(password, &user.password_hash) => {
                tracing::info!(user_id = user.id, "login succeeded");
                Ok(user)
            }
            _ => {
                tracing::info!(%username, "login failed");
                Err(AppError::unauthorized(
                    "Invalid credentials",
                    json!({"reason": "Unknown user or wrong password"}),
                ))
            }
        }
    }

    /// Registers a new account with the given role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "Username already taken",
                json!({"username": username}),
            ));
        }

        let password_hash = self.hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "account registered");
        Ok(user)
    }

    /// Issues a signed session cookie value for `user`.
    ///
    /// Format: `<base64url JSON claims>.<hex HMAC of the first part>`.
    pub fn issue_session(&self, user: &User) -> String {
        let claims = SessionUser {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            expires_at: Utc::now().timestamp() + self.session_ttl_seconds,
        };
        self.sign_claims(&claims)
    }

    fn sign_claims(&self, claims: &SessionUser) -> String {
        let json = serde_json::to_vec(claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        format!("{payload}.{signature}")
    }

    /// Verifies a session cookie value.
    ///
    /// Returns `None` if the value is malformed, the signature does not
    /// match, or the session has expired.
    pub fn verify_session(&self, value: &str) -> Option<SessionUser> {
        let (payload, signature) = value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let claims: SessionUser = serde_json::from_slice(&json).ok()?;

        if claims.expires_at <= Utc::now().timestamp() {
            tracing::debug!(user_id = claims.user_id, "session expired");
            return None;
        }

        Some(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn test_secret() -> String {
        "test-session-secret-with-enough-bytes".to_string()
    }

    fn service_with(repo: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(repo), test_secret(), 3600)
    }

    fn user(service: &AuthService, password: &str, role: Role) -> User {
        User {
            id: 5,
            username: "aisha".to_string(),
            email: "aisha@example.com".to_string(),
            password_hash: service.hash_password(password).unwrap(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_round_trip() {
        let service = service_with(MockUserRepository::new());
        let stored = service.hash_password("correct horse").unwrap();

        assert!(stored.starts_with("hs256$"));
        assert!(service.verify_password("correct horse", &stored));
        assert!(!service.verify_password("wrong horse", &stored));
    }

    #[test]
    fn test_password_digest_is_stretched() {
        let service = service_with(MockUserRepository::new());
        let stored = service.hash_password("correct horse").unwrap();
        assert!(stored.starts_with(&format!("hs256${PASSWORD_ITERATIONS}$")));

        // The stored round count drives verification.
        let salt = [7u8; SALT_LEN];
        let digest = service
            .stretched_mac(&salt, "correct horse", 3)
            .finalize()
            .into_bytes();
        let cheap = format!("hs256$3${}${}", hex::encode(salt), hex::encode(digest));
        assert!(service.verify_password("correct horse", &cheap));

        let single_round = format!("hs256$1${}${}", hex::encode(salt), hex::encode(digest));
        assert!(!service.verify_password("correct horse", &single_round));
    }

    #[test]
    fn test_password_salts_differ() {
        let service = service_with(MockUserRepository::new());
        let a = service.hash_password("same").unwrap();
        let b = service.hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_password_secret_matters() {
        let a = service_with(MockUserRepository::new());
        let b = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "another-secret".to_string(),
            3600,
        );
        let stored = a.hash_password("pw").unwrap();
        assert!(!b.verify_password("pw", &stored));
    }

    #[test]
    fn test_malformed_digest_rejected() {
        let service = service_with(MockUserRepository::new());
        assert!(!service.verify_password("pw", ""));
        assert!(!service.verify_password("pw", "md5$00$00"));
        assert!(!service.verify_password("pw", "hs256$zz$zz"));
        assert!(!service.verify_password("pw", "hs256$0$00$00"));
        assert!(!service.verify_password("pw", "hs256$x$00$00"));
    }

    #[test]
    fn test_session_round_trip() {
        let service = service_with(MockUserRepository::new());
        let u = user(&service, "pw", Role::Ulama);

        let cookie = service.issue_session(&u);
        let session = service.verify_session(&cookie).unwrap();

        assert_eq!(session.user_id, 5);
        assert_eq!(session.username, "aisha");
        assert_eq!(session.role, Role::Ulama);
    }

    #[test]
    fn test_tampered_session_rejected() {
        let service = service_with(MockUserRepository::new());
        let u = user(&service, "pw", Role::User);
        let cookie = service.issue_session(&u);

        let forged_claims = SessionUser {
            user_id: 5,
            username: "aisha".to_string(),
            role: Role::Admin,
            expires_at: Utc::now().timestamp() + 3600,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let (_, signature) = cookie.split_once('.').unwrap();
        let forged = format!("{forged_payload}.{signature}");

        assert!(service.verify_session(&forged).is_none());
        assert!(service.verify_session("garbage").is_none());
        assert!(service.verify_session("a.b").is_none());
    }

    #[test]
    fn test_session_from_other_secret_rejected() {
        let a = service_with(MockUserRepository::new());
        let b = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "another-secret".to_string(),
            3600,
        );
        let cookie = a.issue_session(&user(&a, "pw", Role::User));
        assert!(b.verify_session(&cookie).is_none());
    }

    #[test]
    fn test_expired_session_rejected() {
        let service = service_with(MockUserRepository::new());
        let expired = SessionUser {
            user_id: 5,
            username: "aisha".to_string(),
            role: Role::User,
            expires_at: Utc::now().timestamp() - 1,
        };
        let cookie = service.sign_claims(&expired);
        assert!(service.verify_session(&cookie).is_none());
    }

    #[tokio::test]
    async fn test_login_success() {
        let hasher = service_with(MockUserRepository::new());
        let stored = user(&hasher, "secret-pw", Role::User);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .withf(|name| name == "aisha")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service_with(repo);
        let logged_in = service.login("aisha", "secret-pw").await.unwrap();
        assert_eq!(logged_in.id, 5);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hasher = service_with(MockUserRepository::new());
        let stored = user(&hasher, "secret-pw", Role::User);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service_with(repo);
        let result = service.login("aisha", "nope").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with(repo);
        let result = service.login("ghost", "pw").await;
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let hasher = service_with(MockUserRepository::new());
        let existing = user(&hasher, "pw", Role::User);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let service = service_with(repo);
        let result = service
            .register("aisha", "a@example.com", "password1", Role::User)
            .await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.username == "bilal"
                    && new_user.role == Role::User
                    && new_user.password_hash.starts_with("hs256$")
                    && !new_user.password_hash.contains("password1")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 11,
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    role: new_user.role,
                    created_at: Utc::now(),
                })
            });

        let service = service_with(repo);
        let created = service
            .register("bilal", "b@example.com", "password1", Role::User)
            .await
            .unwrap();
        assert_eq!(created.id, 11);
    }
}
