//! Access-control predicates for record editing.
//!
//! These functions are pure: they never load anything. The web layer fetches
//! the record (at most one query) and hands the result over here, so the
//! decision itself is trivially testable over every combination of inputs.

use super::entities::SessionUser;

/// A record with an owning user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Who is asking, as far as edit permissions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    /// Authenticated user id, `None` for anonymous requests.
    pub user_id: Option<i64>,
    pub is_admin: bool,
    /// Holds the scholar ("ulama") role.
    pub is_privileged: bool,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_session(session: Option<&SessionUser>) -> Self {
        match session {
            Some(s) => Self {
                user_id: Some(s.user_id),
                is_admin: s.role.is_admin(),
                is_privileged: s.role.is_privileged(),
            },
            None => Self::anonymous(),
        }
    }

    /// Returns true if the viewer is the authenticated owner of `record`.
    pub fn owns<R: Owned + ?Sized>(&self, record: &R) -> bool {
        self.user_id == Some(record.owner_id())
    }
}

/// Why an edit was refused.
///
/// Both kinds are shown to the user identically; the distinction exists for
/// logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDenial {
    NotFound,
    Forbidden,
}

impl EditDenial {
    pub fn as_str(self) -> &'static str {
        match self {
            EditDenial::NotFound => "not_found",
            EditDenial::Forbidden => "forbidden",
        }
    }
}

/// Decides whether `viewer` may open the edit form for `record`.
///
/// A missing record fails closed. Otherwise access is granted to admins,
/// to the privileged role, and to the record's owner.
pub fn authorize_edit<R: Owned>(record: Option<R>, viewer: &Viewer) -> Result<R, EditDenial> {
    let record = record.ok_or(EditDenial::NotFound)?;

    if can_edit(viewer, &record) {
        Ok(record)
    } else {
        Err(EditDenial::Forbidden)
    }
}

/// The edit rule for a record that is known to exist.
pub fn can_edit<R: Owned + ?Sized>(viewer: &Viewer, record: &R) -> bool {
    viewer.is_admin || viewer.is_privileged || viewer.owns(record)
}

/// Admin-only check used by the badge editor. Ownership never applies.
pub fn authorize_admin(viewer: &Viewer) -> Result<(), EditDenial> {
    if viewer.is_admin {
        Ok(())
    } else {
        Err(EditDenial::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;

    #[derive(Debug, PartialEq)]
    struct Record {
        owner: i64,
    }

    impl Owned for Record {
        fn owner_id(&self) -> i64 {
            self.owner
        }
    }

    const RECORD_OWNER: i64 = 5;

    #[test]
    fn test_grant_iff_admin_or_privileged_or_owner() {
        let sessions = [None, Some(RECORD_OWNER), Some(9)];

        for user_id in sessions {
            for is_admin in [false, true] {
                for is_privileged in [false, true] {
                    let viewer = Viewer {
                        user_id,
                        is_admin,
                        is_privileged,
                    };
                    let expected =
                        is_admin || is_privileged || user_id == Some(RECORD_OWNER);

                    let result = authorize_edit(
                        Some(Record {
                            owner: RECORD_OWNER,
                        }),
                        &viewer,
                    );

                    assert_eq!(result.is_ok(), expected, "viewer {viewer:?}");
                    if !expected {
                        assert_eq!(result.unwrap_err(), EditDenial::Forbidden);
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_record_always_denied() {
        for is_admin in [false, true] {
            for is_privileged in [false, true] {
                let viewer = Viewer {
                    user_id: Some(RECORD_OWNER),
                    is_admin,
                    is_privileged,
                };
                assert_eq!(
                    authorize_edit::<Record>(None, &viewer),
                    Err(EditDenial::NotFound)
                );
            }
        }
    }

    #[test]
    fn test_viewer_from_session() {
        let session = SessionUser {
            user_id: 3,
            username: "scholar".to_string(),
            role: Role::Ulama,
            expires_at: 0,
        };

        let viewer = Viewer::from_session(Some(&session));
        assert_eq!(viewer.user_id, Some(3));
        assert!(viewer.is_privileged);
        assert!(!viewer.is_admin);

        assert_eq!(Viewer::from_session(None), Viewer::anonymous());
    }

    #[test]
    fn test_admin_check_ignores_ownership() {
        let owner = Viewer {
            user_id: Some(RECORD_OWNER),
            is_admin: false,
            is_privileged: true,
        };
        assert_eq!(authorize_admin(&owner), Err(EditDenial::Forbidden));

        let admin = Viewer {
            user_id: Some(1),
            is_admin: true,
            is_privileged: false,
        };
        assert_eq!(authorize_admin(&admin), Ok(()));
    }
}
