//! Request session model.

use uuid::Uuid;

/// An authenticated request session.
///
/// A session may exist without a bound user, and a bound user may lack an
/// identifier; both count as unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<SessionUser>,
}

/// The user bound to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Option<Uuid>,
}

impl Session {
    /// A session bound to the given account ID.
    pub fn for_user(id: Uuid) -> Self {
        Self {
            user: Some(SessionUser { id: Some(id) }),
        }
    }

    /// The bound account ID, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().and_then(|u| u.id)
    }
}
