use parking_lot::RwLock;
use reelsync_model::UserIdentity;

/// Read-only view of the authenticated viewer.
pub trait IdentityProvider: Send + Sync {
    /// `None` while signed out. Reaction submission with no authenticated
    /// user performs zero writes.
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Injected session container with an explicit lifecycle: initialized on
/// app start, reset on sign-out. Replaces the ambient auth-store global the
/// platform UI otherwise leans on.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<UserIdentity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            current: RwLock::new(Some(identity)),
        }
    }

    pub fn sign_in(&self, identity: UserIdentity) {
        *self.current.write() = Some(identity);
    }

    pub fn sign_out(&self) {
        *self.current.write() = None;
    }
}

impl IdentityProvider for SessionStore {
    fn current_user(&self) -> Option<UserIdentity> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelsync_model::UserID;

    #[test]
    fn lifecycle_round_trip() {
        let store = SessionStore::new();
        assert!(store.current_user().is_none());

        store.sign_in(UserIdentity::new(UserID::new(), "viewer"));
        assert_eq!(
            store.current_user().map(|u| u.display_name),
            Some("viewer".to_string())
        );

        store.sign_out();
        assert!(store.current_user().is_none());
    }
}
