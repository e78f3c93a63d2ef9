use crate::ids::UserID;

/// Read-only snapshot of the authenticated user, as handed out by the
/// identity provider. The engine never mutates identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserIdentity {
    pub id: UserID,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserIdentity {
    pub fn new(id: UserID, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
