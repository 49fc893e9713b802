//! Explicit authentication context
//!
//! Every owner-scoped operation receives a `Session` instead of reading a
//! process-wide "current user".

use super::ids::OwnerId;
use crate::error::{LedgerError, LedgerResult};

/// Who is making a request, if anyone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    owner: Option<OwnerId>,
}

impl Session {
    /// A session for an authenticated principal
    pub fn signed_in(owner: OwnerId) -> Self {
        Self { owner: Some(owner) }
    }

    /// A session with no principal
    pub fn anonymous() -> Self {
        Self { owner: None }
    }

    /// Build a session from an optional user name; blank names are anonymous
    pub fn from_user(user: Option<&str>) -> Self {
        match user.map(str::trim) {
            Some(name) if !name.is_empty() => Self::signed_in(OwnerId::new(name)),
            _ => Self::anonymous(),
        }
    }

    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// The owner, or `Unauthorized` when nobody is signed in
    pub fn require_owner(&self) -> LedgerResult<&OwnerId> {
        self.owner.as_ref().ok_or(LedgerError::Unauthorized)
    }
}
