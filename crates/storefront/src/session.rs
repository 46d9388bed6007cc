//! Authenticated-user marker.
//!
//! Login writes the user's email under [`USER_EMAIL_KEY`] in the shared
//! key-value store; this module only reads it so outbound API requests can be
//! tagged with the current user.

use std::sync::Arc;

use tracing::warn;

use crate::storage::KeyValueStore;

/// Storage key of the authenticated-user marker.
pub const USER_EMAIL_KEY: &str = "userEmail";

/// Header carrying the marker on outbound requests.
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Read-only view of the authenticated-user marker.
#[derive(Clone)]
pub struct UserSession {
    storage: Arc<dyn KeyValueStore>,
}

impl UserSession {
    /// Create a session reader over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// The current user's email, if someone is logged in.
    ///
    /// Empty markers and unreadable storage count as logged out.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        match self.storage.get(USER_EMAIL_KEY) {
            Ok(marker) => marker.filter(|email| !email.is_empty()),
            Err(e) => {
                warn!(error = %e, "Session storage unreadable");
                None
            }
        }
    }

    /// Whether a user marker is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }
}
