//! Owner sessions.
//!
//! Every task belongs to an owner id. A session is either a signed-in
//! user with a stable id, or an ephemeral guest whose id is minted
//! fresh each time guest mode is entered. Guest ids are never reused,
//! so guest tasks are effectively scoped to one run.

use uuid::Uuid;

/// The identity the client is currently acting as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerSession {
    /// A signed-in user with a stable owner id.
    SignedIn {
        /// Stable owner id used to scope all task requests.
        user_id: String,
        /// Name shown in the status bar.
        display_name: String,
    },
    /// An anonymous session with a freshly minted owner id.
    Guest {
        /// One-shot owner id of the form `guest-<uuid>`.
        guest_id: String,
    },
}

impl OwnerSession {
    /// Start a fresh guest session with a newly minted owner id.
    #[must_use]
    pub fn guest() -> Self {
        Self::Guest {
            guest_id: format!("guest-{}", Uuid::new_v4()),
        }
    }

    /// Start a signed-in session for a known user.
    #[must_use]
    pub fn signed_in(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::SignedIn {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    /// The owner id to scope task requests with.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        match self {
            Self::SignedIn { user_id, .. } => user_id,
            Self::Guest { guest_id } => guest_id,
        }
    }

    /// Name shown in the UI for this session.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::SignedIn { display_name, .. } => display_name,
            Self::Guest { .. } => "Guest",
        }
    }
}
