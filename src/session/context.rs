use crate::account::AccountError;
use crate::core_types::{CustomerId, SessionId};

/// Per-request view of who is calling.
///
/// Built from the context token on every request; anonymous when the token
/// is missing, expired or revoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerContext {
    session_id: Option<SessionId>,
    customer_id: Option<CustomerId>,
}

impl CustomerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(session_id: SessionId, customer_id: CustomerId) -> Self {
        Self {
            session_id: Some(session_id),
            customer_id: Some(customer_id),
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn is_logged_in(&self) -> bool {
        self.customer_id.is_some()
    }

    /// The logged-in customer, or [`AccountError::Unauthenticated`].
    pub fn require_customer(&self) -> Result<CustomerId, AccountError> {
        self.customer_id.ok_or(AccountError::Unauthenticated)
    }
}
