//! Customer sessions and the per-request context
//!
//! [`SessionManager`] ties the signed context token to the session table:
//! logging in opens a session and issues a token, every request resolves
//! its token back into a [`CustomerContext`], logging out revokes.

pub mod context;
pub mod repository;
pub mod token;

pub use context::CustomerContext;
pub use repository::{PgSessionRepository, Session, SessionRepository};
pub use token::{Claims, ContextTokenService};

use std::sync::Arc;

use crate::account::AccountError;
use crate::core_types::CustomerId;

/// Header carrying the context token, in requests and responses
pub const CONTEXT_TOKEN_HEADER: &str = "x-sw-context-token";

pub struct SessionManager {
    tokens: ContextTokenService,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionManager {
    pub fn new(tokens: ContextTokenService, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { tokens, sessions }
    }

    /// Open a new session for `customer_id` and sign a token for it.
    pub async fn open(&self, customer_id: CustomerId) -> Result<(String, CustomerContext), AccountError> {
        let session = Session::open(customer_id);
        self.sessions.create(&session).await?;
        let token = self.tokens.issue(session.id, customer_id)?;
        tracing::debug!(session_id = %session.id, customer_id = %customer_id, "Session opened");
        Ok((token, CustomerContext::authenticated(session.id, customer_id)))
    }

    /// Resolve a request token. Anything short of a valid, active session
    /// yields the anonymous context.
    pub async fn resolve(&self, token: Option<&str>) -> Result<CustomerContext, AccountError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(CustomerContext::anonymous());
        };

        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected context token");
                return Ok(CustomerContext::anonymous());
            }
        };

        let (Some(session_id), Some(customer_id)) = (claims.session_id(), claims.customer_id()) else {
            return Ok(CustomerContext::anonymous());
        };

        match self.sessions.find_active(session_id).await? {
            Some(session) if session.customer_id == customer_id => {
                Ok(CustomerContext::authenticated(session_id, customer_id))
            }
            _ => Ok(CustomerContext::anonymous()),
        }
    }

    /// Revoke the caller's session, if any.
    pub async fn close(&self, context: &CustomerContext) -> Result<(), AccountError> {
        if let Some(session_id) = context.session_id() {
            self.sessions.revoke(session_id).await?;
            tracing::debug!(session_id = %session_id, "Session revoked");
        }
        Ok(())
    }
}
