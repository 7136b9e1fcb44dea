//! Customer-facing workflows.

pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod profile;

use crate::{errors::WorkflowError, session::Session};
use storefront::{storage::KeyValueStore, token::SessionToken};

/// Token of the logged-in customer.
pub(crate) fn require_token<S: KeyValueStore>(
    session: &Session<S>,
) -> Result<SessionToken, WorkflowError> {
    session.token().cloned().ok_or(WorkflowError::NotLoggedIn)
}
