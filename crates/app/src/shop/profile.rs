//! Customer profile.

use storefront::{profile::UserProfile, storage::KeyValueStore};
use tracing::info;

use crate::{
    api::StorefrontApi,
    errors::{WorkflowError, confirm, report},
    session::Session,
    shop::require_token,
};

/// Shown when the profile cannot be loaded.
pub const PROFILE_UNAVAILABLE: &str = "Failed to load your profile";

/// Shown when the profile update fails without a message.
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update your profile";

/// Shown when the profile update succeeds without a message.
pub const PROFILE_UPDATED: &str = "Profile updated";

/// Fetches the profile and caches it in the session.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn load_profile<S: KeyValueStore>(
    session: &mut Session<S>,
    api: &dyn StorefrontApi,
) -> Result<UserProfile, WorkflowError> {
    let result = async {
        let token = require_token(session)?;

        api.get_profile(&token)
            .await
            .map_err(WorkflowError::api(PROFILE_UNAVAILABLE))
    }
    .await;

    if let Ok(profile) = &result {
        session.set_profile(profile.clone());
    }

    report(session.notifier(), result)
}

/// Sends the edited profile and replaces the cached one on success.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn update_profile<S: KeyValueStore>(
    session: &mut Session<S>,
    api: &dyn StorefrontApi,
    profile: UserProfile,
) -> Result<(), WorkflowError> {
    let result = async {
        let token = require_token(session)?;

        api.update_profile(&token, &profile)
            .await
            .map_err(WorkflowError::api(PROFILE_UPDATE_FAILED))
    }
    .await;

    let result = result.map(|message| {
        info!("profile updated");

        confirm(session.notifier(), message, PROFILE_UPDATED);
        session.set_profile(profile);
    });

    report(session.notifier(), result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront::{storage::MemoryStore, token::SessionToken};
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockStorefrontApi},
        notify::Toasts,
    };

    use super::*;

    fn logged_in() -> TestResult<Session<MemoryStore>> {
        let mut session = Session::restore(MemoryStore::new(), Arc::new(Toasts::new()));

        session.set_token(SessionToken::new("tok123").ok_or("Expected a token")?);

        Ok(session)
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_owned(),
            email: "awa@example.com".to_owned(),
        }
    }

    #[tokio::test]
    async fn loading_caches_the_profile() -> TestResult {
        let mut session = logged_in()?;

        let mut api = MockStorefrontApi::new();
        api.expect_get_profile()
            .times(1)
            .returning(|_| Ok(profile("Awa")));

        load_profile(&mut session, &api).await?;

        assert_eq!(session.profile(), Some(&profile("Awa")));

        Ok(())
    }

    #[tokio::test]
    async fn failed_update_keeps_cached_profile() -> TestResult {
        let mut session = logged_in()?;
        session.set_profile(profile("Awa"));

        let mut api = MockStorefrontApi::new();
        api.expect_update_profile().times(1).returning(|_, _| {
            Err(ApiError::Rejected {
                status: 500,
                message: None,
            })
        });

        let result = update_profile(&mut session, &api, profile("Awa Diop")).await;

        assert!(result.is_err());
        assert_eq!(session.profile(), Some(&profile("Awa")));

        Ok(())
    }

    #[tokio::test]
    async fn successful_update_replaces_cached_profile() -> TestResult {
        let mut session = logged_in()?;

        let mut api = MockStorefrontApi::new();
        api.expect_update_profile()
            .times(1)
            .withf(|_, sent| sent.name == "Awa Diop")
            .returning(|_, _| Ok(None));

        update_profile(&mut session, &api, profile("Awa Diop")).await?;

        assert_eq!(session.profile().map(|profile| profile.name.as_str()), Some("Awa Diop"));

        Ok(())
    }
}
