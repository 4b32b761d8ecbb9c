//! Auth provider port: sign-in and session observation.
//!
//! The session state is exposed as a `tokio::sync::watch` channel so
//! every subscriber observes the current state immediately at
//! subscription time (login, logout and session restore all flow
//! through the same channel).

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Credentials};

/// Port for authenticating users and observing session changes.
///
/// # Contract
///
/// - `authenticate` resolves credentials to a user or a typed
///   `AuthError`; implementations decide whether unknown accounts
///   auto-register (both shipped adapters do, mirroring first-run
///   sign-up).
/// - `subscribe` yields a receiver whose current value is the present
///   session state; it fires on every login, logout and restore.
/// - `sign_out` clears the session and notifies subscribers.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticates with email/password credentials.
    async fn authenticate(&self, credentials: &Credentials)
        -> Result<AuthenticatedUser, AuthError>;

    /// Subscribes to session state changes. The receiver's current
    /// value is always the latest known state.
    fn subscribe(&self) -> watch::Receiver<Option<AuthenticatedUser>>;

    /// Signs the current user out.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns the currently signed-in user, if any.
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.subscribe().borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    struct StaticAuthProvider {
        session: watch::Sender<Option<AuthenticatedUser>>,
    }

    impl StaticAuthProvider {
        fn new() -> Self {
            let (session, _) = watch::channel(None);
            Self { session }
        }
    }

    #[async_trait]
    impl AuthProvider for StaticAuthProvider {
        async fn authenticate(
            &self,
            credentials: &Credentials,
        ) -> Result<AuthenticatedUser, AuthError> {
            let user = AuthenticatedUser::new(
                UserId::new(credentials.email.clone()).map_err(|_| {
                    AuthError::InvalidEmail(credentials.email.clone())
                })?,
                credentials.email.clone(),
                None,
                None,
            );
            self.session.send_replace(Some(user.clone()));
            Ok(user)
        }

        fn subscribe(&self) -> watch::Receiver<Option<AuthenticatedUser>> {
            self.session.subscribe()
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.session.send_replace(None);
            Ok(())
        }
    }

    #[tokio::test]
    async fn subscription_sees_current_state_immediately() {
        let provider = StaticAuthProvider::new();
        assert!(provider.subscribe().borrow().is_none());

        provider
            .authenticate(&Credentials::new("a@b.com", "pw"))
            .await
            .unwrap();
        assert!(provider.subscribe().borrow().is_some());
        assert!(provider.current_user().is_some());

        provider.sign_out().await.unwrap();
        assert!(provider.current_user().is_none());
    }

    #[test]
    fn auth_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn AuthProvider) {}
    }
}
