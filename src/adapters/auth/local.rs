//! Local single-device auth adapter.
//!
//! Keeps an account registry in a JSON file under the data directory.
//! Unknown e-mails auto-register on first sign-in; a wrong password for
//! a known account is rejected.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{watch, RwLock};
use tracing::info;

use crate::adapters::auth::password::{digest_password, generate_salt, verify_password};
use crate::domain::foundation::{
    default_avatar_url, AuthError, AuthenticatedUser, Credentials, UserId,
};
use crate::ports::AuthProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    uid: String,
    email: String,
    display_name: String,
    photo_url: String,
    salt: String,
    password_digest: String,
}

impl AccountRecord {
    fn to_user(&self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.uid.clone())
            .map_err(|_| AuthError::service_unavailable("account record has an empty uid"))?;
        Ok(AuthenticatedUser {
            id,
            email: self.email.clone(),
            display_name: Some(self.display_name.clone()),
            photo_url: Some(self.photo_url.clone()),
        })
    }
}

/// File-backed auth provider for the local backend.
pub struct LocalAuthProvider {
    path: PathBuf,
    accounts: Arc<RwLock<HashMap<String, AccountRecord>>>,
    session: watch::Sender<Option<AuthenticatedUser>>,
}

impl LocalAuthProvider {
    /// Opens (or initializes) the account registry at
    /// `<data_dir>/accounts.json`.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = data_dir.as_ref().join("accounts.json");
        let accounts = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| AuthError::service_unavailable(format!("corrupt registry: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(AuthError::service_unavailable(e.to_string())),
        };

        let (session, _) = watch::channel(None);
        Ok(Self {
            path,
            accounts: Arc::new(RwLock::new(accounts)),
            session,
        })
    }

    /// Number of registered accounts (for tests and diagnostics).
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    async fn persist(
        &self,
        accounts: &HashMap<String, AccountRecord>,
    ) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        }
        let raw = serde_json::to_vec_pretty(accounts)
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        fs::write(&self.path, raw)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))
    }

    fn register(credentials: &Credentials) -> AccountRecord {
        let local_part = credentials.email.split('@').next().unwrap_or("viajante");
        let mut display_name = local_part.to_string();
        if let Some(first) = display_name.get(0..1) {
            let first = first.to_uppercase();
            display_name.replace_range(0..1, &first);
        }

        let salt = generate_salt();
        let password_digest = digest_password(&salt, &credentials.password);
        AccountRecord {
            uid: uuid::Uuid::new_v4().to_string(),
            email: credentials.email.clone(),
            photo_url: default_avatar_url(&display_name),
            display_name,
            salt,
            password_digest,
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, AuthError> {
        if credentials.email.trim().is_empty() || !credentials.email.contains('@') {
            return Err(AuthError::InvalidEmail(credentials.email.clone()));
        }

        let mut accounts = self.accounts.write().await;
        let user = match accounts.get(&credentials.email) {
            Some(record) => {
                if !verify_password(&record.salt, &credentials.password, &record.password_digest) {
                    return Err(AuthError::InvalidCredentials);
                }
                record.to_user()?
            }
            None => {
                // First sign-in creates the account.
                let record = Self::register(credentials);
                info!(email = %credentials.email, "registered new local account");
                let user = record.to_user()?;
                accounts.insert(credentials.email.clone(), record);
                self.persist(&accounts).await?;
                user
            }
        };

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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn first_sign_in_auto_registers() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAuthProvider::open(dir.path()).await.unwrap();

        let user = provider
            .authenticate(&Credentials::new("ana@example.com", "segredo"))
            .await
            .unwrap();

        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
        assert!(user.photo_url.unwrap().contains("ui-avatars.com"));
        assert_eq!(provider.account_count().await, 1);
    }

    #[tokio::test]
    async fn wrong_password_for_known_account_is_rejected() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAuthProvider::open(dir.path()).await.unwrap();
        provider
            .authenticate(&Credentials::new("ana@example.com", "segredo"))
            .await
            .unwrap();

        let result = provider
            .authenticate(&Credentials::new("ana@example.com", "errada"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn accounts_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let provider = LocalAuthProvider::open(dir.path()).await.unwrap();
            provider
                .authenticate(&Credentials::new("ana@example.com", "segredo"))
                .await
                .unwrap();
        }

        let provider = LocalAuthProvider::open(dir.path()).await.unwrap();
        assert_eq!(provider.account_count().await, 1);
        let user = provider
            .authenticate(&Credentials::new("ana@example.com", "segredo"))
            .await
            .unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn session_watch_tracks_sign_in_and_out() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAuthProvider::open(dir.path()).await.unwrap();
        let rx = provider.subscribe();
        assert!(rx.borrow().is_none());

        provider
            .authenticate(&Credentials::new("ana@example.com", "segredo"))
            .await
            .unwrap();
        assert!(rx.borrow().is_some());

        provider.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAuthProvider::open(dir.path()).await.unwrap();
        let result = provider
            .authenticate(&Credentials::new("not-an-email", "pw"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
    }
}
