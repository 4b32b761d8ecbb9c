//! PostgreSQL implementation of the auth provider.
//!
//! Users live in a `users` table with salted password digests. As with
//! the local adapter, an unknown e-mail auto-registers on first
//! sign-in.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::adapters::auth::password::{digest_password, generate_salt, verify_password};
use crate::domain::foundation::{
    default_avatar_url, AuthError, AuthenticatedUser, Credentials, UserId,
};
use crate::ports::AuthProvider;

/// PostgreSQL auth provider for the remote multi-user backend.
pub struct PostgresAuthProvider {
    pool: PgPool,
    session: watch::Sender<Option<AuthenticatedUser>>,
}

impl PostgresAuthProvider {
    /// Creates a provider over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        let (session, _) = watch::channel(None);
        Self { pool, session }
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
        let local_part = credentials.email.split('@').next().unwrap_or("viajante");
        let mut display_name = local_part.to_string();
        if let Some(first) = display_name.get(0..1) {
            let first = first.to_uppercase();
            display_name.replace_range(0..1, &first);
        }
        let photo_url = default_avatar_url(&display_name);

        let id = Uuid::new_v4();
        let salt = generate_salt();
        let digest = digest_password(&salt, &credentials.password);

        sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, photo_url, salt, password_digest)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&credentials.email)
        .bind(&display_name)
        .bind(&photo_url)
        .bind(&salt)
        .bind(&digest)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::service_unavailable(format!("failed to create user: {}", e)))?;

        info!(email = %credentials.email, "registered new user");
        Ok(AuthenticatedUser {
            id: UserId::new(id.to_string()).map_err(|e| {
                AuthError::service_unavailable(e.to_string())
            })?,
            email: credentials.email.clone(),
            display_name: Some(display_name),
            photo_url: Some(photo_url),
        })
    }
}

#[async_trait]
impl AuthProvider for PostgresAuthProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, AuthError> {
        if credentials.email.trim().is_empty() || !credentials.email.contains('@') {
            return Err(AuthError::InvalidEmail(credentials.email.clone()));
        }

        let row = sqlx::query(
            r#"
            SELECT id, email, display_name, photo_url, salt, password_digest
            FROM users WHERE email = $1
            "#,
        )
        .bind(&credentials.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::service_unavailable(format!("failed to look up user: {}", e)))?;

        let user = match row {
            Some(row) => {
                let salt: String = row
                    .try_get("salt")
                    .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
                let stored: String = row
                    .try_get("password_digest")
                    .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
                if !verify_password(&salt, &credentials.password, &stored) {
                    return Err(AuthError::InvalidCredentials);
                }

                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
                AuthenticatedUser {
                    id: UserId::new(id.to_string())
                        .map_err(|e| AuthError::service_unavailable(e.to_string()))?,
                    email: row
                        .try_get("email")
                        .map_err(|e| AuthError::service_unavailable(e.to_string()))?,
                    display_name: row
                        .try_get("display_name")
                        .map_err(|e| AuthError::service_unavailable(e.to_string()))?,
                    photo_url: row
                        .try_get("photo_url")
                        .map_err(|e| AuthError::service_unavailable(e.to_string()))?,
                }
            }
            None => self.register(credentials).await?,
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
