//! Authentication service: token validation and credential exchange.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{ApiToken, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;
use crate::utils::token_generator::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository + ?Sized, U: UserRepository + ?Sized> {
    tokens: Arc<T>,
    users: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository + ?Sized, U: UserRepository + ?Sized> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `tokens` - token repository
    /// - `users` - user repository used to resolve token owners
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(tokens: Arc<T>, users: Arc<U>, signing_secret: String) -> Self {
        Self {
            tokens,
            users,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a raw bearer token to its owner.
    ///
    /// On success, updates the token's `last_used_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked,
    /// or its owner no longer exists.
    /// Returns [`AppError::Forbidden`] if the owner account is inactive.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token);

        let Some(api_token) = self.tokens.find_active(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        let Some(user) = self.users.find_by_id(api_token.user_id).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Token owner no longer exists"}),
            ));
        };

        if !user.is_active {
            return Err(AppError::forbidden(
                "Forbidden",
                json!({"reason": "User account is inactive"}),
            ));
        }

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id = user.id, "Failed to record token usage");
        }

        Ok(user)
    }

    /// Exchanges a username and password for a freshly issued token.
    ///
    /// Records `last_login` for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the credentials do not match an
    /// active account.
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|u| u.is_active && verify_password(password, &u.password_hash))
            .ok_or_else(|| AppError::field("non_field_errors", INVALID_CREDENTIALS))?;

        let (token, _) = self.issue_token(user.id).await?;

        if let Err(e) = self.users.record_login(user.id).await {
            tracing::warn!(error = %e, user_id = user.id, "Failed to record login");
        }

        tracing::info!(user_id = user.id, "Issued API token");
        Ok(token)
    }

    /// Issues a new token for a user and returns the raw value with its record.
    ///
    /// The raw value is not stored and cannot be recovered later.
    pub async fn issue_token(&self, user_id: i64) -> Result<(String, ApiToken), AppError> {
        let token = generate_token();
        let record = self
            .tokens
            .create_token(user_id, &self.hash_token(&token))
            .await?;
        Ok((token, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use crate::utils::password::hash_password;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn user(id: i64, is_active: bool, password_hash: String) -> User {
        User {
            id,
            username: "alice".to_string(),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            is_staff: false,
            is_active,
            is_superuser: false,
            last_login: None,
            date_joined: Utc::now(),
            groups: vec![],
        }
    }

    fn api_token(user_id: i64, token_hash: &str) -> ApiToken {
        ApiToken {
            id: 1,
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        tokens
            .expect_find_active()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|hash| Ok(Some(api_token(7, hash))));
        tokens
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(user(id, true, String::new()))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        let result = service.authenticate(token).await.unwrap();

        assert_eq!(result.id, 7);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        let users = MockUserRepository::new();

        tokens
            .expect_find_active()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_inactive_user_is_forbidden() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        tokens
            .expect_find_active()
            .times(1)
            .returning(|hash| Ok(Some(api_token(7, hash))));
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(user(id, false, String::new()))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        let result = service.authenticate("token").await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_obtain_token_success() {
        let mut tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        let hash = hash_password("pw").unwrap();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user(3, true, hash.clone()))));
        users
            .expect_record_login()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(()));
        tokens
            .expect_create_token()
            .withf(|user_id, hash| *user_id == 3 && hash.len() == 64)
            .times(1)
            .returning(|user_id, hash| Ok(api_token(user_id, hash)));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        let token = service.obtain_token("alice", "pw").await.unwrap();

        assert_eq!(token.len(), 40);
    }

    #[tokio::test]
    async fn test_obtain_token_wrong_password() {
        let tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        let hash = hash_password("pw").unwrap();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user(3, true, hash.clone()))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        let err = service.obtain_token("alice", "nope").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(
            err.to_error_info().details["non_field_errors"][0],
            INVALID_CREDENTIALS
        );
    }

    #[tokio::test]
    async fn test_obtain_token_inactive_user() {
        let tokens = MockTokenRepository::new();
        let mut users = MockUserRepository::new();

        let hash = hash_password("pw").unwrap();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user(3, false, hash.clone()))));

        let service = AuthService::new(Arc::new(tokens), Arc::new(users), test_secret());

        assert!(service.obtain_token("alice", "pw").await.is_err());
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let service = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            test_secret(),
        );

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
