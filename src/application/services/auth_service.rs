//! Authentication Service
//!
//! Handles login with lockout after repeated failures, JWT issuing, and
//! logout through a registry of live token ids.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::OutcomeLabel;
use crate::application::dto::LoginForm;
use crate::config::AuthSettings;
use crate::domain::{Account, AccountRepository, Role};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::password::verify_password;
use crate::shared::validation::validate_form;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate with username and password
    async fn login(&self, form: LoginForm) -> Result<LoginResult, AuthError>;

    /// Revoke an access token
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;

    /// Validate an access token that has not been revoked
    async fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError>;
}

/// Authentication tokens response
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDto {
    pub username: String,
    pub display_name: String,
    pub roles: Vec<Role>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            display_name: account.display_name,
            roles: account.roles.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    #[serde(flatten)]
    pub tokens: AuthTokens,
    pub account: AccountDto,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID for token revocation tracking
    pub jti: String,
    /// Roles held when the token was issued
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account locked after too many failed attempts")]
    AccountLocked,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Session not found or revoked")]
    SessionNotFound,

    #[error(transparent)]
    Connection(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutcomeLabel for AuthError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidCredentials
            | Self::AccountLocked
            | Self::AccountDisabled
            | Self::TokenExpired
            | Self::InvalidToken
            | Self::SessionNotFound => "refused",
            Self::Connection(_) => "connection",
            Self::Internal(_) => "internal",
        }
    }
}

/// Live token ids mapped to their expiry (Unix seconds). Logging out removes
/// the entry; expired entries are dropped whenever a new session opens.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, i64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, jti: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        self.sessions.retain(|_, exp| *exp > now);
        self.sessions.insert(jti.to_string(), expires_at);
    }

    pub fn is_open(&self, jti: &str) -> bool {
        let now = Utc::now().timestamp();
        self.sessions.get(jti).is_some_and(|exp| *exp > now)
    }

    pub fn close(&self, jti: &str) -> bool {
        self.sessions.remove(jti).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    sessions: Arc<SessionRegistry>,
    settings: AuthSettings,
}

impl<A> AuthServiceImpl<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, sessions: Arc<SessionRegistry>, settings: AuthSettings) -> Self {
        Self {
            account_repo,
            sessions,
            settings,
        }
    }

    /// Generate an access token and register its id
    fn generate_token(&self, account: &Account) -> Result<AuthTokens, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.settings.token_expiry_minutes);

        // Unique JWT ID for revocation tracking
        let jti = uuid::Uuid::new_v4().to_string();

        let claims = Claims {
            sub: account.username.clone(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
            roles: account.roles.iter().copied().collect(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        self.sessions.open(&jti, claims.exp);

        Ok(AuthTokens {
            access_token,
            expires_in: self.settings.token_expiry_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    /// Decode and validate access token
    fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

    /// Count a wrong password; returns the error the caller should see.
    async fn record_failure(&self, mut account: Account) -> Result<AuthError, AuthError> {
        account.failed_attempts += 1;
        let locked = account.is_locked(self.settings.max_failed_attempts);
        self.account_repo.save(&account).await?;

        tracing::warn!(
            username = %account.username,
            failed_attempts = account.failed_attempts,
            locked,
            "Login failed"
        );
        Ok(if locked {
            AuthError::AccountLocked
        } else {
            AuthError::InvalidCredentials
        })
    }
}

#[async_trait]
impl<A> AuthService for AuthServiceImpl<A>
where
    A: AccountRepository + 'static,
{
    async fn login(&self, form: LoginForm) -> Result<LoginResult, AuthError> {
        validate_form(&form)?;

        let mut account = self
            .account_repo
            .find_by_username(form.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.enabled {
            return Err(AuthError::AccountDisabled);
        }
        if account.is_locked(self.settings.max_failed_attempts) {
            return Err(AuthError::AccountLocked);
        }

        if !verify_password(&form.password, &account.password_hash) {
            return Err(self.record_failure(account).await?);
        }

        if account.failed_attempts > 0 {
            account.failed_attempts = 0;
            account = self.account_repo.save(&account).await?;
        }

        let tokens = self.generate_token(&account)?;
        tracing::info!(username = %account.username, "Login succeeded");

        Ok(LoginResult {
            tokens,
            account: AccountDto::from(account),
        })
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let claims = self.decode_access_token(access_token)?;
        if !self.sessions.close(&claims.jti) {
            return Err(AuthError::SessionNotFound);
        }
        tracing::info!(username = %claims.sub, "Logged out");
        Ok(())
    }

    async fn validate_token(&self, access_token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode_access_token(access_token)?;
        if !self.sessions.is_open(&claims.jti) {
            return Err(AuthError::SessionNotFound);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::MockAccountRepository;
    use crate::infrastructure::repositories::InMemoryAccountRepository;
    use crate::infrastructure::simulation::{ServerLink, SMOS};
    use crate::shared::password::hash_password;

    fn settings() -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-secret-key-that-is-at-least-32-bytes".into(),
            token_expiry_minutes: 15,
            max_failed_attempts: 3,
        }
    }

    fn account(enabled: bool) -> Account {
        Account {
            username: "admin".into(),
            display_name: "Administrator".into(),
            password_hash: hash_password("password123").unwrap(),
            roles: BTreeSet::from([Role::Administrator]),
            enabled,
            failed_attempts: 0,
        }
    }

    fn login(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.into(),
            password: password.into(),
        }
    }

    async fn service() -> AuthServiceImpl<InMemoryAccountRepository> {
        let repo = InMemoryAccountRepository::new(ServerLink::new(SMOS, true));
        repo.save(&account(true)).await.unwrap();
        AuthServiceImpl::new(Arc::new(repo), Arc::new(SessionRegistry::new()), settings())
    }

    #[tokio::test]
    async fn test_login_issues_token_carrying_roles() {
        let service = service().await;
        let result = service.login(login("admin", "password123")).await.unwrap();
        assert_eq!(result.tokens.token_type, "Bearer");
        assert_eq!(result.account.roles, vec![Role::Administrator]);

        let claims = service.validate_token(&result.tokens.access_token).await.unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.has_role(Role::Administrator));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let service = service().await;
        let token = service
            .login(login("admin", "password123"))
            .await
            .unwrap()
            .tokens
            .access_token;

        service.logout(&token).await.unwrap();
        assert!(matches!(
            service.validate_token(&token).await,
            Err(AuthError::SessionNotFound)
        ));
        assert!(matches!(service.logout(&token).await, Err(AuthError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_lockout_after_max_failures() {
        let service = service().await;
        for _ in 0..2 {
            assert!(matches!(
                service.login(login("admin", "wrong")).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(matches!(
            service.login(login("admin", "wrong")).await,
            Err(AuthError::AccountLocked)
        ));
        // Even the right password is refused now
        assert!(matches!(
            service.login(login("admin", "password123")).await,
            Err(AuthError::AccountLocked)
        ));
    }

    #[tokio::test]
    async fn test_success_resets_failure_counter() {
        let service = service().await;
        service.login(login("admin", "wrong")).await.unwrap_err();
        service.login(login("admin", "wrong")).await.unwrap_err();
        service.login(login("admin", "password123")).await.unwrap();

        // Two more failures stay below the threshold of three
        service.login(login("admin", "wrong")).await.unwrap_err();
        assert!(matches!(
            service.login(login("admin", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_blank_fields_and_unknown_user() {
        let service = service().await;
        assert!(matches!(
            service.login(login("", "")).await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            service.login(login("ghost", "password123")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_disabled_account_never_checks_password() {
        let mut repo = MockAccountRepository::new();
        let disabled = account(false);
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(disabled.clone())));
        repo.expect_save().never();

        let service = AuthServiceImpl::new(Arc::new(repo), Arc::new(SessionRegistry::new()), settings());
        assert!(matches!(
            service.login(login("admin", "wrong")).await,
            Err(AuthError::AccountDisabled)
        ));
    }

    #[test]
    fn test_expired_sessions_are_closed_and_pruned() {
        let registry = SessionRegistry::new();
        let now = Utc::now().timestamp();
        registry.open("stale", now - 60);
        assert!(!registry.is_open("stale"));
        assert_eq!(registry.len(), 1);

        registry.open("fresh", now + 900);
        assert!(registry.is_open("fresh"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.close("stale"));
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let service = service().await;
        assert!(matches!(
            service.validate_token("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
