//! Account manager — the orchestrator behind every auth endpoint.
//!
//! Holds no cross-request state of its own: everything mutable lives on
//! the user record behind the `UserStore` port. Token work is CPU-bound;
//! the only suspension points are store lookups/writes and the mail
//! delivery call, each awaited before the next step proceeds.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{info, warn};

use askhub_core::config::auth::AuthConfig;
use askhub_core::config::mail::MailConfig;
use askhub_core::error::AppError;
use askhub_core::result::AppResult;
use askhub_core::traits::Mailer;
use askhub_entity::user::{NewUser, User, UserRole, UserStore};

use crate::jwt::{JwtDecoder, JwtEncoder, SignedToken};
use crate::password::PasswordHasher;
use crate::reset::{ResetCredential, hash_token};

/// A user together with a freshly signed session token.
///
/// Returned by every flow that logs the caller in.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// The authenticated user.
    pub user: User,
    /// The new session token.
    pub token: SignedToken,
}

/// Outcome of the non-fatal authentication probe.
///
/// Anonymous traffic is the expected case here, so this is a tagged
/// result rather than an error.
#[derive(Debug, Clone)]
pub enum AuthState {
    /// A valid session exists.
    Authenticated(User),
    /// No valid session; `message` says why in user-safe terms.
    Anonymous {
        /// User-facing explanation.
        message: String,
    },
}

/// Orchestrates credential verification, token issuance, and the
/// password reset lifecycle over the store and mailer collaborators.
#[derive(Clone)]
pub struct AccountManager {
    /// User persistence port.
    users: Arc<dyn UserStore>,
    /// Mail delivery port.
    mailer: Arc<dyn Mailer>,
    /// Session token signer.
    encoder: JwtEncoder,
    /// Session token verifier.
    decoder: JwtDecoder,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Auth configuration.
    auth_config: AuthConfig,
    /// Mail configuration.
    mail_config: MailConfig,
}

impl std::fmt::Debug for AccountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountManager")
            .field("auth_config", &self.auth_config)
            .finish()
    }
}

impl AccountManager {
    /// Creates a new account manager with all required dependencies.
    pub fn new(
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        auth_config: AuthConfig,
        mail_config: MailConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            encoder: JwtEncoder::new(&auth_config),
            decoder: JwtDecoder::new(&auth_config),
            hasher: PasswordHasher::new(&auth_config)?,
            users,
            mailer,
            auth_config,
            mail_config,
        })
    }

    /// Registers a new account and logs it in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<IssuedSession> {
        let email = email.to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("This email is already registered."));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "New account created");
        self.issue(user)
    }

    /// Find-or-create for externally verified identities (e.g. a
    /// federated sign-in that already proved ownership of `email`).
    ///
    /// Returns the session and whether a new account was created. New
    /// accounts get an unguessable random password; the owner can claim
    /// a real one through the reset flow.
    pub async fn find_or_create(&self, name: &str, email: &str) -> AppResult<(IssuedSession, bool)> {
        let email = email.to_lowercase();
        if let Some(user) = self.users.find_by_email(&email).await? {
            return Ok((self.issue(user)?, false));
        }

        let mut random = [0u8; 32];
        OsRng.fill_bytes(&mut random);
        let password_hash = self.hasher.hash_password(&hex::encode(random))?;

        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "New external account created");
        Ok((self.issue(user)?, true))
    }

    /// Verifies credentials and issues a session token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedSession> {
        let user = self.users.find_by_email(&email.to_lowercase()).await?;

        // One failure path for unknown email and wrong password.
        let user = match user {
            Some(user) if self.hasher.verify_password(password, &user.password_hash)? => user,
            _ => return Err(AppError::authentication("Incorrect email or password!")),
        };

        self.issue(user)
    }

    /// The per-request authentication gate.
    ///
    /// Verifies the token, loads the identity, and rejects tokens issued
    /// before the last password change. Every failure is the same
    /// authentication category so callers cannot probe account existence.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.decoder.verify(token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::authentication("The user belonging to this token does no longer exist.")
            })?;

        if user.changed_password_after(claims.iat) {
            return Err(AppError::authentication(
                "User recently changed password! Please log in again.",
            ));
        }

        Ok(user)
    }

    /// Non-fatal variant of [`authenticate`](Self::authenticate).
    ///
    /// Used by the "am I logged in" probe: anonymous access is routine,
    /// so the result is a tagged state and never an error. Storage
    /// failures also collapse to anonymous here — this path is
    /// non-authoritative by design.
    pub async fn auth_state(&self, token: Option<&str>) -> AuthState {
        let Some(token) = token else {
            return AuthState::Anonymous {
                message: "You are not logged in! Please log in to get access.".to_string(),
            };
        };

        match self.authenticate(token).await {
            Ok(user) => AuthState::Authenticated(user),
            Err(err) => AuthState::Anonymous {
                message: err.message,
            },
        }
    }

    /// Starts the reset flow: mint a credential, persist its hash, and
    /// mail the raw token.
    ///
    /// A repeat call overwrites the stored hash/expiry, so the earlier
    /// emailed token silently stops working. If delivery fails, the
    /// stored fields are cleared before the error propagates — no
    /// valid-looking reset state may outlive a mail that never arrived.
    pub async fn forgot_password(&self, email: &str) -> AppResult<()> {
        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::not_found("There is no user with email address."))?;

        let window_minutes = self.auth_config.reset_token_ttl_minutes;
        let credential = ResetCredential::generate(Duration::minutes(window_minutes));
        self.users
            .set_reset_credential(user.id, &credential.hash, credential.expires_at)
            .await?;

        let reset_url = format!(
            "{}/{}",
            self.mail_config.reset_url_base.trim_end_matches('/'),
            credential.token
        );

        if let Err(err) = self
            .mailer
            .send_password_reset(&user.name, &user.email, &reset_url, window_minutes)
            .await
        {
            warn!(user_id = %user.id, error = %err, "Reset mail delivery failed, clearing credential");
            self.users.clear_reset_credential(user.id).await?;
            return Err(AppError::delivery(
                "There was an error sending the email. Try again later!",
            ));
        }

        info!(user_id = %user.id, "Password reset token sent");
        Ok(())
    }

    /// Completes the reset flow with the emailed raw token.
    ///
    /// The store lookup enforces hash match and expiry; the password
    /// update clears the credential in the same statement, making the
    /// token single-use. Ends with a fresh session (auto-login).
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> AppResult<IssuedSession> {
        let now = Utc::now();
        let user = self
            .users
            .find_by_reset_hash(&hash_token(raw_token), now)
            .await?
            .ok_or_else(|| AppError::validation("Token is invalid or has expired"))?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users
            .update_password(user.id, &password_hash, now)
            .await?;

        info!(user_id = %user.id, "Password reset completed");
        self.issue_refreshed(user, password_hash, now)
    }

    /// Changes the password of an already-authenticated user.
    ///
    /// Re-confirms the current password first; a mismatch is an
    /// authentication failure, not a validation one.
    pub async fn update_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<IssuedSession> {
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::authentication("Your current password is wrong"));
        }

        let now = Utc::now();
        let password_hash = self.hasher.hash_password(new_password)?;
        self.users
            .update_password(user.id, &password_hash, now)
            .await?;

        info!(user_id = %user.id, "Password updated");
        self.issue_refreshed(user.clone(), password_hash, now)
    }

    /// Signs a session token for `user`.
    fn issue(&self, user: User) -> AppResult<IssuedSession> {
        let token = self.encoder.sign(user.id)?;
        Ok(IssuedSession { user, token })
    }

    /// Signs a session for a user whose password was just rewritten,
    /// mirroring the store update on the in-memory record.
    fn issue_refreshed(
        &self,
        mut user: User,
        password_hash: String,
        changed_at: chrono::DateTime<Utc>,
    ) -> AppResult<IssuedSession> {
        user.password_hash = password_hash;
        user.password_changed_at = Some(changed_at);
        user.password_reset_token_hash = None;
        user.password_reset_expires = None;
        self.issue(user)
    }
}
