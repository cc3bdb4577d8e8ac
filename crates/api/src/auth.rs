// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use bakehouse_persistence::{OperatorData, Persistence, PersistenceError, SessionData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Bakery staff: catalog, calendar and order management.
    Admin,
    /// A storefront shopper with an account.
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }

    fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {other}"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated account with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `operator_id` - The account ID
    /// * `login_name` - The normalized login name
    /// * `display_name` - The name shown in the back office
    /// * `role` - The role assigned to this account
    #[must_use]
    pub const fn new(operator_id: i64, login_name: String, display_name: String, role: Role) -> Self {
        Self {
            operator_id,
            login_name,
            display_name,
            role,
        }
    }

    fn from_operator(operator: &OperatorData) -> Result<Self, AuthError> {
        Ok(Self::new(
            operator.operator_id,
            operator.login_name.clone(),
            operator.display_name.clone(),
            Role::parse(&operator.role)?,
        ))
    }
}

/// Checks that `actor` is an admin.
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `action` - The action being attempted, for the error message
///
/// # Errors
///
/// Returns `AuthError::Unauthorized` for any other role.
pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Customer => {
            warn!(login_name = %actor.login_name, action, "Non-admin attempted admin action");
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("admin"),
            })
        }
    }
}

/// A freshly created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub session_token: String,
    pub actor: AuthenticatedActor,
    /// RFC 3339 expiry instant.
    pub expires_at: String,
}

/// Session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    const SESSION_LIFETIME: Duration = Duration::days(30);

    /// Verifies credentials and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The login name (case-insensitive)
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or disabled, the password
    /// does not match, or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<LoginSession, AuthError> {
        let operator: OperatorData = persistence
            .get_operator_by_login(login_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            })?;

        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let password_ok: bool = persistence
            .verify_password(password, &operator.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_ok {
            warn!(login_name = %operator.login_name, "Rejected login with wrong password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            });
        }

        let actor: AuthenticatedActor = AuthenticatedActor::from_operator(&operator)?;
        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::expiry_from(OffsetDateTime::now_utc())?;

        persistence
            .create_session(&session_token, operator.operator_id, &expires_at)
            .map_err(Self::map_persistence_error)?;
        persistence
            .update_last_login(operator.operator_id)
            .map_err(Self::map_persistence_error)?;

        info!(login_name = %actor.login_name, role = %actor.role, "Login succeeded");
        Ok(LoginSession {
            session_token,
            actor,
            expires_at,
        })
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its
    /// account is missing or disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;
        if OffsetDateTime::now_utc() >= expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let operator: OperatorData = persistence
            .get_operator_by_id(session.operator_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;
        if operator.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        AuthenticatedActor::from_operator(&operator)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)
    }

    /// Formats the expiry for a session created at `now`, to whole seconds.
    fn expiry_from(now: OffsetDateTime) -> Result<String, AuthError> {
        let fail = |reason: String| AuthError::AuthenticationFailed { reason };
        (now + Self::SESSION_LIFETIME)
            .replace_nanosecond(0)
            .map_err(|e| fail(e.to_string()))?
            .format(&Rfc3339)
            .map_err(|e| fail(format!("Failed to format expiration time: {e}")))
    }

    /// 256 bits from the thread-local CSPRNG, hex encoded.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
