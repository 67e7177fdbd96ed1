// src/services/session_service.rs
//
// Session Manager - authentication lifecycle
//
// STATE MACHINE:
//   Unknown -> Restoring -> {Authenticated, Anonymous}
//   Anonymous -> Authenticating -> {Authenticated, Anonymous}
//   Authenticated -> LoggingOut -> Anonymous
//
// SINGLE WRITER:
// - This service is the only caller of `configure_auth` and the only
//   writer of the credential store.
// - `user` is Some iff a token is stored and attached to the transport.
//   A login whose credentials cannot be stored therefore fails.
// - The store removes the token before the user and attempts both, so
//   anything a failed clear leaves behind is a partial record that the
//   next restore rejects.
//
// CONCURRENCY:
// - At most one session operation should be in flight. The UI enforces
//   that by reading `is_loading`; this service does not queue.
// - The state lock is never held across an await.

use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{
    validate_login, validate_registration, LoginCredentials, RegisterCredentials, User,
};
use crate::error::{AppError, AppResult, CONNECTIVITY_MESSAGE, INVALID_RESPONSE_MESSAGE};
use crate::events::{
    AuthenticationFailed, EventBus, SessionRestored, UserLoggedIn, UserLoggedOut, UserRegistered,
};
use crate::integrations::http::{ApiTransport, NetworkError};
use crate::repositories::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unknown,
    Restoring,
    Anonymous,
    Authenticating,
    Authenticated,
    LoggingOut,
}

/// Snapshot of the session handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub phase: SessionPhase,
    pub last_error: Option<String>,
}

impl Session {
    fn initial() -> Self {
        Self {
            user: None,
            phase: SessionPhase::Unknown,
            last_error: None,
        }
    }

    /// True while restoring, logging in or registering.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Restoring | SessionPhase::Authenticating
        )
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthOperation {
    Login,
    Register,
}

impl AuthOperation {
    fn name(self) -> &'static str {
        match self {
            AuthOperation::Login => "login",
            AuthOperation::Register => "register",
        }
    }

    fn path(self) -> &'static str {
        match self {
            AuthOperation::Login => "/auth/login",
            AuthOperation::Register => "/auth/register",
        }
    }
}

#[derive(Deserialize)]
struct AuthEnvelope {
    token: Option<String>,
    data: Option<AuthData>,
}

#[derive(Deserialize)]
struct AuthData {
    user: Option<User>,
}

/// Extract `{ token, data: { user } }`; anything short of both is a shape error.
fn parse_auth_response(body: Value) -> AppResult<(String, User)> {
    let envelope: AuthEnvelope = serde_json::from_value(body)
        .map_err(|_| AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string()))?;

    let token = envelope.token.filter(|t| !t.trim().is_empty());
    let user = envelope.data.and_then(|d| d.user);

    match (token, user) {
        (Some(token), Some(user)) => Ok((token, user)),
        _ => Err(AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string())),
    }
}

/// Any server reply to an auth call is a rejection of the credentials.
fn classify_auth_error(err: NetworkError) -> AppError {
    match err {
        NetworkError::ServerError { message, .. } => AppError::Auth(message),
        NetworkError::NoResponse(_) => AppError::Connectivity(CONNECTIVITY_MESSAGE.to_string()),
        NetworkError::MalformedBody(_) => {
            AppError::ResponseShape(INVALID_RESPONSE_MESSAGE.to_string())
        }
        NetworkError::RequestSetup(message) => AppError::Other(message),
    }
}

pub struct SessionService {
    transport: Arc<dyn ApiTransport>,
    credential_store: Arc<dyn CredentialStore>,
    event_bus: Arc<EventBus>,
    state: RwLock<Session>,
}

impl SessionService {
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        credential_store: Arc<dyn CredentialStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            transport,
            credential_store,
            event_bus,
            state: RwLock::new(Session::initial()),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.snapshot().user
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Session),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    // ========================================================================
    // RESTORE
    // ========================================================================

    /// Rebuild the session from the credential store. Never fails.
    ///
    /// A partial or unreadable record is cleared and the session ends
    /// anonymous; the cause is logged only.
    pub async fn restore(&self) -> Session {
        self.update(|s| {
            s.phase = SessionPhase::Restoring;
            s.last_error = None;
        });

        let record = match self.credential_store.load().await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("credential restore failed, starting anonymous: {}", e);
                None
            }
        };

        match record {
            Some(record) => {
                self.transport.configure_auth(Some(record.token));
                let user_id = record.user.id.clone();
                log::info!("session restored for {}", record.user.username);
                self.update(|s| {
                    s.user = Some(record.user);
                    s.phase = SessionPhase::Authenticated;
                });
                self.event_bus.emit(SessionRestored::new(Some(user_id)));
            }
            None => {
                // Removes an orphaned half, if any
                self.clear_credentials("restore").await;
                self.transport.configure_auth(None);
                self.update(|s| {
                    s.user = None;
                    s.phase = SessionPhase::Anonymous;
                });
                self.event_bus.emit(SessionRestored::new(None));
            }
        }

        self.snapshot()
    }

    // ========================================================================
    // LOGIN / REGISTER
    // ========================================================================

    pub async fn login(&self, credentials: LoginCredentials) -> AppResult<User> {
        if let Err(e) = validate_login(&credentials) {
            return Err(self.reject_locally(e.into()));
        }

        let body = serde_json::to_value(&credentials)?;
        self.authenticate(AuthOperation::Login, body).await
    }

    /// `credentials.confirm_password`, when set, must equal the password.
    pub async fn register(&self, credentials: RegisterCredentials) -> AppResult<User> {
        if let Err(e) = validate_registration(&credentials) {
            return Err(self.reject_locally(e.into()));
        }

        let body = serde_json::to_value(&credentials)?;
        self.authenticate(AuthOperation::Register, body).await
    }

    fn reject_locally(&self, err: AppError) -> AppError {
        self.update(|s| s.last_error = Some(err.to_string()));
        err
    }

    async fn authenticate(&self, operation: AuthOperation, body: Value) -> AppResult<User> {
        self.update(|s| {
            s.phase = SessionPhase::Authenticating;
            s.last_error = None;
        });

        log::debug!("{} attempt", operation.name());

        let outcome = match self.transport.post(operation.path(), body).await {
            Ok(body) => parse_auth_response(body),
            Err(e) => Err(classify_auth_error(e)),
        };

        let (token, user) = match outcome {
            Ok(pair) => pair,
            Err(err) => {
                log::warn!("{} failed: {}", operation.name(), err);
                self.update(|s| {
                    // A failed re-login keeps an existing session intact
                    s.phase = if s.user.is_some() {
                        SessionPhase::Authenticated
                    } else {
                        SessionPhase::Anonymous
                    };
                    s.last_error = Some(err.to_string());
                });
                self.event_bus
                    .emit(AuthenticationFailed::new(operation.name(), err.to_string()));
                return Err(err);
            }
        };

        if let Err(err) = self.credential_store.save(&token, &user).await {
            log::warn!(
                "{} accepted but credentials could not be stored: {}",
                operation.name(),
                err
            );
            // Whatever was stored before may be half overwritten
            self.clear_credentials(operation.name()).await;
            self.transport.configure_auth(None);
            self.update(|s| {
                s.user = None;
                s.phase = SessionPhase::Anonymous;
                s.last_error = Some(err.to_string());
            });
            self.event_bus
                .emit(AuthenticationFailed::new(operation.name(), err.to_string()));
            return Err(err);
        }

        self.transport.configure_auth(Some(token));
        self.update(|s| {
            s.user = Some(user.clone());
            s.phase = SessionPhase::Authenticated;
        });

        log::info!("{} succeeded for {}", operation.name(), user.username);
        match operation {
            AuthOperation::Login => self
                .event_bus
                .emit(UserLoggedIn::new(user.id.clone(), user.username.clone())),
            AuthOperation::Register => self
                .event_bus
                .emit(UserRegistered::new(user.id.clone(), user.username.clone())),
        }

        Ok(user)
    }

    // ========================================================================
    // LOGOUT
    // ========================================================================

    /// Best-effort: in-memory state is cleared even if the store is not.
    pub async fn logout(&self) {
        self.update(|s| s.phase = SessionPhase::LoggingOut);

        self.clear_credentials("logout").await;

        self.transport.configure_auth(None);
        self.update(|s| {
            s.user = None;
            s.phase = SessionPhase::Anonymous;
            s.last_error = None;
        });

        self.event_bus.emit(UserLoggedOut::new());
    }

    /// Best-effort removal of both stored entries.
    async fn clear_credentials(&self, context: &str) {
        if let Err(e) = self.credential_store.clear().await {
            log::warn!("{}: failed to clear stored credentials: {}", context, e);
        }
    }
}
