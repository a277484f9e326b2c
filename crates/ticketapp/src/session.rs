// Session store: user registry plus the single active session, with expiry
// and a session-changed broadcast. "Login" is a plaintext password compare
// against the local registry; the whole backend is simulated client-side.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use ticketapp_core::error::AuthError;
use ticketapp_core::logger::StoreLogger;
use ticketapp_core::models::{PublicUser, Session, User};
use ticketapp_core::storage::{StorageBackend, keys};
use ticketapp_core::subscribers::{SubscriberRegistry, Subscription};

use crate::options::SessionOptions;
use crate::seed::seed_users;

/// User accounts and the current session over an injected backend.
///
/// Reads are pure: an expired or malformed persisted session is reported as
/// absent but never cleared and never broadcast. Only [`login`](Self::login)
/// and [`logout`](Self::logout) touch the session slot and notify
/// subscribers.
#[derive(Debug)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
    listeners: SubscriberRegistry<Option<Session>>,
    duration: TimeDelta,
    logger: StoreLogger,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_options(backend, SessionOptions::default(), StoreLogger::default())
    }

    pub fn with_options(
        backend: Arc<dyn StorageBackend>,
        options: SessionOptions,
        logger: StoreLogger,
    ) -> Self {
        Self {
            backend,
            listeners: SubscriberRegistry::new(),
            duration: options.duration,
            logger,
        }
    }

    /// Register a new account. Does not create a session; callers log in
    /// separately, matching the original signup → login flow.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AuthError> {
        let email = email.trim().to_lowercase();
        let mut users = self.read_users().await;

        if users
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(&email))
        {
            return Err(AuthError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: name.trim().to_string(),
            email,
            password: password.to_string(),
            created_at: now,
            updated_at: now,
        };
        let public = PublicUser::from(&user);
        users.push(user);
        self.write_users(&users).await;
        self.logger
            .debug(&format!("registered user #{}", public.id));
        Ok(public)
    }

    /// Exchange credentials for a fresh session. Overwrites any previous
    /// session and broadcasts the new one to all subscribers.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        let users = self.read_users().await;

        let user = users
            .iter()
            .find(|user| user.email == email)
            .filter(|user| user.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session {
            user: PublicUser::from(user),
            token: Uuid::new_v4().to_string(),
            expires_at: Utc::now() + self.duration,
        };
        self.write_session(&session).await;
        self.logger
            .debug(&format!("session opened for user #{}", session.user.id));
        self.listeners.emit(&Some(session.clone()));
        Ok(session)
    }

    /// Clear the persisted session and broadcast `None`. Idempotent.
    pub async fn logout(&self) {
        if let Err(err) = self.backend.remove(keys::SESSION).await {
            self.logger
                .warn(&format!("failed to clear session slot: {err}"));
        }
        self.logger.debug("session closed");
        self.listeners.emit(&None);
    }

    /// Whether an unexpired session exists. Pure: no clearing, no
    /// broadcast.
    pub async fn require_auth(&self) -> bool {
        self.current_session().await.is_some()
    }

    /// The active session, or `None` when absent or expired. Pure.
    pub async fn current_session(&self) -> Option<Session> {
        self.read_session().await.filter(|s| !s.is_expired())
    }

    /// The persisted session regardless of expiry, for diagnostics.
    pub async fn peek_session(&self) -> Option<Session> {
        self.read_session().await
    }

    /// Register a listener for login/logout broadcasts. The payload is the
    /// new session, or `None` after logout.
    pub fn subscribe(
        &self,
        listener: impl Fn(&Option<Session>) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn read_users(&self) -> Vec<User> {
        let raw = match self.backend.get(keys::USERS).await {
            Ok(raw) => raw,
            Err(err) => {
                self.logger
                    .warn(&format!("users slot unreadable, reseeding: {err}"));
                None
            }
        };

        match raw.map(|raw| serde_json::from_str::<Vec<User>>(&raw)) {
            Some(Ok(users)) if !users.is_empty() => users,
            Some(Ok(_)) => {
                // Registry exists but is empty: the demo account must exist.
                let seeded = seed_users(Utc::now());
                self.write_users(&seeded).await;
                seeded
            }
            Some(Err(err)) => {
                self.logger
                    .warn(&format!("users slot corrupt, reseeding: {err}"));
                let seeded = seed_users(Utc::now());
                self.write_users(&seeded).await;
                seeded
            }
            None => {
                let seeded = seed_users(Utc::now());
                self.write_users(&seeded).await;
                seeded
            }
        }
    }

    async fn write_users(&self, users: &[User]) {
        match serde_json::to_string(users) {
            Ok(json) => {
                if let Err(err) = self.backend.set(keys::USERS, &json).await {
                    self.logger
                        .warn(&format!("failed to persist users slot: {err}"));
                }
            }
            Err(err) => self
                .logger
                .error(&format!("users slot serialization failed: {err}")),
        }
    }

    async fn read_session(&self) -> Option<Session> {
        let raw = match self.backend.get(keys::SESSION).await {
            Ok(raw) => raw?,
            Err(err) => {
                self.logger
                    .warn(&format!("session slot unreadable: {err}"));
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                self.logger.warn(&format!("session slot corrupt: {err}"));
                None
            }
        }
    }

    async fn write_session(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => {
                if let Err(err) = self.backend.set(keys::SESSION, &json).await {
                    self.logger
                        .warn(&format!("failed to persist session slot: {err}"));
                }
            }
            Err(err) => self
                .logger
                .error(&format!("session slot serialization failed: {err}")),
        }
    }
}
