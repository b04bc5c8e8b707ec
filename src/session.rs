//! Session lifecycle: login, signup, logout, profile updates.
//!
//! The manager owns the authenticated-user slot and keeps it in sync with
//! the durable store so a session survives process restarts. The persisted
//! user record and token are written together or not at all.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthBackend, AuthResponse};
use crate::error::Result;
use crate::events::{Event, EventKind, EventSink};
use crate::storage::KvStore;

/// Storage key for the serialized user record.
pub const USER_KEY: &str = "user";
/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Authenticated user. Identity is opaque; uniqueness is the auth
/// backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
struct SessionEventData<'a> {
    email: &'a str,
}

/// Owns the authenticated-user slot for the lifetime of the process.
pub struct SessionManager {
    store: Box<dyn KvStore>,
    backend: Box<dyn AuthBackend>,
    user: Option<User>,
    is_loading: bool,
    events: Option<EventSink>,
}

impl SessionManager {
    pub fn new<S, A>(store: S, backend: A) -> Self
    where
        S: KvStore + 'static,
        A: AuthBackend + 'static,
    {
        Self {
            store: Box::new(store),
            backend: Box::new(backend),
            user: None,
            is_loading: true,
            events: None,
        }
    }

    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    /// Restore a persisted session.
    ///
    /// A missing record leaves the session logged out; a malformed record
    /// is discarded the same way, with a warning for operators. Restore
    /// never fails, and `is_loading` is cleared exactly once.
    pub fn initialize(&mut self) {
        if let Some(raw) = self.store.get(USER_KEY) {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!(email = %user.email, "session restored");
                    self.user = Some(user);
                }
                Err(err) => {
                    warn!(%err, "discarding malformed session record");
                }
            }
        }
        self.is_loading = false;
    }

    /// Authenticate against the backend and persist the session.
    ///
    /// On failure the prior state is unchanged and the error carries a
    /// single human-readable message for the form banner.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        let response = self.backend.login(email, password).await?;
        self.install(response)
    }

    /// Register a new account; a successful signup authenticates exactly
    /// like a login.
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&User> {
        let response = self.backend.signup(name, email, password).await?;
        self.install(response)
    }

    /// Clear the session. Never fails; storage errors are logged and
    /// swallowed so logout cannot strand a user in a half-signed-in state.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.remove(TOKEN_KEY) {
            warn!(%err, "failed to clear persisted token");
        }
        if let Err(err) = self.store.remove(USER_KEY) {
            warn!(%err, "failed to clear persisted user");
        }
        if let Some(user) = self.user.take() {
            self.emit(EventKind::SessionEnded, &user);
        }
    }

    /// Replace name and email on the current user and re-persist the
    /// record, preserving the id and leaving the token untouched.
    ///
    /// Local-only: the backend is not called. Callers needing a
    /// server-confirmed update wrap this. No-op when logged out.
    pub fn update_profile(&mut self, name: &str, email: &str) -> Result<()> {
        let Some(current) = self.user.as_ref() else {
            return Ok(());
        };
        let updated = User {
            id: current.id.clone(),
            name: name.to_string(),
            email: email.to_string(),
        };
        let serialized = serde_json::to_string(&updated)?;
        self.store.set(USER_KEY, &serialized)?;
        self.emit(EventKind::ProfileUpdated, &updated);
        self.user = Some(updated);
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The persisted bearer token, for callers attaching auth headers.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    fn install(&mut self, response: AuthResponse) -> Result<&User> {
        let AuthResponse { user, token } = response;
        let serialized = serde_json::to_string(&user)?;
        self.store.set(USER_KEY, &serialized)?;
        if let Err(err) = self.store.set(TOKEN_KEY, &token) {
            // The record and token are persisted together or not at all.
            let _ = self.store.remove(USER_KEY);
            return Err(err);
        }
        self.emit(EventKind::SessionStarted, &user);
        Ok(self.user.insert(user))
    }

    fn emit(&mut self, kind: EventKind, user: &User) {
        let Some(sink) = self.events.as_mut() else {
            return;
        };
        let event = match Event::new(kind).with_data(SessionEventData { email: &user.email }) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "failed to encode session event");
                return;
            }
        };
        if let Err(err) = sink.emit(&event) {
            warn!(%err, "failed to emit session event");
        }
    }
}
