//! Authentication collaborator boundary.
//!
//! Login and signup are remote calls from the core's point of view: the
//! trait keeps the transport opaque so a real HTTP client can replace the
//! bundled backend without touching callers. `SimulatedAuth` stands in for
//! that backend with an in-memory account table and a fixed round-trip
//! delay.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::session::User;

/// Successful login or signup: the authenticated user plus a bearer token.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse>;
}

struct Account {
    user: User,
    password: String,
}

/// In-memory authentication backend with simulated latency.
///
/// Accounts live for the lifetime of the instance. Failed logins return one
/// generic message whether the email or the password was wrong, so callers
/// cannot probe which accounts exist.
pub struct SimulatedAuth {
    accounts: Mutex<HashMap<String, Account>>,
    latency: Duration,
}

impl SimulatedAuth {
    pub fn new(latency: Duration) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            latency,
        }
    }

    /// Seed an account, e.g. for tests or demo data.
    pub fn with_account(mut self, name: &str, email: &str, password: &str) -> Self {
        let key = normalize_email(email);
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.trim().to_string(),
        };
        self.accounts.get_mut().insert(
            key,
            Account {
                user,
                password: password.to_string(),
            },
        );
        self
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthBackend for SimulatedAuth {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        self.round_trip().await;

        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(&normalize_email(email))
            .filter(|account| account.password == password)
            .ok_or_else(|| Error::Auth("invalid email or password".to_string()))?;

        Ok(AuthResponse {
            user: account.user.clone(),
            token: issue_token(),
        })
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        self.round_trip().await;

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Auth("email and password are required".to_string()));
        }

        let mut accounts = self.accounts.lock().await;
        let key = normalize_email(email);
        if accounts.contains_key(&key) {
            return Err(Error::Auth(
                "an account with this email already exists".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.to_string(),
        };
        accounts.insert(
            key,
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );

        Ok(AuthResponse {
            user,
            token: issue_token(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// Opaque bearer token; uniqueness is all the simulation needs.
fn issue_token() -> String {
    format!("tok-{}", Uuid::new_v4())
}
