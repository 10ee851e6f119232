//! Local demo accounts and per-user statement history.
//!
//! Layout inside the store:
//! - `users`: JSON map of username -> [`UserRecord`]
//! - `currentUser`: the logged-in username
//! - `history_<user>`: JSON array of [`HistoryEntry`]
//!
//! Passwords are kept as entered. This is a demo profile, not an auth system.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StatementError};
use crate::store::KeyValueStore;
use crate::StatementSnapshot;

const USERS_KEY: &str = "users";
const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A statement saved to a user's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Milliseconds since the epoch at save time, bumped to stay unique
    pub id: i64,
    /// Display timestamp
    pub date: String,
    pub data: StatementSnapshot,
}

fn history_key(user: &str) -> String {
    format!("history_{user}")
}

pub struct AccountBook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AccountBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn users(&self) -> Result<BTreeMap<String, UserRecord>> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Create an account and log it in.
    pub fn create_account(&mut self, username: &str, password: &str, email: Option<&str>) -> Result<()> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(StatementError::MissingCredentials);
        }
        let mut users = self.users()?;
        if users.contains_key(username) {
            return Err(StatementError::UserExists(username.to_string()));
        }
        users.insert(
            username.to_string(),
            UserRecord {
                password: password.to_string(),
                email: email.map(str::to_string),
            },
        );
        self.store.set(USERS_KEY, serde_json::to_string(&users)?)?;
        self.store.set(CURRENT_USER_KEY, username.to_string())?;
        info!(user = username, "account created");
        Ok(())
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let users = self.users()?;
        match users.get(username) {
            Some(u) if u.password == password => {
                self.store.set(CURRENT_USER_KEY, username.to_string())?;
                info!(user = username, "logged in");
                Ok(())
            }
            _ => Err(StatementError::InvalidCredentials),
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY)
    }

    pub fn current_user(&self) -> Result<Option<String>> {
        self.store.get(CURRENT_USER_KEY)
    }

    fn require_user(&self) -> Result<String> {
        self.current_user()?.ok_or(StatementError::NotLoggedIn)
    }

    /// Email on file for the logged-in user, if any
    pub fn email_for_current(&self) -> Result<Option<String>> {
        let Some(user) = self.current_user()? else {
            return Ok(None);
        };
        Ok(self.users()?.get(&user).and_then(|u| u.email.clone()))
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        let user = self.require_user()?;
        match self.store.get(&history_key(&user))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a snapshot to the logged-in user's history.
    pub fn save_statement(&mut self, data: &StatementSnapshot, now: DateTime<Utc>) -> Result<HistoryEntry> {
        let user = self.require_user()?;
        let mut history = self.history()?;

        let mut id = now.timestamp_millis();
        if let Some(last) = history.last() {
            id = id.max(last.id + 1);
        }
        let entry = HistoryEntry {
            id,
            date: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            data: data.clone(),
        };
        history.push(entry.clone());
        self.store
            .set(&history_key(&user), serde_json::to_string(&history)?)?;
        info!(user = %user, id, "statement saved to profile");
        Ok(entry)
    }

    pub fn load_statement(&self, id: i64) -> Result<HistoryEntry> {
        self.history()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StatementError::HistoryNotFound(id))
    }
}
