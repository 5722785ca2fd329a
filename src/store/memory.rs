use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ChirpStore, RefreshTokenStore, StoreError, UserStore};
use crate::models::{Chirp, RefreshToken, User};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<String, RefreshToken>,
    chirps: Vec<Chirp>,
}

/// In-process store with the same semantics as `PgStore`.
///
/// Clones share state. Used by the test suites and for running the server
/// without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.users.len() as u64;
        state.users.clear();
        state.refresh_tokens.clear();
        state.chirps.clear();
        Ok(removed)
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn store_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::Query(format!("user {} does not exist", user_id)));
        }
        if state.refresh_tokens.contains_key(token) {
            return Err(StoreError::Conflict);
        }
        state.refresh_tokens.insert(
            token.to_string(),
            RefreshToken {
                token: token.to_string(),
                user_id,
                created_at,
                updated_at: created_at,
                expires_at,
                revoked_at: None,
            },
        );
        Ok(())
    }

    async fn lookup_active_user(&self, token: &str) -> Result<Uuid, StoreError> {
        let state = self.state.read().await;
        match state.refresh_tokens.get(token) {
            Some(record) if record.is_active_at(Utc::now()) => Ok(record.user_id),
            _ => Err(StoreError::NotFound),
        }
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.refresh_tokens.get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                let now = Utc::now();
                record.revoked_at = Some(now);
                record.updated_at = now;
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}

#[async_trait]
impl ChirpStore for MemoryStore {
    async fn create_chirp(&self, chirp: Chirp) -> Result<Chirp, StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&chirp.user_id) {
            return Err(StoreError::Query(format!(
                "user {} does not exist",
                chirp.user_id
            )));
        }
        state.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError> {
        let state = self.state.read().await;
        let mut chirps = state.chirps.clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Chirp, StoreError> {
        let state = self.state.read().await;
        state
            .chirps
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let before = state.chirps.len();
        state.chirps.retain(|c| c.id != id);
        if state.chirps.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
