use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::User;
use crate::store::{StoreError, UserStore};

/// HashMap-backed store. Backs the integration test harness; carries no
/// persistence across restarts.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().expect("user store lock poisoned");

        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            full_name: full_name.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let mut users = self.users.write().expect("user store lock poisoned");
        if let Some(user) = users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}
