//! # User Repository
//!
//! Registered farmers, buyers and admins. Emails are unique
//! (case-insensitive).

use std::sync::Arc;

use agri_core::{Role, User};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn list_all(&self) -> StoreResult<Vec<User>>;

    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>>;

    /// Fails with `Duplicate` if the id or the email is taken.
    async fn insert(&self, user: &User) -> StoreResult<User>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let email = email.trim();
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn insert(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::duplicate("user id", &user.id));
        }
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::duplicate("email", &user.email));
        }

        debug!(id = %user.id, role = %user.role, "Inserting user");
        users.push(user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, email: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            name: id.to_uppercase(),
            role,
            phone: None,
            location: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_email_ignores_case() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("u-1", "Farmer@Agri.in", Role::Farmer))
            .await
            .unwrap();

        let found = repo.get_by_email(" farmer@agri.in ").await.unwrap().unwrap();
        assert_eq!(found.id, "u-1");
        assert!(repo.get_by_email("buyer@agri.in").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicates_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("u-1", "a@agri.in", Role::Buyer)).await.unwrap();

        let err = repo
            .insert(&user("u-2", "A@agri.in", Role::Buyer))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate email: 'A@agri.in' already exists");

        let err = repo
            .insert(&user("u-1", "b@agri.in", Role::Buyer))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_list_by_role() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("u-1", "a@agri.in", Role::Farmer)).await.unwrap();
        repo.insert(&user("u-2", "b@agri.in", Role::Buyer)).await.unwrap();
        repo.insert(&user("u-3", "c@agri.in", Role::Farmer)).await.unwrap();

        assert_eq!(repo.list_by_role(Role::Farmer).await.unwrap().len(), 2);
        assert_eq!(repo.list_by_role(Role::Admin).await.unwrap().len(), 0);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }
}
