//! In-memory credential store.
//!
//! Backs local runs without a database (`DATABASE_URL=memory://`) and tests.
//! Uniqueness is checked and the record inserted under a single write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::domain::{NewUser, School, User};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    /// Users keyed by email
    users: HashMap<String, User>,
    schools: HashMap<Uuid, School>,
}

/// Lock-guarded in-memory implementation of [`UserRepository`]
#[derive(Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a school so users can reference it.
    pub async fn add_school(&self, school: School) {
        self.tables.write().await.schools.insert(school.id, school);
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(email).cloned())
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<(User, Option<School>)>> {
        let tables = self.tables.read().await;
        let profile = tables.users.values().find(|u| u.id == id).map(|user| {
            let school = user
                .school_id
                .and_then(|school_id| tables.schools.get(&school_id).cloned());
            (user.clone(), school)
        });
        Ok(profile)
    }

    async fn create(&self, record: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(&record.email) {
            return Err(AppError::DuplicateAccount);
        }
        if let Some(school_id) = record.school_id {
            if !tables.schools.contains_key(&school_id) {
                return Err(AppError::validation(
                    "school_id does not reference an existing school",
                ));
            }
        }

        let user = User::register(Uuid::new_v4(), record);
        tables.users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::UserRole;

    fn record(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hashed".to_string(),
            first_name: "A".to_string(),
            last_name: None,
            school_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryUserStore::new();
        let user = store.create(record("a@x.com")).await.unwrap();

        assert_eq!(user.role, UserRole::Student);
        assert_eq!(store.find_by_email("a@x.com").await.unwrap().unwrap().id, user.id);
        assert_eq!(store.find_by_id(user.id).await.unwrap().unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let store = InMemoryUserStore::new();
        store.create(record("a@x.com")).await.unwrap();

        assert!(store.find_by_email("A@X.COM").await.unwrap().is_none());
        assert!(store.create(record("A@X.COM")).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(record("a@x.com")).await.unwrap();

        let result = store.create(record("a@x.com")).await;
        assert!(matches!(result, Err(AppError::DuplicateAccount)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_insert_once() {
        let store = Arc::new(InMemoryUserStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create(record("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, AppError::DuplicateAccount)),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_profile_joins_school() {
        let store = InMemoryUserStore::new();
        let school = School {
            id: Uuid::new_v4(),
            name: "Springfield Elementary".to_string(),
            location: None,
        };
        store.add_school(school.clone()).await;

        let mut new_user = record("a@x.com");
        new_user.school_id = Some(school.id);
        let user = store.create(new_user).await.unwrap();

        let (found, found_school) = store.find_profile(user.id).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found_school, Some(school));
    }

    #[tokio::test]
    async fn test_unknown_school_rejected() {
        let store = InMemoryUserStore::new();
        let mut new_user = record("a@x.com");
        new_user.school_id = Some(Uuid::new_v4());

        let result = store.create(new_user).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.is_empty().await);
    }
}
