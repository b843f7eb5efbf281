//! User service - Profile lookups for authenticated users.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::UserResponse;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user's public profile, including their school if any
    async fn get_profile(&self, id: Uuid) -> AppResult<UserResponse>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_profile(&self, id: Uuid) -> AppResult<UserResponse> {
        let (user, school) = self.users.find_profile(id).await?.ok_or_not_found()?;
        Ok(UserResponse::new(user, school))
    }
}
