//! Service Container - Centralized service access.
//!
//! Wires every service to the same credential store so registration,
//! login and profile lookups observe one consistent set of accounts.

use std::sync::Arc;

use super::{AuthService, Authenticator, UserManager, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Build all services over one credential store.
    ///
    /// Fails if the configured hash work factor is rejected.
    pub fn from_store(users: Arc<dyn UserRepository>, config: &Config) -> AppResult<Self> {
        let auth_service = Arc::new(Authenticator::from_config(users.clone(), config)?);
        let user_service = Arc::new(UserManager::new(users));

        Ok(Self::new(auth_service, user_service))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
