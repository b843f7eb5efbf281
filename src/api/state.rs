//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, UserRepository};
use crate::services::{AuthService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state over a credential store.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_store(
        users: Arc<dyn UserRepository>,
        database: Option<Arc<Database>>,
        config: &Config,
    ) -> AppResult<Self> {
        let container = Services::from_store(users, config)?;
        Ok(Self::from_container(&container, database))
    }

    /// Create application state from any service container.
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self::new(container.auth(), container.users(), database)
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            database,
        }
    }
}
