//! Credential store: user repository trait and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::{
    school::Entity as SchoolEntity,
    user::{self, ActiveModel, Entity as UserEntity},
};
use crate::config::ROLE_STUDENT;
use crate::domain::{NewUser, School, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must enforce email uniqueness atomically on `create`,
/// reporting a collision as `AppError::DuplicateAccount`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact email match
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID together with their school
    async fn find_profile(&self, id: Uuid) -> AppResult<Option<(User, Option<School>)>>;

    /// Persist a newly registered user with the default role
    async fn create(&self, record: NewUser) -> AppResult<User>;
}

/// SeaORM-backed credential store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_profile(&self, id: Uuid) -> AppResult<Option<(User, Option<School>)>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(SchoolEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|(user, school)| (User::from(user), school.map(School::from))))
    }

    async fn create(&self, record: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            role: Set(ROLE_STUDENT.to_string()),
            school_id: Set(record.school_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }
}

/// Translate constraint violations raised by the database into domain errors.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateAccount,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::validation("school_id does not reference an existing school")
        }
        _ => AppError::from(err),
    }
}
