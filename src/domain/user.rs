//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_STUDENT, ROLE_TEACHER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => ROLE_STUDENT,
            UserRole::Teacher => ROLE_TEACHER,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

/// Unknown stored values fall back to the default role.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_TEACHER => UserRole::Teacher,
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Student,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity (credential record)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub school_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered user with the default role.
    pub fn register(id: Uuid, record: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: record.email,
            password_hash: record.password_hash,
            first_name: record.first_name,
            last_name: record.last_name,
            role: UserRole::default(),
            school_id: record.school_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Registration input handed to the auth service (already shape-validated).
#[derive(Clone)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub password: String,
    pub school_id: Option<Uuid>,
}

// Don't expose the plaintext password in debug output
impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .field("school_id", &self.school_id)
            .finish()
    }
}

/// Record persisted by the credential store on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub school_id: Option<Uuid>,
}

/// School domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct School {
    pub id: Uuid,
    #[schema(example = "Springfield Elementary")]
    pub name: String,
    #[schema(example = "Springfield")]
    pub location: Option<String>,
}

/// User profile (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "student@example.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// User role
    #[schema(example = "student")]
    pub role: UserRole,
    /// School the user belongs to, if any
    pub school: Option<School>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(user: User, school: Option<School>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            school,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::new(user, None)
    }
}
