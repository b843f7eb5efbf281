//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! credential records, password hashing and access tokens.

pub mod password;
pub mod token;
pub mod user;

pub use password::{Password, PasswordHasher};
pub use token::{Claims, IssuedToken, TokenError, TokenIssuer};
pub use user::{NewAccount, NewUser, School, User, UserResponse, UserRole};
