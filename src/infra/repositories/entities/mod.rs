//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Relationships are explicit foreign keys; joins are issued by repository
//! methods rather than loaded lazily.

pub mod question;
pub mod quiz;
pub mod reward;
pub mod school;
pub mod user;
pub mod user_history;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use school::{Entity as SchoolEntity, Model as SchoolModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
