//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Upper bound on access token lifetime in minutes (one year)
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type tag returned by the login endpoint
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Upper bound on plaintext password size accepted by the hasher
pub const MAX_PASSWORD_BYTES: usize = 1024;

// =============================================================================
// Password Hashing (Argon2id work factor)
// =============================================================================

/// Default Argon2 memory cost in KiB
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;

/// Default Argon2 iteration count
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;

/// Default Argon2 degree of parallelism
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_STUDENT: &str = "student";

/// Teacher role
pub const ROLE_TEACHER: &str = "teacher";

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://kira.db?mode=rwc";

/// Database URL selecting the in-process credential store
pub const IN_MEMORY_DATABASE_URL: &str = "memory://";
