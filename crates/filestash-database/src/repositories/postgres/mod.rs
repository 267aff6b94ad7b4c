//! PostgreSQL-backed repositories.

pub mod file;
pub mod user;

pub use file::PgFileRepository;
pub use user::PgUserRepository;

/// Convert an unsigned page bound into a SQL `BIGINT` parameter.
pub(crate) fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
