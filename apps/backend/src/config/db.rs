//! Database profile selection.

use crate::error::AppError;

pub const ENV_DATABASE_URL: &str = "MURAL_DATABASE_URL";
const DEFAULT_DATABASE_URL: &str = "sqlite://mural.db?mode=rwc";

/// Which database a process talks to. Production reads its URL from the
/// environment; tests always get a private in-memory database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    Prod,
    Test,
}

pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => Ok(std::env::var(ENV_DATABASE_URL)
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())),
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_is_in_memory() {
        assert_eq!(db_url(DbProfile::Test).unwrap(), "sqlite::memory:");
    }
}
