//! Configuration management.
//!
//! Credentials and database identifiers come from the environment,
//! with an optional `.env` file loaded first (a missing `.env` is not
//! an error). All absent variables are collected and reported in a
//! single fatal error so a fresh setup fails once, not three times.

use crate::error::{Error, Result};

/// Environment variables required for a run.
const REQUIRED_VARS: [&str; 3] = ["NOTION_API_KEY", "MASTER_DB_ID", "SLAVE_DB_ID"];

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notion integration token.
    pub api_key: String,
    /// Identifier of the master (source) database.
    pub master_db_id: String,
    /// Identifier of the slave (destination) database.
    pub slave_db_id: String,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming every missing variable.
    pub fn from_env() -> Result<Self> {
        // Best-effort: absence of a .env file falls through to the
        // process environment.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// An empty value counts as missing, matching shell conventions
    /// like `NOTION_API_KEY= ndsync`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|var| lookup(var).is_none_or(|v| v.is_empty()))
            .map(|var| (*var).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::Config { missing });
        }

        Ok(Self {
            api_key: lookup("NOTION_API_KEY").unwrap_or_default(),
            master_db_id: lookup("MASTER_DB_ID").unwrap_or_default(),
            slave_db_id: lookup("SLAVE_DB_ID").unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn all_missing_vars_reported_together() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        match err {
            Error::Config { missing } => {
                assert_eq!(missing, REQUIRED_VARS.map(String::from).to_vec());
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("NOTION_API_KEY", "secret_test"),
            ("MASTER_DB_ID", ""),
            ("SLAVE_DB_ID", "slave456"),
        ]))
        .unwrap_err();
        match err {
            Error::Config { missing } => assert_eq!(missing, vec!["MASTER_DB_ID".to_string()]),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn complete_environment_loads() {
        let config = Config::from_lookup(lookup_from(&[
            ("NOTION_API_KEY", "secret_test"),
            ("MASTER_DB_ID", "master123"),
            ("SLAVE_DB_ID", "slave456"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "secret_test");
        assert_eq!(config.master_db_id, "master123");
        assert_eq!(config.slave_db_id, "slave456");
    }
}
