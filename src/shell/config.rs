use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_OWNER_ID: &str = "owner";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{key} is not a valid YYYY-MM-DD date: {value:?}")]
    InvalidDate { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON document per owner.
    pub data_dir: PathBuf,
    pub owner_id: String,
    /// Pins the reporting date; defaults to the local date.
    pub today: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("LEDGER_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let owner_id = match lookup("LEDGER_OWNER_ID") {
            Some(v) if v.trim().is_empty() => return Err(ConfigError::Empty("LEDGER_OWNER_ID")),
            Some(v) => v.trim().to_string(),
            None => DEFAULT_OWNER_ID.to_string(),
        };

        let today = match lookup("LEDGER_TODAY").filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidDate {
                    key: "LEDGER_TODAY",
                    value: v.clone(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            owner_id,
            today,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
