// Configuration for the reservation store and the console application

use std::fmt::Write;

use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};
use tracing::warn;

pub const DEFAULT_ALTERNATIVE_OFFSET_DAYS: u64 = 7;
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DATE_FORMAT_ENV: &str = "HOTEL_DATE_FORMAT";
const LOG_LEVEL_ENV: &str = "HOTEL_LOG_LEVEL";

// Store configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    // How far an alternative search window is shifted from the requested one
    pub alternative_offset_days: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            alternative_offset_days: DEFAULT_ALTERNATIVE_OFFSET_DAYS,
        }
    }
}

// Application-level configuration, owned by the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    // chrono format string used to read and print dates on the console
    pub date_format: String,
    // Fallback log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `HOTEL_DATE_FORMAT` and `HOTEL_LOG_LEVEL` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Only the log level, so logging can be installed before the rest is read.
    pub fn log_level_from_env() -> String {
        log_level_from_lookup(env_var)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            log_level: log_level_from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(format) = non_blank(lookup(DATE_FORMAT_ENV)) {
            config.date_format = date_format_or_default(&format);
        }

        config
    }
}

/// `format` when it can both print and read back a date, else the default format.
pub fn date_format_or_default(format: &str) -> String {
    if is_usable_date_format(format) {
        format.to_string()
    } else {
        warn!(
            format,
            fallback = DEFAULT_DATE_FORMAT,
            "Unusable date format, using the default"
        );
        DEFAULT_DATE_FORMAT.to_string()
    }
}

fn is_usable_date_format(format: &str) -> bool {
    // formatting with an erroneous item fails, so check the items first
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }

    let Some(sample) = NaiveDate::from_ymd_opt(2020, 2, 21) else {
        return false;
    };
    // time fields cannot be printed from a date and fail here too
    let mut printed = String::new();
    if write!(printed, "{}", sample.format(format)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&printed, format) == Ok(sample)
}

fn log_level_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    non_blank(lookup(LOG_LEVEL_ENV)).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
