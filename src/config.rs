//! Runtime configuration, read from the process environment.

use crate::engine::paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::engine::CriteriaMode;
use crate::error::AppError;

const BIND_ADDR_VAR: &str = "DESK_BIND_ADDR";
const PAGE_SIZE_VAR: &str = "DESK_DEFAULT_PAGE_SIZE";
const STRICT_CRITERIA_VAR: &str = "DESK_STRICT_CRITERIA";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub default_page_size: usize,
    pub criteria_mode: CriteriaMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            criteria_mode: CriteriaMode::Lenient,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR).filter(|v| !v.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let size: usize = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{PAGE_SIZE_VAR} must be an integer, got {raw:?}"))
            })?;
            if !PAGE_SIZE_OPTIONS.contains(&size) {
                return Err(AppError::Config(format!(
                    "{PAGE_SIZE_VAR} must be one of {PAGE_SIZE_OPTIONS:?}, got {size}"
                )));
            }
            config.default_page_size = size;
        }

        if let Some(raw) = lookup(STRICT_CRITERIA_VAR) {
            config.criteria_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => CriteriaMode::Strict,
                "0" | "false" | "no" | "" => CriteriaMode::Lenient,
                _ => {
                    return Err(AppError::Config(format!(
                        "{STRICT_CRITERIA_VAR} must be true or false, got {raw:?}"
                    )))
                }
            };
        }

        Ok(config)
    }
}
