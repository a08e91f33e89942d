use std::env;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub log_dir: String,
    pub catalog_path: Option<String>, // JSON array of items seeded at boot
    pub change_feed_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            log_dir: "./logs".to_string(),
            catalog_path: None,
            change_feed_capacity: 256,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            change_feed_capacity: parse_var("CHANGE_FEED_CAPACITY", defaults.change_feed_capacity)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.parse()
            .map_err(|_| AppError::Validation(format!("{} must be a number, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
