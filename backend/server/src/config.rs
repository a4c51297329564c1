use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use tracing::info;

const DEFAULT_PORT: &str = "8000";
const DEFAULT_DATASET_PATH: &str = "master_food_database.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub dataset_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("RUST_PORT", DEFAULT_PORT)?,
            dataset_path: try_load("DATASET_PATH", DEFAULT_DATASET_PATH)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}
