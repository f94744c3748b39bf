use std::{collections::HashMap, env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::anyhow;
use dyne_core::Locale;
use tracing::info;

pub struct Config {
    pub port: u16,
    pub catalog_path: PathBuf,
    pub dishes_path: PathBuf,
    pub concepts_path: Option<PathBuf>,
    pub locale: Locale,
    pub result_limit: usize,
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> anyhow::Result<Self> {
        Ok(Self {
            port: try_load(vars, "DYNE_PORT", "3000")?,
            catalog_path: try_load(vars, "DYNE_CATALOG_PATH", "data/restaurants.json")?,
            dishes_path: try_load(vars, "DYNE_DISHES_PATH", "data/dishes.json")?,
            concepts_path: vars.get("DYNE_CONCEPTS_PATH").map(PathBuf::from),
            locale: try_load(vars, "DYNE_LOCALE", "en")?,
            result_limit: try_load(vars, "DYNE_RESULT_LIMIT", "3")?,
            cors_origin: try_load(vars, "DYNE_CORS_ORIGIN", "http://localhost:5173")?,
        })
    }
}

fn try_load<T: FromStr>(vars: &HashMap<String, String>, key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = vars.get(key).map(String::as_str).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value {raw}: {e}"))
}
