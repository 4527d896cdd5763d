use std::env;
use std::path::PathBuf;

use crate::db::store::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub export_dir: PathBuf,

    pub log_json: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("CHECKINS_DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            storage_key: env::var("CHECKINS_STORAGE_KEY")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.into()),
            export_dir: env::var("CHECKINS_EXPORT_DIR")
                .unwrap_or_else(|_| ".".into())
                .into(),

            log_json: env::var("CHECKINS_LOG_JSON")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| "team_checkins=info".into()),
        }
    }
}
