use std::env;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANDIDATE_SERVICE_URL: &str = "http://localhost:8082";
pub const DEFAULT_CANDIDATE_TIMEOUT_SECS: u64 = 10;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}


// Configuration abstracts config options for the party service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub env: String,
    pub candidate_service_url: String,
    pub candidate_timeout_secs: u64,
    pub log_level: String,
}

impl Configuration {
    pub fn new(env: &str) -> Self {
        Configuration {
            env: env.to_string(),
            candidate_service_url: DEFAULT_CANDIDATE_SERVICE_URL.to_string(),
            candidate_timeout_secs: DEFAULT_CANDIDATE_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }

    // Reads PARTY_ENV, CANDIDATE_SERVICE_URL, CANDIDATE_TIMEOUT_SECS and PARTY_LOG_LEVEL,
    // falling back to the defaults of `new` for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Configuration::new(
            env::var("PARTY_ENV").unwrap_or_else(|_| "dev".to_string()).as_str());
        if let Ok(url) = env::var("CANDIDATE_SERVICE_URL") {
            if !url.trim().is_empty() {
                config.candidate_service_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Some(secs) = env::var("CANDIDATE_TIMEOUT_SECS").ok().and_then(|s| s.parse::<u64>().ok()) {
            config.candidate_timeout_secs = secs;
        }
        if let Ok(level) = env::var("PARTY_LOG_LEVEL") {
            config.log_level = level;
        }
        config
    }
}
