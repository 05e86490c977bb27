use crate::error::PsnError;
use std::env;
use std::time::Duration;

const DEFAULT_REGION: &str = "us";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_ONLINE_ID: &str = "me";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    /// Substituted for `{{region}}`.
    pub region: String,
    /// Substituted for `{{lang}}`.
    pub language: String,
    /// Substituted for `{{psn}}`, the signed-in account.
    pub online_id: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(access_token: impl Into<String>) -> Self {
        Config {
            access_token: access_token.into(),
            region: DEFAULT_REGION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            online_id: DEFAULT_ONLINE_ID.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, PsnError> {
        dotenvy::dotenv().ok();

        let access_token = env::var("PSN_ACCESS_TOKEN").map_err(|_| {
            PsnError::ConfigError("PSN_ACCESS_TOKEN not found in environment or .env file".to_string())
        })?;

        let mut config = Config::new(access_token);

        if let Ok(region) = env::var("PSN_REGION") {
            config.region = region;
        }
        if let Ok(language) = env::var("PSN_LANGUAGE") {
            config.language = language;
        }
        if let Ok(online_id) = env::var("PSN_ONLINE_ID") {
            config.online_id = online_id;
        }
        if let Ok(raw) = env::var("PSN_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                PsnError::ConfigError(format!("PSN_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
