use std::env;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_QUERY_SUFFIX: &str = "restaurant";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_OSRM_PER_MINUTE: u32 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got \"{value}\"")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Endpoints and HTTP behaviour of the remote services.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub nominatim_url: String,
    pub osrm_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub query_suffix: String,
    pub osrm_requests_per_minute: NonZeroU32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            query_suffix: DEFAULT_QUERY_SUFFIX.to_string(),
            osrm_requests_per_minute: NonZeroU32::new(DEFAULT_OSRM_PER_MINUTE)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = match lookup("NEARBY_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid {
                    name: "NEARBY_HTTP_TIMEOUT_SECS",
                    expected: "a whole number of seconds",
                    value: raw.clone(),
                }
            })?),
            None => defaults.timeout,
        };

        let osrm_requests_per_minute = match lookup("OSRM_REQUESTS_PER_MINUTE") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::Invalid {
                    name: "OSRM_REQUESTS_PER_MINUTE",
                    expected: "a positive integer",
                    value: raw.clone(),
                })?,
            None => defaults.osrm_requests_per_minute,
        };

        Ok(Self {
            nominatim_url: lookup("NOMINATIM_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.nominatim_url),
            osrm_url: lookup("OSRM_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.osrm_url),
            user_agent: lookup("NEARBY_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout,
            query_suffix: lookup("NEARBY_QUERY_SUFFIX").unwrap_or(defaults.query_suffix),
            osrm_requests_per_minute,
        })
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
