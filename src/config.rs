//! Runtime configuration read from the environment (and `.env` when present).

use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a number (got {value:?})")]
    InvalidNumber { name: &'static str, value: String },
    #[error("COURTS must name at least one court")]
    NoCourts,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON snapshot of the whole tournament; state is in-memory only when unset.
    pub data_file: Option<PathBuf>,
    /// `name,court` CSV used to seed session 1 when no snapshot exists yet.
    pub seed_csv: Option<PathBuf>,
    /// Court names, top tier first.
    pub courts: Vec<String>,
    pub sessions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_file: None,
            seed_csv: None,
            courts: default_courts(),
            sessions: 3,
        }
    }
}

fn default_courts() -> Vec<String> {
    ["Championship", "Challenger", "Development"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

impl Config {
    /// Load `.env` if there is one, then read `HOST`, `PORT`, `DATA_FILE`, `SEED_CSV`,
    /// `COURTS` and `SESSIONS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a config from any variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let courts = match var("COURTS") {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if names.is_empty() {
                    return Err(ConfigError::NoCourts);
                }
                names
            }
            None => defaults.courts,
        };
        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .map(|v| parse_number("PORT", v))
                .transpose()?
                .unwrap_or(defaults.port),
            data_file: var("DATA_FILE").filter(|s| !s.is_empty()).map(PathBuf::from),
            seed_csv: var("SEED_CSV").filter(|s| !s.is_empty()).map(PathBuf::from),
            courts,
            sessions: var("SESSIONS")
                .map(|v| parse_number("SESSIONS", v))
                .transpose()?
                .unwrap_or(defaults.sessions),
        })
    }
}
