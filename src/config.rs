use std::env;
use std::fmt;

/// Porta fixa do listener HTTP
pub const PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: Option<String>,
    pub host: String,
    pub use_transactions: bool,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} is not defined in .env file", name),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup("MONGODB_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConfigError::Missing("MONGODB_URI"))?;

        let database_name = lookup("MONGODB_DATABASE").filter(|name| !name.is_empty());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let use_transactions = lookup("MONGODB_TRANSACTIONS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        Ok(Self {
            mongodb_uri,
            database_name,
            host,
            use_transactions,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), PORT)
    }
}
