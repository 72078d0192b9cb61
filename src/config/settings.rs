//! Process settings from the environment: bind address and SQLite file location.

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DATABASE_FILE: &str = "database.sqlite";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
}

impl Settings {
    /// Read `HOST`, `PORT`, `SQLITE_PATH` and `SQLITE_DATA_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match var("HOST") {
            Some(h) => h.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                message: format!("'{}' is not an IP address", h),
            })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                message: DEFAULT_HOST.into(),
            })?,
        };
        let port = match var("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                message: format!("'{}' is not a port number", p),
            })?,
            None => DEFAULT_PORT,
        };
        let database_path = match (var("SQLITE_PATH"), var("SQLITE_DATA_DIR")) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(dir)) => PathBuf::from(dir).join(DATABASE_FILE),
            (None, None) => std::env::temp_dir().join("customer-crm").join(DATABASE_FILE),
        };

        Ok(Settings {
            host,
            port,
            database_path,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
