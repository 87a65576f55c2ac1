//! Server settings loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Runtime settings of the HTTP server.
///
/// | Env Var              | Default              |
/// |----------------------|----------------------|
/// | `HOST`               | `0.0.0.0`            |
/// | `PORT`               | `3000`               |
/// | `REFERENCE_DATA_DIR` | `./config/reference` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bind address.
    pub host: IpAddr,
    /// Bind port.
    pub port: u16,
    /// Directory holding the reference data YAML files.
    pub reference_data_dir: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through a lookup function, falling back to defaults
    /// for absent keys.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_raw = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let host = host_raw
            .parse()
            .map_err(|_| Self::invalid("HOST", &host_raw))?;

        let port_raw = lookup("PORT").unwrap_or_else(|| "3000".into());
        let port = port_raw
            .parse()
            .map_err(|_| Self::invalid("PORT", &port_raw))?;

        let reference_data_dir = lookup("REFERENCE_DATA_DIR")
            .unwrap_or_else(|| "./config/reference".into())
            .into();

        Ok(Self {
            host,
            port,
            reference_data_dir,
        })
    }

    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn invalid(key: &str, value: &str) -> EngineError {
        EngineError::ConfigParseError {
            path: key.to_string(),
            message: format!("invalid value '{}'", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.addr().to_string(), "0.0.0.0:3000");
        assert_eq!(settings.reference_data_dir, PathBuf::from("./config/reference"));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("REFERENCE_DATA_DIR", "/etc/payroll"),
        ]))
        .unwrap();
        assert_eq!(settings.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(settings.reference_data_dir, PathBuf::from("/etc/payroll"));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = Settings::from_lookup(lookup_from(&[("PORT", "eighty")]));
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "PORT"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
