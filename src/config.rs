use std::env;

use crate::error::CountError;

const DEFAULT_MAX_CONNECTIONS: u32 = 2;

/// Settings read from the environment (and `.env`, loaded in `main`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, CountError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CountError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(CountError::MissingEnv("DATABASE_URL"))?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(CountError::InvalidEnv("DATABASE_MAX_CONNECTIONS", raw)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, CountError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(
            config_from(&[]),
            Err(CountError::MissingEnv("DATABASE_URL"))
        ));
    }

    #[test]
    fn max_connections_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/votes")]).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/votes");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn invalid_max_connections_is_rejected() {
        let result = config_from(&[
            ("DATABASE_URL", "postgres://localhost/votes"),
            ("DATABASE_MAX_CONNECTIONS", "zero"),
        ]);
        assert!(matches!(result, Err(CountError::InvalidEnv("DATABASE_MAX_CONNECTIONS", v)) if v == "zero"));
    }
}
