use thiserror::Error;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("LOG_FILE_PATH and LOG_ARCHIVE_PATTERN must be set together")]
    PartialLogConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub http_host: String,
    pub http_port: u16,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogConfig {
    pub file: Option<LogFileConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogFileConfig {
    pub path: String,
    pub archive_pattern: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url =
            var("CONTACTS_DATABASE_URL").ok_or(ConfigError::Missing("CONTACTS_DATABASE_URL"))?;

        let db_max_connections = match var("CONTACTS_DB_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CONTACTS_DB_MAX_CONNECTIONS",
                        expected: "positive integer",
                        value,
                    });
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let http_host = var("CONTACTS_HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());

        let http_port = match var("CONTACTS_HTTP_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid {
                    name: "CONTACTS_HTTP_PORT",
                    expected: "u16",
                    value,
                })?,
            None => DEFAULT_HTTP_PORT,
        };

        let file = match (var("LOG_FILE_PATH"), var("LOG_ARCHIVE_PATTERN")) {
            (Some(path), Some(archive_pattern)) => Some(LogFileConfig {
                path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialLogConfig),
        };

        Ok(Self {
            database_url,
            db_max_connections,
            http_host,
            http_port,
            log: LogConfig { file },
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("CONTACTS_DATABASE_URL", "sqlite://contacts.db?mode=rwc")]).unwrap();
        assert_eq!(config.database_url, "sqlite://contacts.db?mode=rwc");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.http_addr(), "127.0.0.1:5000");
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("CONTACTS_DATABASE_URL", "mysql://user:pw@db:3306/contacts"),
            ("CONTACTS_DB_MAX_CONNECTIONS", "12"),
            ("CONTACTS_HTTP_HOST", "0.0.0.0"),
            ("CONTACTS_HTTP_PORT", "8080"),
            ("LOG_FILE_PATH", "logs/contacts.log"),
            ("LOG_ARCHIVE_PATTERN", "logs/contacts.{}.log.gz"),
        ])
        .unwrap();
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.http_addr(), "0.0.0.0:8080");
        assert_eq!(
            config.log.file,
            Some(LogFileConfig {
                path: "logs/contacts.log".to_string(),
                archive_pattern: "logs/contacts.{}.log.gz".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(
            config(&[("CONTACTS_DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("CONTACTS_DATABASE_URL"))
        );
    }

    #[test]
    fn test_invalid_numbers() {
        let err = config(&[
            ("CONTACTS_DATABASE_URL", "sqlite::memory:"),
            ("CONTACTS_HTTP_PORT", "70000"),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "CONTACTS_HTTP_PORT must be a valid u16, got '70000'"
        );

        assert!(matches!(
            config(&[
                ("CONTACTS_DATABASE_URL", "sqlite::memory:"),
                ("CONTACTS_DB_MAX_CONNECTIONS", "0"),
            ]),
            Err(ConfigError::Invalid {
                name: "CONTACTS_DB_MAX_CONNECTIONS",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_log_config() {
        assert_eq!(
            config(&[
                ("CONTACTS_DATABASE_URL", "sqlite::memory:"),
                ("LOG_FILE_PATH", "contacts.log"),
            ]),
            Err(ConfigError::PartialLogConfig)
        );
    }
}
