use thiserror::Error;

/// Configuration errors raised while reading the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors that stop the server from starting or keep it from serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("database migration failed: {0}")]
    Migration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn load_with_port(port: &'static str) -> Result<Config> {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| port.to_string()))?;
        Ok(config)
    }

    #[test]
    fn config_error_propagates_as_server_error() {
        let err = load_with_port("not-a-port").unwrap_err();
        assert!(matches!(
            err,
            ServerError::Config(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert!(err.to_string().starts_with("invalid value for PORT"));
    }

    #[test]
    fn valid_config_passes_through() {
        assert_eq!(load_with_port("8080").unwrap().port, 8080);
    }
}
