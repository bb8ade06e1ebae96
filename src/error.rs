//! Process-level errors.
//!
//! Request handling has no error path of its own: dependency failures are
//! rendered into the status body. Everything here ends the process.

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = AppError::from(ConfigError::InvalidPort {
            var: "REDIS_PORT",
            value: "notanumber".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid REDIS_PORT: \"notanumber\" is not a valid port number"
        );
    }

    #[test]
    fn test_server_error_message() {
        let err = AppError::from(ServerError::InvalidAddress("nope:80".to_string()));
        assert!(err.to_string().starts_with("Server error: Invalid listen address"));
    }
}
