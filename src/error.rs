#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Device command failed: {0}")]
    Command(String),

    #[error("Device does not support this operation: {0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigSource(#[from] config::ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::ConfigSource(_) => 2,
            AppError::Auth(_) => 3,
            AppError::Connection(_) => 4,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "connection",
            AppError::Auth(_) => "auth",
            AppError::Command(_) => "command",
            AppError::UnsupportedOperation(_) => "unsupported_operation",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Config(_) | AppError::ConfigSource(_) => "config",
            AppError::Json(_) => "json",
            AppError::Io(_) => "io",
        }
    }

    /// Structured form printed in place of a result: `error` carries the
    /// message, `kind` the machine-readable category.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "kind": self.error_type(),
        })
    }
}
