use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Authentication,
    Parsing,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TransportError(_) => ErrorCategory::Transport,
            EtlError::LoginFailed { .. } => ErrorCategory::Authentication,
            EtlError::SelectorError { .. } | EtlError::UrlError(_) => ErrorCategory::Parsing,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常是暫時性的，由排程方決定是否重試
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Authentication
            | ErrorCategory::Configuration
            | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Parsing => ErrorSeverity::Critical,
        }
    }

    /// 給排程方的錯誤代碼
    pub fn error_code(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "VENDOR_DOWN",
            ErrorCategory::Authentication => "LOGIN_FAILED",
            _ => "UNKNOWN_ERROR",
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::TransportError(e) if e.is_timeout() => {
                "The vendor site did not answer in time; try again later or raise http.timeout_seconds".to_string()
            }
            EtlError::TransportError(_) => {
                "The vendor site is unreachable or returned an error; try again later".to_string()
            }
            EtlError::LoginFailed { .. } => {
                "Check the login and password in the [fields] section of the config".to_string()
            }
            EtlError::SelectorError { .. } | EtlError::UrlError(_) => {
                "The vendor profile is inconsistent; this needs a code fix".to_string()
            }
            EtlError::IoError(_) => "Check that the output directory is writable".to_string(),
            EtlError::SerializationError(_) => {
                "The bill batch could not be serialized; report this as a bug".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::TransportError(_) => "Could not reach the billing portal".to_string(),
            EtlError::LoginFailed { message } if message.trim().is_empty() => {
                "The billing portal rejected the credentials".to_string()
            }
            EtlError::LoginFailed { message } => {
                format!("The billing portal rejected the credentials: {}", message.trim())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
