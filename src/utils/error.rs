use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Stored cart under key '{key}' is not a valid line item list: {source}")]
    CorruptCart {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store file '{path}' is unreadable: {message}")]
    CorruptStore { path: String, message: String },

    #[error("No cart entry at index {index} (cart has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Amount too large to compute: {context}")]
    AmountOverflow { context: String },

    #[error("Order delivery rejected: {message}")]
    DeliveryError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CartError::IndexOutOfRange { .. }
            | CartError::ValidationError { .. }
            | CartError::AmountOverflow { .. } => ErrorSeverity::Low,
            CartError::ApiError(_) | CartError::DeliveryError { .. } => ErrorSeverity::Medium,
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::MissingConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::SerializationError(_) => ErrorSeverity::High,
            CartError::IoError(_) | CartError::CorruptCart { .. } | CartError::CorruptStore { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(_) => "Could not reach the messaging service".to_string(),
            CartError::DeliveryError { message } => {
                format!("The messaging service refused the order: {}", message)
            }
            CartError::IndexOutOfRange { index, len } => {
                format!("There is no item #{} in the cart ({} items)", index, len)
            }
            CartError::ValidationError { message } => format!("Invalid item: {}", message),
            CartError::AmountOverflow { context } => {
                format!("The cart total is too large to compute ({})", context)
            }
            CartError::CorruptCart { key, .. } => {
                format!("The saved cart ('{}') is damaged and cannot be read", key)
            }
            CartError::CorruptStore { path, .. } => {
                format!("The cart store file '{}' is damaged", path)
            }
            CartError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::ApiError(_) => "Check the network connection and the telegram.api_base setting",
            CartError::DeliveryError { .. } => "Check telegram.bot_token and telegram.chat_id",
            CartError::IndexOutOfRange { .. } => "Run `list` to see valid item positions",
            CartError::ValidationError { .. } => {
                "Quantity must be at least 1 and price cannot be negative"
            }
            CartError::AmountOverflow { .. } => "Remove the oversized item with `remove`",
            CartError::CorruptCart { .. } => "Run `clear` to reset the cart",
            CartError::CorruptStore { .. } => "Remove or repair the store file",
            CartError::IoError(_) => "Check that storage.path is writable",
            CartError::SerializationError(_) => "Check the stored data format",
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::MissingConfigError { .. }
            | CartError::InvalidConfigValueError { .. } => "Review the configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
