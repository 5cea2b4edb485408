use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("XML response parsing failed: {0}")]
    XmlParseError(#[from] quick_xml::de::DeError),

    #[error("XML request building failed: {message}")]
    XmlBuildError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ImportError {
    /// 是否屬於遠端傳輸層錯誤（網路、HTTP 狀態）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ImportError::ApiError(_) | ImportError::HttpStatusError { .. } | ImportError::IoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
