use crate::utils::error::{ImportError, Result};
use url::Url;

/// 同時對遠端送出的搜尋請求上限
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ImportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ImportError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("instance.endpoint", "https://example.com/xmlmc").is_ok());
        assert!(validate_url("instance.endpoint", "http://example.com").is_ok());
        assert!(validate_url("instance.endpoint", "").is_err());
        assert!(validate_url("instance.endpoint", "invalid-url").is_err());
        assert!(validate_url("instance.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("import.concurrent_requests", 5, 1).is_ok());
        assert!(validate_positive_number("import.concurrent_requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("--concurrent-requests", 1, 1, MAX_CONCURRENT_REQUESTS).is_ok());
        assert!(validate_range("--concurrent-requests", 256, 1, MAX_CONCURRENT_REQUESTS).is_ok());
        assert!(validate_range("--concurrent-requests", 0, 1, MAX_CONCURRENT_REQUESTS).is_err());
        assert!(validate_range("--concurrent-requests", usize::MAX, 1, MAX_CONCURRENT_REQUESTS).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("instance.api_key", "abc").is_ok());
        assert!(matches!(
            validate_non_empty_string("instance.api_key", "   "),
            Err(ImportError::MissingConfigError { .. })
        ));
    }
}
