use crate::adapters::xmlmc::{HttpXmlmcClient, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::ServiceMapping;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub instance: InstanceConfig,
    pub import: Option<ImportSettings>,
    /// source-system service key -> instance service name
    #[serde(default)]
    pub service_mapping: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    pub application: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSettings {
    pub concurrent_requests: Option<usize>,
}

impl ImportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("instance.endpoint", &self.instance.endpoint)?;
        crate::utils::validation::validate_non_empty_string("instance.api_key", &self.instance.api_key)?;

        if self.instance.api_key.starts_with("${") {
            return Err(ImportError::InvalidConfigValueError {
                field: "instance.api_key".to_string(),
                value: self.instance.api_key.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        if let Some(timeout) = self.instance.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "instance.timeout_seconds",
                timeout as usize,
                1,
            )?;
        }

        if let Some(concurrent) = self.import.as_ref().and_then(|i| i.concurrent_requests) {
            crate::utils::validation::validate_range(
                "import.concurrent_requests",
                concurrent,
                1,
                crate::utils::validation::MAX_CONCURRENT_REQUESTS,
            )?;
        }

        Ok(())
    }

    pub fn concurrent_requests(&self) -> usize {
        self.import
            .as_ref()
            .and_then(|i| i.concurrent_requests)
            .unwrap_or(5)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.instance.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn http_client(&self) -> Result<HttpXmlmcClient> {
        HttpXmlmcClient::new(
            self.instance.endpoint.clone(),
            self.instance.api_key.clone(),
            self.timeout(),
        )
    }
}

impl ServiceMapping for ImportConfig {
    fn target_service(&self, source_key: &str) -> Option<&str> {
        self.service_mapping.target_service(source_key)
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "abc123"

[import]
concurrent_requests = 3

[service_mapping]
INC = "Incident Management"
"Desk Support" = "Service Desk"
UNMAPPED = ""
"#;

        let config = ImportConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.instance.endpoint, "https://instance.example.com/xmlmc");
        assert_eq!(config.concurrent_requests(), 3);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.target_service("INC"), Some("Incident Management"));
        assert_eq!(config.target_service("Desk Support"), Some("Service Desk"));
        assert_eq!(config.target_service("UNMAPPED"), Some(""));
        assert_eq!(config.target_service("MISSING"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SERVICE_IMPORT_TEST_KEY", "secret-key");

        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "${SERVICE_IMPORT_TEST_KEY}"
"#;

        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.instance.api_key, "secret-key");
        assert!(config.service_mapping.is_empty());

        std::env::remove_var("SERVICE_IMPORT_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "${SERVICE_IMPORT_UNSET_VARIABLE}"
"#;

        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.instance.api_key, "${SERVICE_IMPORT_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[instance]
endpoint = "invalid-url"
api_key = "abc"
"#;
        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "abc"

[import]
concurrent_requests = 0
"#;
        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "abc"

[import]
concurrent_requests = 100000
"#;
        let config = ImportConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[instance]
endpoint = "https://instance.example.com/xmlmc"
api_key = "abc"
timeout_seconds = 5

[service_mapping]
CHG = "Change Management"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ImportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target_service("CHG"), Some("Change Management"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
