use crate::core::{ConfigProvider, Credentials};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_substituted, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub fields: Credentials,
    pub parameters: Option<HashMap<String, toml::Value>>,
    pub output: OutputConfig,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MINT_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("fields.login", &self.fields.login)?;
        validate_non_empty_string("fields.password", &self.fields.password)?;
        validate_substituted("fields.login", &self.fields.login)?;
        validate_substituted("fields.password", &self.fields.password)?;

        validate_path("output.path", &self.output.path)?;

        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validate_range("http.timeout_seconds", timeout, 1, 300)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn credentials(&self) -> &Credentials {
        &self.fields
    }

    fn parameters(&self) -> Option<&HashMap<String, toml::Value>> {
        self.parameters.as_ref()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .map(Duration::from_secs)
    }

    fn user_agent(&self) -> Option<&str> {
        self.http.as_ref().and_then(|h| h.user_agent.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
