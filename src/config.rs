use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;
use std::time::Duration;

use crate::exception::Exception;
use crate::param::DEFAULT_TIMEOUT_MS;

/// 后端部署模式，决定请求的报文形态。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// 脚本后端：所有写操作都是带 action 标签的 POST
    Production,
    /// REST 后端：不同操作映射到不同路径与方法
    Local,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_environment")]
    environment: Environment,
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default = "default_local_api_url")]
    local_api_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_environment() -> Environment {
    Environment::Production
}

fn default_api_url() -> String {
    "https://script.google.com/macros/s/AKfycbzJ0lL3fN2XIZkoCSKRvyPkRkmZUZjnrg6NkMaik0CqEP3epeG2Z3mSsgSU6wQYkMY/exec".to_string()
}

fn default_local_api_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            environment: default_environment(),
            api_url: default_api_url(),
            local_api_url: default_local_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// 直接指定后端地址，常用于测试或命令行覆盖。
    pub fn with_backend(environment: Environment, base_url: &str, timeout_ms: u64) -> Self {
        let mut config = Self::new();
        config.environment = environment;
        match environment {
            Environment::Production => config.api_url = base_url.to_string(),
            Environment::Local => config.local_api_url = base_url.to_string(),
        }
        config.timeout_ms = timeout_ms;
        config
    }

    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = File::open(filename)
            .map_err(|e| Exception::Config(format!("no such file {}: {}", filename, e)))?;
        let mut str_val = String::new();
        file.read_to_string(&mut str_val)
            .map_err(|e| Exception::Config(format!("error reading {}: {}", filename, e)))?;

        let mut raw_config = match toml::from_str::<Config>(&str_val) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        if raw_config.timeout_ms == 0 {
            warn!("timeout_ms被设置为0，请求将立即超时，因此该值将被改为{}。", DEFAULT_TIMEOUT_MS);
            raw_config.timeout_ms = DEFAULT_TIMEOUT_MS;
        }
        Ok(raw_config)
    }
}

impl Config {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// 当前部署模式对应的后端基础地址
    pub fn api_url(&self) -> &str {
        match self.environment {
            Environment::Production => &self.api_url,
            Environment::Local => &self.local_api_url,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.api_url().starts_with("https://script.google.com/"));
    }

    #[test]
    fn test_from_toml_local() {
        let file = write_config(
            "environment = \"local\"\nlocal_api_url = \"http://localhost:9000\"\ntimeout_ms = 500\n",
        );
        let config = Config::from_toml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.environment(), Environment::Local);
        assert_eq!(config.api_url(), "http://localhost:9000");
        assert_eq!(config.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let file = write_config("timeout_ms = 1000\n");
        let config = Config::from_toml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_toml_invalid_falls_back() {
        let file = write_config("environment = \"staging\"\n");
        let config = Config::from_toml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.environment(), Environment::Production);
    }

    #[test]
    fn test_zero_timeout_is_replaced() {
        let file = write_config("timeout_ms = 0\n");
        let config = Config::from_toml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_toml("/nonexistent/gallery.toml");
        assert!(matches!(result, Err(Exception::Config(_))));
    }

    #[test]
    fn test_with_backend() {
        let config = Config::with_backend(Environment::Local, "http://127.0.0.1:1", 10);
        assert_eq!(config.api_url(), "http://127.0.0.1:1");
        assert_eq!(config.timeout(), Duration::from_millis(10));
    }
}
