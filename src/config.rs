//! Configuration loading with env-var overrides.
//!
//! Reads an optional TOML file (`config/default.toml` unless a path is given),
//! then applies the environment variables the deployment sets: `PORT`,
//! `AZURE_OPENAI_*`, `DEPLOYMENT_NAME` and `MODECHAT_LOG_LEVEL`.
//! Every key has a literal fallback, so an empty environment still starts.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Value the API key takes when `AZURE_OPENAI_API_KEY` is unset.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_AZURE_OPENAI_API_KEY";

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Completion provider configuration (`[llm]` in the TOML).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active: `"azure"` or `"dummy"`.
    pub provider: String,
    /// Azure resource endpoint, e.g. `https://name.openai.azure.com/`.
    pub endpoint: String,
    pub api_version: String,
    /// Deployment name; also sent as `model` in the request body.
    pub deployment: String,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout_seconds: Option<u64>,
}

/// Fully-resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// From `AZURE_OPENAI_API_KEY` only, never from TOML.
    pub api_key: String,
}

impl Config {
    /// `true` once a real API key replaces the placeholder.
    pub fn credentials_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }
}

/// Environment-sourced overrides, captured once so tests can build them
/// directly instead of mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub port: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            port: var("PORT"),
            api_key: var("AZURE_OPENAI_API_KEY"),
            endpoint: var("AZURE_OPENAI_ENDPOINT"),
            api_version: var("AZURE_OPENAI_API_VERSION"),
            deployment: var("DEPLOYMENT_NAME"),
            log_level: var("MODECHAT_LOG_LEVEL"),
        }
    }
}

/// A variable that is set but blank counts as unset.
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawServer {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    #[serde(default = "default_provider")]
    provider: String,
    #[serde(default = "default_endpoint")]
    endpoint: String,
    #[serde(default = "default_api_version")]
    api_version: String,
    #[serde(default = "default_deployment")]
    deployment: String,
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            deployment: default_deployment(),
            timeout_seconds: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_log_level() -> String { "info".to_string() }
fn default_provider() -> String { "azure".to_string() }
fn default_endpoint() -> String { "https://your-resource-name.openai.azure.com/".to_string() }
fn default_api_version() -> String { "2024-02-15-preview".to_string() }
fn default_deployment() -> String { "gpt-35-turbo".to_string() }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `config_path`, or from `config/default.toml` when it
/// exists, then apply environment overrides.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = EnvOverrides::from_env();
    match config_path {
        Some(path) => load_from(Some(Path::new(path)), &overrides),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            let path = default_path.exists().then_some(default_path);
            load_from(path, &overrides)
        }
    }
}

/// Internal loader. `path = None` skips the file and uses literal defaults.
pub fn load_from(path: Option<&Path>, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let parsed = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str::<RawConfig>(&raw)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    let port = match present(&overrides.port) {
        Some(p) => p
            .trim()
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("invalid PORT '{p}': {e}")))?,
        None => parsed.server.port,
    };

    Ok(Config {
        log_level: present(&overrides.log_level).map_or(parsed.server.log_level, String::from),
        server: ServerConfig { host: parsed.server.host, port },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            endpoint: present(&overrides.endpoint).map_or(parsed.llm.endpoint, String::from),
            api_version: present(&overrides.api_version).map_or(parsed.llm.api_version, String::from),
            deployment: present(&overrides.deployment).map_or(parsed.llm.deployment, String::from),
            timeout_seconds: parsed.llm.timeout_seconds,
        },
        api_key: present(&overrides.api_key).unwrap_or(PLACEHOLDER_API_KEY).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_without_file_or_env() {
        let cfg = load_from(None, &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:5000");
        assert_eq!(cfg.llm.provider, "azure");
        assert_eq!(cfg.llm.api_version, "2024-02-15-preview");
        assert_eq!(cfg.llm.deployment, "gpt-35-turbo");
        assert_eq!(cfg.llm.timeout_seconds, None);
        assert_eq!(cfg.api_key, PLACEHOLDER_API_KEY);
        assert!(!cfg.credentials_configured());
    }

    #[test]
    fn toml_values_are_read() {
        let f = write_toml(
            r#"
[server]
host = "127.0.0.1"
port = 8081
log_level = "debug"

[llm]
provider = "dummy"
deployment = "gpt-4o"
timeout_seconds = 30
"#,
        );
        let cfg = load_from(Some(f.path()), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8081");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.llm.provider, "dummy");
        assert_eq!(cfg.llm.deployment, "gpt-4o");
        assert_eq!(cfg.llm.timeout_seconds, Some(30));
        // Unset keys keep their literal defaults.
        assert_eq!(cfg.llm.api_version, "2024-02-15-preview");
    }

    #[test]
    fn env_overrides_win_over_toml() {
        let f = write_toml("[server]\nport = 8081\n[llm]\ndeployment = \"from-toml\"\n");
        let overrides = EnvOverrides {
            port: Some("9000".into()),
            api_key: Some("secret".into()),
            endpoint: Some("https://example.openai.azure.com/".into()),
            api_version: Some("2024-06-01".into()),
            deployment: Some("from-env".into()),
            log_level: Some("warn".into()),
        };
        let cfg = load_from(Some(f.path()), &overrides).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.llm.deployment, "from-env");
        assert_eq!(cfg.llm.endpoint, "https://example.openai.azure.com/");
        assert_eq!(cfg.llm.api_version, "2024-06-01");
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.credentials_configured());
    }

    #[test]
    fn empty_api_key_is_not_configured() {
        let overrides = EnvOverrides { api_key: Some(String::new()), ..Default::default() };
        let cfg = load_from(None, &overrides).unwrap();
        assert!(!cfg.credentials_configured());
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let blank = || Some(String::new());
        let overrides = EnvOverrides {
            port: blank(),
            api_key: blank(),
            endpoint: blank(),
            api_version: Some("  ".into()),
            deployment: blank(),
            log_level: blank(),
        };
        let cfg = load_from(None, &overrides).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.llm.endpoint, "https://your-resource-name.openai.azure.com/");
        assert_eq!(cfg.llm.api_version, "2024-02-15-preview");
        assert_eq!(cfg.llm.deployment, "gpt-35-turbo");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.api_key, PLACEHOLDER_API_KEY);
    }

    #[test]
    fn blank_env_var_is_unset() {
        let key = "MODECHAT_TEST_BLANK_VAR";
        // SAFETY: the key is unique to this test.
        unsafe { env::set_var(key, "") };
        assert_eq!(var(key), None);
        unsafe { env::set_var(key, "x") };
        assert_eq!(var(key).as_deref(), Some("x"));
        unsafe { env::remove_var(key) };
    }

    #[test]
    fn invalid_port_errors() {
        let overrides = EnvOverrides { port: Some("not-a-port".into()), ..Default::default() };
        let msg = load_from(None, &overrides).unwrap_err().to_string();
        assert!(msg.contains("config error"));
        assert!(msg.contains("PORT"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Some(Path::new("/nonexistent/config.toml")), &EnvOverrides::default());
        assert!(result.unwrap_err().to_string().contains("cannot read"));
    }

    #[test]
    fn malformed_toml_errors() {
        let f = write_toml("[server\nport = ");
        let result = load_from(Some(f.path()), &EnvOverrides::default());
        assert!(result.unwrap_err().to_string().contains("parse error"));
    }
}
