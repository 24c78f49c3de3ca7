use crate::adapters::outbound::{IpApiConfig, DEFAULT_ENDPOINT_URL, DEFAULT_FIELDS};
use crate::application::BatchQueryOptions;
use crate::domain::value_objects::{BatchSize, DEFAULT_MAX_BATCH_SIZE};
use serde::Deserialize;
use std::time::Duration;

/// How the binary prints results.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per record
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Parse an output format, falling back to text.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Lookup service settings
    pub endpoint_url: String,
    pub fields: String,
    pub request_timeout_secs: Option<u64>,

    // Batching settings
    pub max_batch_size: usize,
    pub max_concurrency: Option<usize>,

    pub output: OutputFormat,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            fields: DEFAULT_FIELDS.to_string(),
            request_timeout_secs: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_concurrency: None,
            output: OutputFormat::Text,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::InvalidEndpoint(self.endpoint_url.clone()));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidConcurrency);
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Settings for the ip-api.com adapter.
    pub fn lookup_config(&self) -> IpApiConfig {
        IpApiConfig {
            endpoint_url: self.endpoint_url.clone(),
            fields: self.fields.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Settings for the batch query service.
    pub fn query_options(&self) -> Result<BatchQueryOptions, ConfigError> {
        let max_batch_size =
            BatchSize::new(self.max_batch_size).ok_or(ConfigError::InvalidBatchSize)?;
        if self.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidConcurrency);
        }
        Ok(BatchQueryOptions {
            max_batch_size,
            max_concurrency: self.max_concurrency,
        })
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_batch_size must be greater than zero")]
    InvalidBatchSize,
    #[error("max_concurrency must be greater than zero")]
    InvalidConcurrency,
    #[error("request_timeout_secs must be greater than zero")]
    InvalidTimeout,
    #[error("invalid endpoint url: {0:?}")]
    InvalidEndpoint(String),
}

pub fn load_config() -> anyhow::Result<Config> {
    let endpoint_url = std::env::var("IPBATCH_ENDPOINT_URL")
        .unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.to_string());

    let fields = std::env::var("IPBATCH_FIELDS").unwrap_or_else(|_| DEFAULT_FIELDS.to_string());

    let request_timeout_secs = std::env::var("IPBATCH_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok());

    let max_batch_size = std::env::var("IPBATCH_MAX_BATCH_SIZE")
        .unwrap_or_else(|_| DEFAULT_MAX_BATCH_SIZE.to_string())
        .parse()
        .unwrap_or(DEFAULT_MAX_BATCH_SIZE);

    let max_concurrency = std::env::var("IPBATCH_MAX_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok());

    let output = std::env::var("IPBATCH_OUTPUT")
        .map(|v| OutputFormat::from_str(&v))
        .unwrap_or_default();

    let debug = std::env::var("DEBUG").is_ok();

    let cfg = Config {
        endpoint_url,
        fields,
        request_timeout_secs,
        max_batch_size,
        max_concurrency,
        output,
        debug,
    };
    cfg.validate()?;

    Ok(cfg)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process-wide environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "IPBATCH_ENDPOINT_URL",
        "IPBATCH_FIELDS",
        "IPBATCH_REQUEST_TIMEOUT_SECS",
        "IPBATCH_MAX_BATCH_SIZE",
        "IPBATCH_MAX_CONCURRENCY",
        "IPBATCH_OUTPUT",
        "DEBUG",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint_url, "http://ip-api.com");
        assert_eq!(cfg.fields, "query,status,country,city,org,isp");
        assert_eq!(cfg.max_batch_size, 100);
        assert!(cfg.max_concurrency.is_none());
        assert!(cfg.request_timeout_secs.is_none());
        assert_eq!(cfg.output, OutputFormat::Text);
        assert!(!cfg.debug);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let cfg = load_config().unwrap();
        assert_eq!(cfg.endpoint_url, "http://ip-api.com");
        assert_eq!(cfg.max_batch_size, 100);
        assert!(cfg.max_concurrency.is_none());
        assert!(!cfg.debug);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPBATCH_ENDPOINT_URL", "http://127.0.0.1:9000");
        std::env::set_var("IPBATCH_FIELDS", "query,status");
        std::env::set_var("IPBATCH_REQUEST_TIMEOUT_SECS", "15");
        std::env::set_var("IPBATCH_MAX_BATCH_SIZE", "50");
        std::env::set_var("IPBATCH_MAX_CONCURRENCY", "4");
        std::env::set_var("IPBATCH_OUTPUT", "JSON");
        std::env::set_var("DEBUG", "1");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.endpoint_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.fields, "query,status");
        assert_eq!(cfg.request_timeout_secs, Some(15));
        assert_eq!(cfg.max_batch_size, 50);
        assert_eq!(cfg.max_concurrency, Some(4));
        assert_eq!(cfg.output, OutputFormat::Json);
        assert!(cfg.debug);

        clear_env();
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPBATCH_MAX_BATCH_SIZE", "not_a_number");
        std::env::set_var("IPBATCH_MAX_CONCURRENCY", "lots");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.max_batch_size, 100);
        assert!(cfg.max_concurrency.is_none());

        clear_env();
    }

    #[test]
    fn test_load_config_rejects_zero_batch_size() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPBATCH_MAX_BATCH_SIZE", "0");

        let err = load_config().unwrap_err();
        assert!(err.to_string().contains("max_batch_size"));

        clear_env();
    }

    #[test]
    fn test_load_config_rejects_zero_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("IPBATCH_REQUEST_TIMEOUT_SECS", "0");

        let err = load_config().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        clear_env();
    }

    #[test]
    fn test_validate_errors() {
        let cfg = Config {
            max_concurrency: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidConcurrency));

        let cfg = Config {
            endpoint_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidEndpoint(_))));

        let cfg = Config {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_lookup_config() {
        let cfg = Config {
            request_timeout_secs: Some(3),
            ..Default::default()
        };
        let lookup = cfg.lookup_config();
        assert_eq!(lookup.endpoint_url, cfg.endpoint_url);
        assert_eq!(lookup.fields, cfg.fields);
        assert_eq!(lookup.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_query_options() {
        let cfg = Config {
            max_batch_size: 25,
            max_concurrency: Some(8),
            ..Default::default()
        };
        let options = cfg.query_options().unwrap();
        assert_eq!(options.max_batch_size.get(), 25);
        assert_eq!(options.max_concurrency, Some(8));

        let cfg = Config {
            max_batch_size: 0,
            ..Default::default()
        };
        assert_eq!(cfg.query_options().unwrap_err(), ConfigError::InvalidBatchSize);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str(" Json "), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("yaml"), OutputFormat::Text);
    }

    #[test]
    fn test_config_debug() {
        let cfg = Config::default();
        let debug_str = format!("{:?}", cfg);
        assert!(debug_str.contains("endpoint_url"));
        assert!(debug_str.contains("ip-api.com"));
    }
}
