//! Configuration for the completion brain.

use std::env;
use std::time::Duration;

/// Placeholder value treated the same as an absent credential.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Default request timeout in seconds.
///
/// The source behavior had no explicit timeout; this bound is a
/// defensive strengthening, not a behavior change.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`CompletionBrain`](crate::CompletionBrain).
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Completion API base URL.
    pub api_url: String,

    /// API key for authentication. Empty or the placeholder means the
    /// network path is disabled and the local fallback answers instead.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for a reply.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Bounded request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: Some(500),
            temperature: Some(0.7),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CompletionConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional — an absent credential is a supported
    /// runtime state that selects the local fallback path, so this
    /// never fails:
    /// - `ASSIST_API_KEY` - API key (default: empty, fallback mode)
    /// - `ASSIST_API_URL` - API URL (default: https://api.openai.com)
    /// - `ASSIST_MODEL` - Model name (default: gpt-3.5-turbo)
    /// - `ASSIST_MAX_TOKENS` - Max tokens (default: 500)
    /// - `ASSIST_TEMPERATURE` - Temperature (default: 0.7)
    /// - `ASSIST_TIMEOUT_SECS` - Request timeout (default: 30)
    pub fn from_env() -> Self {
        let api_key = env::var("ASSIST_API_KEY").unwrap_or_default();

        let api_url =
            env::var("ASSIST_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("ASSIST_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let max_tokens = env::var("ASSIST_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(500));

        let temperature = env::var("ASSIST_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let timeout_secs = env::var("ASSIST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout_secs,
        }
    }

    /// Whether a usable credential is present. When false, no network
    /// call is ever attempted.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a new config builder.
    pub fn builder() -> CompletionConfigBuilder {
        CompletionConfigBuilder::default()
    }
}

/// Builder for [`CompletionConfig`].
#[derive(Debug, Default)]
pub struct CompletionConfigBuilder {
    config: CompletionConfig,
}

impl CompletionConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CompletionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = CompletionConfig::default();
        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert!(!config.is_configured());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, Some(500));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_placeholder_key_counts_as_unconfigured() {
        let config = CompletionConfig::builder().api_key(PLACEHOLDER_API_KEY).build();
        assert!(!config.is_configured());

        let config = CompletionConfig::builder().api_key("sk-real-key").build();
        assert!(config.is_configured());
    }

    #[test]
    fn test_builder_all_options() {
        let config = CompletionConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gpt-4o-mini")
            .max_tokens(256)
            .temperature(0.3)
            .timeout_secs(10)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_assist_vars() {
            std::env::remove_var("ASSIST_API_KEY");
            std::env::remove_var("ASSIST_API_URL");
            std::env::remove_var("ASSIST_MODEL");
            std::env::remove_var("ASSIST_MAX_TOKENS");
            std::env::remove_var("ASSIST_TEMPERATURE");
            std::env::remove_var("ASSIST_TIMEOUT_SECS");
        }

        // Scenario 1: nothing set. Not an error — fallback mode.
        clear_all_assist_vars();
        let config = CompletionConfig::from_env();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gpt-3.5-turbo");

        // Scenario 2: everything set.
        clear_all_assist_vars();
        std::env::set_var("ASSIST_API_KEY", "env-key");
        std::env::set_var("ASSIST_API_URL", "https://test.api.com");
        std::env::set_var("ASSIST_MODEL", "gpt-4o");
        std::env::set_var("ASSIST_MAX_TOKENS", "1024");
        std::env::set_var("ASSIST_TEMPERATURE", "0.9");
        std::env::set_var("ASSIST_TIMEOUT_SECS", "5");

        let config = CompletionConfig::from_env();
        assert!(config.is_configured());
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_url, "https://test.api.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.timeout_secs, 5);

        clear_all_assist_vars();
    }
}
