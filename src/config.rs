use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Creativity, Provider};

/// Main configuration structure for threadsmith
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub social: SocialConfig,
    pub feedback: FeedbackConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub default_provider: Provider,
    pub gemini: BackendConfig,
    pub openai: BackendConfig,
    pub anthropic: BackendConfig,
}

impl GenerationConfig {
    pub fn backend(&self, provider: Provider) -> &BackendConfig {
        match provider {
            Provider::Gemini => &self.gemini,
            Provider::OpenAi => &self.openai,
            Provider::Anthropic => &self.anthropic,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// Override for the API root, mostly for proxies
    #[serde(default)]
    pub base_url: Option<String>,
}

impl BackendConfig {
    pub fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConfig {
    #[serde(default)]
    pub bearer_token: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,
    pub username: String,
    pub base_url: String,
    pub recent_posts: u8,
}

impl SocialConfig {
    pub fn has_credentials(&self) -> bool {
        !self.bearer_token.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub thread_count: u8,
    pub creativity: Creativity,
    #[serde(default)]
    pub persona_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        for path in ["../.env", ".env"] {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                break;
            }
        }

        let config_path =
            env::var("THREADSMITH_CONFIG_PATH").unwrap_or_else(|_| "threadsmith.yaml".to_string());

        let mut config = Self::from_file(Path::new(&config_path));
        config.apply_env_overrides();

        // Validate configuration - log warnings but don't fail
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn from_file(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {} - using defaults", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read config file {}: {} - using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Generation backends
        if let Some(provider) = lookup("THREADSMITH_PROVIDER") {
            match provider.parse() {
                Ok(p) => self.generation.default_provider = p,
                Err(e) => tracing::warn!("Ignoring THREADSMITH_PROVIDER: {}", e),
            }
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.generation.gemini.api_key = key;
        }
        if let Some(model) = lookup("THREADSMITH_GEMINI_MODEL") {
            self.generation.gemini.model = model;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.generation.openai.api_key = key;
        }
        if let Some(model) = lookup("THREADSMITH_OPENAI_MODEL") {
            self.generation.openai.model = model;
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.generation.anthropic.api_key = key;
        }
        if let Some(model) = lookup("THREADSMITH_ANTHROPIC_MODEL") {
            self.generation.anthropic.model = model;
        }

        // Social API credentials
        if let Some(v) = lookup("X_BEARER_TOKEN") {
            self.social.bearer_token = v;
        }
        if let Some(v) = lookup("X_CONSUMER_KEY") {
            self.social.consumer_key = v;
        }
        if let Some(v) = lookup("X_CONSUMER_SECRET") {
            self.social.consumer_secret = v;
        }
        if let Some(v) = lookup("X_ACCESS_TOKEN") {
            self.social.access_token = v;
        }
        if let Some(v) = lookup("X_ACCESS_TOKEN_SECRET") {
            self.social.access_token_secret = v;
        }
        if let Some(v) = lookup("X_USERNAME") {
            self.social.username = v;
        }

        // Feedback store and defaults
        if let Some(path) = lookup("THREADSMITH_FEEDBACK_PATH") {
            self.feedback.path = PathBuf::from(path);
        }
        if let Some(path) = lookup("THREADSMITH_PERSONA_PATH") {
            self.defaults.persona_path = Some(PathBuf::from(path));
        }
        if let Some(count) = lookup("THREADSMITH_THREAD_COUNT") {
            if let Ok(n) = count.parse() {
                self.defaults.thread_count = n;
            }
        }
        if let Some(level) = lookup("THREADSMITH_CREATIVITY") {
            self.defaults.creativity = Creativity::from_label(&level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.available_providers().is_empty() {
            return Err(
                "no generation backend key set (GEMINI_API_KEY, OPENAI_API_KEY or ANTHROPIC_API_KEY)"
                    .into(),
            );
        }
        if !(1..=10).contains(&self.defaults.thread_count) {
            return Err("defaults.thread_count must be between 1 and 10".into());
        }
        for provider in Provider::ALL {
            if self.generation.backend(provider).max_tokens == 0 {
                return Err(format!("generation.{provider}.max_tokens cannot be 0").into());
            }
        }
        Ok(())
    }

    /// Providers with an API key, in canonical order
    pub fn available_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.generation.backend(*p).has_key())
            .collect()
    }

    /// The configured default provider if usable, else the first usable one
    pub fn preferred_provider(&self) -> Option<Provider> {
        let available = self.available_providers();
        if available.contains(&self.generation.default_provider) {
            Some(self.generation.default_provider)
        } else {
            available.first().copied()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig {
                default_provider: Provider::Gemini,
                gemini: BackendConfig {
                    api_key: String::new(),
                    model: "gemini-3-flash-preview".to_string(),
                    max_tokens: 8192,
                    base_url: None,
                },
                openai: BackendConfig {
                    api_key: String::new(),
                    model: "gpt-4o".to_string(),
                    max_tokens: 4000,
                    base_url: None,
                },
                anthropic: BackendConfig {
                    api_key: String::new(),
                    model: "claude-sonnet-4-20250514".to_string(),
                    max_tokens: 4000,
                    base_url: None,
                },
            },
            social: SocialConfig {
                bearer_token: String::new(),
                consumer_key: String::new(),
                consumer_secret: String::new(),
                access_token: String::new(),
                access_token_secret: String::new(),
                username: "bir_adamiste".to_string(),
                base_url: "https://api.twitter.com/2".to_string(),
                recent_posts: 5,
            },
            feedback: FeedbackConfig {
                path: PathBuf::from("learned_examples.json"),
            },
            defaults: DefaultsConfig {
                thread_count: 5,
                creativity: Creativity::High,
                persona_path: None,
            },
        }
    }
}
