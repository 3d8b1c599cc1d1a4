use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, ThreadsmithError};
use crate::models::Provider;
use crate::transport::{AnthropicGenerator, GeminiGenerator, OpenAiGenerator, TextGenerator};

/// Routes prompts to whichever backends have credentials.
pub struct Dispatcher {
    backends: HashMap<Provider, Arc<dyn TextGenerator>>,
}

impl Dispatcher {
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register one generator per provider that has an API key configured
    pub fn from_config(cfg: &Config) -> Self {
        let mut dispatcher = Self::empty();
        for provider in cfg.available_providers() {
            let backend = cfg.generation.backend(provider);
            let generator: Arc<dyn TextGenerator> = match provider {
                Provider::Gemini => Arc::new(GeminiGenerator::new(backend)),
                Provider::OpenAi => Arc::new(OpenAiGenerator::new(backend)),
                Provider::Anthropic => Arc::new(AnthropicGenerator::new(backend)),
            };
            dispatcher.register(provider, generator);
        }
        dispatcher
    }

    pub fn register(&mut self, provider: Provider, generator: Arc<dyn TextGenerator>) {
        tracing::debug!("Registered {} backend", provider);
        self.backends.insert(provider, generator);
    }

    pub fn is_available(&self, provider: Provider) -> bool {
        self.backends.contains_key(&provider)
    }

    /// Available providers in canonical order
    pub fn providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_available(*p))
            .collect()
    }

    /// Send one prompt to one backend.
    ///
    /// Every failure comes back as an error value; nothing is retried.
    pub async fn generate(&self, prompt: &str, provider: Provider) -> Result<String> {
        if self.backends.is_empty() {
            return Err(ThreadsmithError::NoBackendAvailable);
        }
        let generator = self
            .backends
            .get(&provider)
            .ok_or(ThreadsmithError::ProviderUnavailable(provider))?;

        match generator.generate(prompt).await {
            Ok(text) => {
                tracing::info!("{} returned {} characters", provider, text.chars().count());
                Ok(text)
            }
            Err(e) => {
                tracing::warn!("{} generation failed: {}", provider, e);
                Err(match e {
                    ThreadsmithError::Backend { .. } => e,
                    other => ThreadsmithError::backend(provider, other.to_string()),
                })
            }
        }
    }
}
