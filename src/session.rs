use crate::config::Config;
use crate::error::{Result, ThreadsmithError};
use crate::models::{Creativity, GenerationRequest, Provider, ThreadRecord};
use crate::persona;

const DEFAULT_THREAD_COUNT: u8 = 5;

/// Per-run working state: the persona and generation settings in effect,
/// plus the output of the last generation.
#[derive(Debug, Clone)]
pub struct Session {
    pub persona: String,
    pub provider: Provider,
    pub creativity: Creativity,
    pub thread_count: u8,
    last_raw: Option<String>,
    threads: Vec<ThreadRecord>,
}

impl Session {
    pub fn new(persona: impl Into<String>, provider: Provider) -> Self {
        Self {
            persona: persona.into(),
            provider,
            creativity: Creativity::default(),
            thread_count: DEFAULT_THREAD_COUNT,
            last_raw: None,
            threads: Vec::new(),
        }
    }

    /// Seed settings from config; the persona comes from the configured file
    /// when there is one
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let persona = persona::resolve(cfg.defaults.persona_path.as_deref())?;
        let provider = cfg
            .preferred_provider()
            .unwrap_or(cfg.generation.default_provider);
        let mut session = Self::new(persona, provider);
        session.creativity = cfg.defaults.creativity;
        if session.set_thread_count(cfg.defaults.thread_count).is_err() {
            tracing::warn!(
                "Configured thread_count {} is outside 1-10, using {}",
                cfg.defaults.thread_count,
                DEFAULT_THREAD_COUNT
            );
        }
        Ok(session)
    }

    pub fn set_thread_count(&mut self, count: u8) -> Result<()> {
        if !(1..=10).contains(&count) {
            return Err(ThreadsmithError::validation(
                "thread_count",
                format!("must be between 1 and 10, got {count}"),
            ));
        }
        self.thread_count = count;
        Ok(())
    }

    /// A request for `topic` under the current settings, without examples
    pub fn request(&self, topic: &str) -> GenerationRequest {
        let mut request = GenerationRequest::new(topic, self.persona.clone());
        request.creativity = self.creativity;
        request.thread_count = self.thread_count;
        request.provider = self.provider;
        request
    }

    pub(crate) fn store_output(&mut self, raw: String, threads: Vec<ThreadRecord>) {
        self.last_raw = Some(raw);
        self.threads = threads;
    }

    pub fn last_raw(&self) -> Option<&str> {
        self.last_raw.as_deref()
    }

    pub fn threads(&self) -> &[ThreadRecord] {
        &self.threads
    }

    pub fn thread(&self, index: usize) -> Option<&ThreadRecord> {
        self.threads.get(index)
    }

    /// Forget the last generation; settings are kept
    pub fn clear(&mut self) {
        self.last_raw = None;
        self.threads.clear();
    }
}
