use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::Category;
use crate::error::ThreadsmithError;

/// Hard length limit for a single post, in characters
pub const MAX_POST_CHARS: usize = 280;

/// Number of liked threads fed back into the next prompt
pub const MAX_PROMPT_EXAMPLES: usize = 3;

/// One generated thread: a title and its ordered posts.
///
/// Posts are persisted under `tweets` so feedback files written by earlier
/// versions of the tool stay readable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ThreadRecord {
    pub title: String,
    #[serde(rename = "tweets", default)]
    pub posts: Vec<String>,
}

impl ThreadRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            posts: Vec::new(),
        }
    }

    pub fn with_posts(title: impl Into<String>, posts: Vec<String>) -> Self {
        Self {
            title: title.into(),
            posts,
        }
    }
}

/// A thread the operator approved or rejected
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub thread: ThreadRecord,
    #[serde(rename = "timestamp", with = "local_timestamp")]
    pub recorded_at: NaiveDateTime,
}

/// Written as naive local ISO-8601; read back from either naive or
/// offset-qualified (`Z`, `+03:00`) strings, the latter shifted to local time.
mod local_timestamp {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(naive) = raw.parse::<NaiveDateTime>() {
            return Some(naive);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Local).naive_local())
    }
}

impl FeedbackEntry {
    /// Stamp a thread with the current local time
    pub fn now(thread: ThreadRecord) -> Self {
        Self {
            thread,
            recorded_at: Local::now().naive_local(),
        }
    }
}

/// The whole persisted feedback document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FeedbackLog {
    #[serde(rename = "liked_threads")]
    pub liked: Vec<FeedbackEntry>,
    #[serde(rename = "disliked_threads")]
    pub disliked: Vec<FeedbackEntry>,
}

impl FeedbackLog {
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    pub fn entries(&self, kind: FeedbackKind) -> &[FeedbackEntry] {
        match kind {
            FeedbackKind::Liked => &self.liked,
            FeedbackKind::Disliked => &self.disliked,
        }
    }

    pub(crate) fn push(&mut self, kind: FeedbackKind, entry: FeedbackEntry) {
        match kind {
            FeedbackKind::Liked => self.liked.push(entry),
            FeedbackKind::Disliked => self.disliked.push(entry),
        }
    }

    /// The last `n` liked threads, in store order
    pub fn recent_liked(&self, n: usize) -> &[FeedbackEntry] {
        let start = self.liked.len().saturating_sub(n);
        &self.liked[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Liked,
    Disliked,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Liked => f.write_str("liked"),
            FeedbackKind::Disliked => f.write_str("disliked"),
        }
    }
}

impl FromStr for FeedbackKind {
    type Err = ThreadsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "liked" | "like" | "l" => Ok(FeedbackKind::Liked),
            "disliked" | "dislike" | "d" => Ok(FeedbackKind::Disliked),
            other => Err(ThreadsmithError::validation(
                "feedback",
                format!("expected 'liked' or 'disliked', got '{other}'"),
            )),
        }
    }
}

/// A sample trending topic
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TrendTopic {
    pub name: String,
    pub category: Category,
    pub volume: u64,
}

/// Text-generation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Gemini, Provider::OpenAi, Provider::Anthropic];

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAi => "GPT-4o",
            Provider::Anthropic => "Claude",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini Flash - fast, free tier",
            Provider::OpenAi => "GPT-4o - high quality, paid",
            Provider::Anthropic => "Claude Sonnet - detailed, paid",
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Gemini
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        };
        f.write_str(s)
    }
}

impl FromStr for Provider {
    type Err = ThreadsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "gpt" | "gpt-4o" => Ok(Provider::OpenAi),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            other => Err(ThreadsmithError::UnknownProvider(other.to_string())),
        }
    }
}

/// How unconstrained generated content should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Creativity {
    Low,
    Medium,
    High,
    Wild,
}

impl Creativity {
    /// Parse a level name; anything unrecognized falls back to `High`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" | "düşük" => Creativity::Low,
            "medium" | "orta" => Creativity::Medium,
            "high" | "yüksek" => Creativity::High,
            "wild" | "çılgın" => Creativity::Wild,
            other => {
                tracing::debug!("Unknown creativity level '{}', using high", other);
                Creativity::High
            }
        }
    }

    /// Level name as written into prompts
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Creativity::Low => "Düşük",
            Creativity::Medium => "Orta",
            Creativity::High => "Yüksek",
            Creativity::Wild => "Çılgın",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Creativity::Low => "Güvenli, mainstream içerikler üret. Kontroversiyel konulardan kaçın.",
            Creativity::Medium => "Dengeli içerikler üret. Hafif provokasyon tamam.",
            Creativity::High => "Cesur ve dikkat çekici içerikler üret. Sınırları zorla.",
            Creativity::Wild => {
                "Çılgınca, absürt ve viral potansiyeli çok yüksek içerikler üret. Sınır yok!"
            }
        }
    }
}

impl Default for Creativity {
    fn default() -> Self {
        Creativity::High
    }
}

impl fmt::Display for Creativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Creativity::Low => "low",
            Creativity::Medium => "medium",
            Creativity::High => "high",
            Creativity::Wild => "wild",
        };
        f.write_str(s)
    }
}

/// Everything needed to build one thread-generation prompt
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub topic: String,
    pub persona: String,
    pub creativity: Creativity,
    pub examples: Vec<ThreadRecord>,
    pub thread_count: u8,
    pub provider: Provider,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            persona: persona.into(),
            creativity: Creativity::default(),
            examples: Vec::new(),
            thread_count: 5,
            provider: Provider::default(),
        }
    }

    /// Take the most recent liked threads (at most three) as style examples
    pub fn with_examples(mut self, liked: &[FeedbackEntry]) -> Self {
        let start = liked.len().saturating_sub(MAX_PROMPT_EXAMPLES);
        self.examples = liked[start..].iter().map(|e| e.thread.clone()).collect();
        self
    }
}
