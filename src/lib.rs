pub mod category;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod models;
pub mod parser;
pub mod persona;
pub mod prompt;
pub mod schedule;
pub mod session;
pub mod social;
pub mod transport;
pub mod trends;
pub mod visual;

use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{Result, ThreadsmithError};
use crate::feedback::FeedbackStore;
use crate::models::{FeedbackEntry, FeedbackKind, MAX_PROMPT_EXAMPLES, ThreadRecord};
use crate::session::Session;
use crate::social::{Post, ProfileStats, SocialClient, SocialReader, UserProfile};

/// Upper bound for standalone post batches
pub const MAX_SINGLE_POSTS: u8 = 20;

/// Profile lookup result
#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub profile: UserProfile,
    pub recent: Vec<Post>,
    pub stats: ProfileStats,
}

pub struct ThreadsmithService {
    dispatcher: Dispatcher,
    feedback: FeedbackStore,
    social: Option<Arc<dyn SocialReader>>,
    recent_posts: u8,
}

impl ThreadsmithService {
    pub fn new(cfg: &Config) -> Self {
        let social = match SocialClient::new(&cfg.social) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn SocialReader>),
            Err(e) => {
                tracing::debug!("Social API disabled: {}", e);
                None
            }
        };
        let mut service = Self::with_parts(
            Dispatcher::from_config(cfg),
            FeedbackStore::new(cfg.feedback.path.clone()),
            social,
        );
        service.recent_posts = cfg.social.recent_posts;
        service
    }

    pub fn with_parts(
        dispatcher: Dispatcher,
        feedback: FeedbackStore,
        social: Option<Arc<dyn SocialReader>>,
    ) -> Self {
        Self {
            dispatcher,
            feedback,
            social,
            recent_posts: 5,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    pub fn has_social(&self) -> bool {
        self.social.is_some()
    }

    /// Build the prompt from the session and the latest liked threads, call the
    /// session's provider and parse the reply.
    ///
    /// The raw reply and parsed threads are kept on the session. A reply with no
    /// thread markers yields an empty list, not an error.
    pub async fn generate_threads(
        &self,
        session: &mut Session,
        topic: &str,
    ) -> Result<Vec<ThreadRecord>> {
        let topic = require_topic(topic)?;
        let log = self.feedback.load();
        let request = session
            .request(topic)
            .with_examples(log.recent_liked(MAX_PROMPT_EXAMPLES));
        tracing::info!(
            "Generating {} threads about '{}' with {} ({} examples)",
            request.thread_count,
            topic,
            request.provider,
            request.examples.len()
        );

        let prompt = prompt::compose(&request);
        let raw = self.dispatcher.generate(&prompt, request.provider).await?;
        let threads = parser::parse(&raw);
        if threads.is_empty() {
            tracing::warn!("Reply contained no thread markers");
        }
        session.store_output(raw, threads.clone());
        Ok(threads)
    }

    /// Standalone posts, returned as the model wrote them
    pub async fn generate_single_posts(
        &self,
        session: &Session,
        topic: &str,
        count: u8,
    ) -> Result<String> {
        let topic = require_topic(topic)?;
        if !(1..=MAX_SINGLE_POSTS).contains(&count) {
            return Err(ThreadsmithError::validation(
                "count",
                format!("must be between 1 and {MAX_SINGLE_POSTS}, got {count}"),
            ));
        }
        let prompt =
            prompt::compose_single_posts(topic, &session.persona, session.creativity, count);
        self.dispatcher.generate(&prompt, session.provider).await
    }

    pub async fn suggest_hashtags(&self, session: &Session, topic: &str) -> Result<String> {
        let topic = require_topic(topic)?;
        self.dispatcher
            .generate(&prompt::compose_hashtags(topic), session.provider)
            .await
    }

    pub fn record_feedback(&self, kind: FeedbackKind, thread: &ThreadRecord) -> Result<FeedbackEntry> {
        self.feedback.record(kind, thread.clone())
    }

    /// Profile, recent posts and derived stats for `username`
    pub async fn profile(&self, username: &str) -> Result<ProfileReport> {
        let social = self.social_reader()?;
        let profile = social.user_by_username(username).await?;
        let recent = social.recent_posts(&profile.id, self.recent_posts).await?;
        let stats = ProfileStats::compute(&profile, &recent);
        Ok(ProfileReport {
            profile,
            recent,
            stats,
        })
    }

    /// Append the account's recent posts to the session persona
    pub async fn pull_recent_posts(&self, session: &mut Session, username: &str) -> Result<usize> {
        let social = self.social_reader()?;
        let profile = social.user_by_username(username).await?;
        let posts = social.recent_posts(&profile.id, self.recent_posts).await?;
        if posts.is_empty() {
            tracing::warn!("No recent posts found for @{}", username);
        }
        session.persona = persona::with_recent_posts(&session.persona, &posts);
        Ok(posts.len())
    }

    fn social_reader(&self) -> Result<&Arc<dyn SocialReader>> {
        self.social
            .as_ref()
            .ok_or_else(|| ThreadsmithError::Social("X_BEARER_TOKEN is not set".to_string()))
    }
}

fn require_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(ThreadsmithError::validation("topic", "cannot be empty"));
    }
    Ok(topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Provider;
    use crate::social::{MockSocialReader, PostMetrics, UserMetrics};
    use crate::transport::{MockTextGenerator, TextGenerator};
    use mockall::predicate::*;

    fn temp_store() -> FeedbackStore {
        let path = std::env::temp_dir().join(format!("threadsmith-svc-{}.json", uuid::Uuid::new_v4()));
        FeedbackStore::new(path)
    }

    fn service_with(mock: MockTextGenerator, store: FeedbackStore) -> ThreadsmithService {
        let mut dispatcher = Dispatcher::empty();
        dispatcher.register(Provider::Gemini, Arc::new(mock) as Arc<dyn TextGenerator>);
        ThreadsmithService::with_parts(dispatcher, store, None)
    }

    fn session() -> Session {
        Session::new("persona", Provider::Gemini)
    }

    #[tokio::test]
    async fn test_generate_parses_reply_and_truncates() {
        let raw = format!("THREAD 1: Test\n1. Short tweet\n2. {}", "x".repeat(300));
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(move |_| Ok(raw.clone()));

        let store = temp_store();
        let service = service_with(mock, store.clone());
        let mut session = session();
        let threads = service.generate_threads(&mut session, "Test").await.unwrap();

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].title, "Test");
        assert_eq!(threads[0].posts[0], "Short tweet");
        assert_eq!(threads[0].posts[1].chars().count(), 280);
        assert!(threads[0].posts[1].ends_with("..."));
        assert_eq!(session.threads(), threads.as_slice());
        assert!(session.last_raw().is_some());
        std::fs::remove_file(store.path()).ok();
    }

    #[tokio::test]
    async fn test_reply_without_markers_is_empty() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok("Üzgünüm, bu konuda içerik üretemem.".to_string()));

        let service = service_with(mock, temp_store());
        let mut session = session();
        let threads = service.generate_threads(&mut session, "konu").await.unwrap();
        assert!(threads.is_empty());
        assert_eq!(session.last_raw(), Some("Üzgünüm, bu konuda içerik üretemem."));
    }

    #[tokio::test]
    async fn test_liked_threads_feed_next_prompt() {
        let store = temp_store();
        let liked = ThreadRecord::with_posts("Beğenilen", vec!["Harika bir ilk tweet".to_string()]);

        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt: &str| prompt.contains("Harika bir ilk tweet"))
            .times(1)
            .returning(|_| Ok("THREAD 1: Yeni\n1. bir".to_string()));

        let service = service_with(mock, store.clone());
        service.record_feedback(FeedbackKind::Liked, &liked).unwrap();
        assert_eq!(
            service.feedback().load().liked.last().map(|e| &e.thread),
            Some(&liked)
        );

        let mut session = session();
        let threads = service.generate_threads(&mut session, "Borsa").await.unwrap();
        assert_eq!(threads[0].title, "Yeni");
        std::fs::remove_file(store.path()).ok();
    }

    #[tokio::test]
    async fn test_empty_topic_is_rejected_before_calling_backend() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().never();
        let service = service_with(mock, temp_store());
        let err = service.generate_threads(&mut session(), "   ").await.unwrap_err();
        assert!(matches!(err, ThreadsmithError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_no_backend_available() {
        let service = ThreadsmithService::with_parts(Dispatcher::empty(), temp_store(), None);
        let err = service.generate_threads(&mut session(), "konu").await.unwrap_err();
        assert!(matches!(err, ThreadsmithError::NoBackendAvailable));
    }

    #[tokio::test]
    async fn test_single_posts_count_bounds() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt: &str| prompt.contains("3 adet"))
            .times(1)
            .returning(|_| Ok("1. a\n2. b\n3. c".to_string()));
        let service = service_with(mock, temp_store());
        let session = session();

        assert!(service.generate_single_posts(&session, "konu", 0).await.is_err());
        assert!(service.generate_single_posts(&session, "konu", 21).await.is_err());
        let out = service.generate_single_posts(&session, "konu", 3).await.unwrap();
        assert_eq!(out, "1. a\n2. b\n3. c");
    }

    #[tokio::test]
    async fn test_hashtags_pass_through() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt: &str| prompt.contains("Konu: Deprem"))
            .returning(|_| Ok("#Deprem".to_string()));
        let service = service_with(mock, temp_store());
        assert_eq!(
            service.suggest_hashtags(&session(), "Deprem").await.unwrap(),
            "#Deprem"
        );
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: "42".to_string(),
            username: "bir_adamiste".to_string(),
            name: "Bir Adamiste".to_string(),
            description: String::new(),
            created_at: None,
            public_metrics: UserMetrics {
                followers_count: 200,
                following_count: 100,
                tweet_count: 10,
                listed_count: 0,
            },
        }
    }

    fn post(text: &str, likes: u64) -> Post {
        Post {
            id: "1".to_string(),
            text: text.to_string(),
            created_at: None,
            public_metrics: PostMetrics {
                like_count: likes,
                ..PostMetrics::default()
            },
        }
    }

    fn social_mock() -> MockSocialReader {
        let mut social = MockSocialReader::new();
        social
            .expect_user_by_username()
            .with(eq("bir_adamiste"))
            .returning(|_| Ok(profile()));
        social
            .expect_recent_posts()
            .with(eq("42"), eq(5u8))
            .returning(|_, _| Ok(vec![post("ilk tweet", 4), post("ikinci", 6)]));
        social
    }

    #[tokio::test]
    async fn test_profile_report() {
        let service = ThreadsmithService::with_parts(
            Dispatcher::empty(),
            temp_store(),
            Some(Arc::new(social_mock()) as Arc<dyn SocialReader>),
        );
        let report = service.profile("bir_adamiste").await.unwrap();
        assert_eq!(report.recent.len(), 2);
        assert!((report.stats.follow_ratio - 2.0).abs() < 1e-9);
        assert!((report.stats.engagement.unwrap().avg_likes - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_pull_recent_posts_enriches_persona() {
        let service = ThreadsmithService::with_parts(
            Dispatcher::empty(),
            temp_store(),
            Some(Arc::new(social_mock()) as Arc<dyn SocialReader>),
        );
        let mut session = session();
        let n = service
            .pull_recent_posts(&mut session, "bir_adamiste")
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            session.persona,
            "persona\n\nSon tweet örneklerim:\n1. ilk tweet\n2. ikinci\n"
        );
    }

    #[tokio::test]
    async fn test_profile_without_credentials() {
        let service = ThreadsmithService::with_parts(Dispatcher::empty(), temp_store(), None);
        assert!(!service.has_social());
        let err = service.profile("someone").await.unwrap_err();
        assert!(matches!(err, ThreadsmithError::Social(_)));
    }
}
