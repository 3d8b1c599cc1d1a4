use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SocialConfig;
use crate::error::{Result, ThreadsmithError};

#[cfg(test)]
use mockall::automock;

const USER_FIELDS: &str = "public_metrics,description,created_at,profile_image_url";
const POST_FIELDS: &str = "public_metrics,created_at,text";
// The timeline endpoint rejects max_results outside this range
const MIN_POSTS: u8 = 5;
const MAX_POSTS: u8 = 100;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMetrics {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub tweet_count: u64,
    #[serde(default)]
    pub listed_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub public_metrics: UserMetrics,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub quote_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub public_metrics: PostMetrics,
}

// X API v2 envelope: `data` on success, `errors` on failure
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

impl<T> Envelope<T> {
    fn error_message(&self) -> Option<String> {
        let first = self.errors.first()?;
        Some(if first.detail.is_empty() {
            first.title.clone()
        } else {
            first.detail.clone()
        })
    }
}

/// Read-only access to the social network
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SocialReader: Send + Sync {
    async fn user_by_username(&self, username: &str) -> Result<UserProfile>;
    async fn recent_posts(&self, user_id: &str, max: u8) -> Result<Vec<Post>>;
}

pub struct SocialClient {
    client: Client,
    bearer_token: String,
    base_url: String,
}

impl SocialClient {
    pub fn new(cfg: &SocialConfig) -> Result<Self> {
        if !cfg.has_credentials() {
            return Err(ThreadsmithError::Social(
                "X_BEARER_TOKEN is not set".to_string(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            bearer_token: cfg.bearer_token.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(query)
            .send()
            .await
            .map_err(|e| ThreadsmithError::Social(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ThreadsmithError::Social(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ThreadsmithError::Social(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl SocialReader for SocialClient {
    async fn user_by_username(&self, username: &str) -> Result<UserProfile> {
        tracing::info!("Fetching profile for @{}", username);
        let envelope: Envelope<UserProfile> = self
            .get(
                &format!("/users/by/username/{username}"),
                &[("user.fields", USER_FIELDS.to_string())],
            )
            .await?;

        let message = envelope.error_message();
        envelope.data.ok_or_else(|| {
            ThreadsmithError::Social(message.unwrap_or_else(|| format!("user @{username} not found")))
        })
    }

    async fn recent_posts(&self, user_id: &str, max: u8) -> Result<Vec<Post>> {
        let max = max.clamp(MIN_POSTS, MAX_POSTS);
        tracing::info!("Fetching {} recent posts for user {}", max, user_id);
        let envelope: Envelope<Vec<Post>> = self
            .get(
                &format!("/users/{user_id}/tweets"),
                &[
                    ("max_results", max.to_string()),
                    ("tweet.fields", POST_FIELDS.to_string()),
                ],
            )
            .await?;

        if let (None, Some(message)) = (&envelope.data, envelope.error_message()) {
            return Err(ThreadsmithError::Social(message));
        }
        Ok(envelope.data.unwrap_or_default())
    }
}

/// Aggregate numbers for the profile view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
    pub follow_ratio: f64,
    pub engagement: Option<EngagementStats>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementStats {
    pub sample_size: usize,
    pub avg_likes: f64,
    pub avg_retweets: f64,
    pub avg_quotes: f64,
    /// (likes + 2 * retweets + 3 * quotes) / n
    pub score: f64,
}

impl ProfileStats {
    pub fn compute(profile: &UserProfile, recent: &[Post]) -> Self {
        let m = profile.public_metrics;
        Self {
            followers: m.followers_count,
            following: m.following_count,
            posts: m.tweet_count,
            follow_ratio: m.followers_count as f64 / m.following_count.max(1) as f64,
            engagement: EngagementStats::compute(recent),
        }
    }
}

impl EngagementStats {
    pub fn compute(posts: &[Post]) -> Option<Self> {
        if posts.is_empty() {
            return None;
        }
        let n = posts.len() as f64;
        let (likes, retweets, quotes) = posts.iter().fold((0u64, 0u64, 0u64), |acc, p| {
            let m = p.public_metrics;
            (acc.0 + m.like_count, acc.1 + m.retweet_count, acc.2 + m.quote_count)
        });
        Some(Self {
            sample_size: posts.len(),
            avg_likes: likes as f64 / n,
            avg_retweets: retweets as f64 / n,
            avg_quotes: quotes as f64 / n,
            score: (likes + retweets * 2 + quotes * 3) as f64 / n,
        })
    }
}
