use crate::error::AppError;
use crate::forms::{ComposeForm, ListingDraft};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Social login providers offered on the auth screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialProvider {
    Google,
    Apple,
    Twitter,
    Github,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 4] = [
        SocialProvider::Google,
        SocialProvider::Apple,
        SocialProvider::Twitter,
        SocialProvider::Github,
    ];
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialProvider::Google => f.write_str("Google"),
            SocialProvider::Apple => f.write_str("Apple"),
            SocialProvider::Twitter => f.write_str("Twitter"),
            SocialProvider::Github => f.write_str("Github"),
        }
    }
}

impl FromStr for SocialProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "apple" => Ok(SocialProvider::Apple),
            "twitter" => Ok(SocialProvider::Twitter),
            "github" => Ok(SocialProvider::Github),
            other => Err(AppError::InvalidInput(format!("unknown social provider: {}", other))),
        }
    }
}

/// Engagement actions on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
    Retweet,
    Share,
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
            Reaction::Retweet => "retweet",
            Reaction::Share => "share",
        };
        f.write_str(verb)
    }
}

/// The endpoints a real backend would expose. Contracts are intentionally
/// thin: every call either succeeds or reports an error, nothing more.
#[async_trait]
pub trait BackendTrait: Send + Sync {
    /// Look up a stored session; `None` means signed out
    async fn check_session(&self) -> Result<Option<String>>;

    /// Sign in with email and password, returning the user's handle
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    async fn social_login(&self, provider: SocialProvider) -> Result<String>;

    /// Publish a new post, reply or edit
    async fn post(&self, compose: &ComposeForm) -> Result<()>;

    async fn react(&self, post_id: &str, reaction: Reaction) -> Result<()>;

    /// Follow (`true`) or unfollow (`false`) a user
    async fn follow(&self, user_id: &str, follow: bool) -> Result<()>;

    /// Reload the home timeline
    async fn refresh_feed(&self) -> Result<()>;

    async fn create_listing(&self, draft: &ListingDraft) -> Result<()>;

    async fn reserve(&self, listing_id: &str) -> Result<()>;

    /// Open a listing's detail page
    async fn view_listing(&self, listing_id: &str) -> Result<()>;

    async fn contact_seller(&self, listing_id: &str) -> Result<()>;

    async fn bargain(&self, listing_id: &str) -> Result<()>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
