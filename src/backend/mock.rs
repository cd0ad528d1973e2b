use crate::backend::traits::{BackendTrait, Reaction, SocialProvider};
use crate::config::Config;
use crate::forms::{ComposeForm, ListingDraft};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Stand-in backend: logs every call and sleeps where the client used to
/// fake network latency. Calls are never de-duplicated.
pub struct MockBackend {
    latency: Duration,
    startup_delay: Duration,
    user_handle: String,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            latency: config.latency,
            startup_delay: config.startup_delay,
            user_handle: config.user_handle.clone(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of backend calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn simulate_latency(&self, delay: Duration) {
        if !delay.is_zero() {
            debug!("Simulating {} ms of latency", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[async_trait]
impl BackendTrait for MockBackend {
    async fn check_session(&self) -> Result<Option<String>> {
        self.record();
        info!("Checking for a stored session");
        self.simulate_latency(self.startup_delay).await;
        // No session storage: always start signed out
        Ok(None)
    }

    async fn login(&self, email: &str, _password: &str) -> Result<String> {
        self.record();
        info!("Logging in {}", email);
        self.simulate_latency(self.latency).await;
        Ok(self.user_handle.clone())
    }

    async fn social_login(&self, provider: SocialProvider) -> Result<String> {
        self.record();
        info!("Logging in with {}", provider);
        self.simulate_latency(self.latency).await;
        Ok(self.user_handle.clone())
    }

    async fn post(&self, compose: &ComposeForm) -> Result<()> {
        self.record();
        match &compose.editing {
            Some(id) => info!("Updating post {}: {}", id, compose.content),
            None => info!("Posting: {}", compose.content),
        }
        if let Some(media) = &compose.media_url {
            info!("  with media: {}", media);
        }
        if let Some(parent) = &compose.reply_to {
            info!("  in reply to post {}", parent);
        }
        Ok(())
    }

    async fn react(&self, post_id: &str, reaction: Reaction) -> Result<()> {
        self.record();
        info!("Post {}: {}", post_id, reaction);
        Ok(())
    }

    async fn follow(&self, user_id: &str, follow: bool) -> Result<()> {
        self.record();
        if follow {
            info!("Following user {}", user_id);
        } else {
            info!("Unfollowing user {}", user_id);
        }
        Ok(())
    }

    async fn refresh_feed(&self) -> Result<()> {
        self.record();
        info!("Refreshing feed");
        self.simulate_latency(self.latency).await;
        Ok(())
    }

    async fn create_listing(&self, draft: &ListingDraft) -> Result<()> {
        self.record();
        info!("Creating market listing: {}", serde_json::to_string(draft)?);
        Ok(())
    }

    async fn reserve(&self, listing_id: &str) -> Result<()> {
        self.record();
        info!("Reserving listing {}", listing_id);
        Ok(())
    }

    async fn view_listing(&self, listing_id: &str) -> Result<()> {
        self.record();
        info!("Viewing listing {}", listing_id);
        Ok(())
    }

    async fn contact_seller(&self, listing_id: &str) -> Result<()> {
        self.record();
        info!("Contacting seller of listing {}", listing_id);
        Ok(())
    }

    async fn bargain(&self, listing_id: &str) -> Result<()> {
        self.record();
        info!("Opening bargaining on listing {}", listing_id);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_configured_handle() {
        let backend = MockBackend::new(&Config::instant());
        let handle = backend.login("jane@example.com", "secret1").await.unwrap();
        assert_eq!(handle, "@johndoe");
        assert_eq!(backend.backend_name(), "mock");
    }

    #[tokio::test]
    async fn test_session_check_is_signed_out() {
        let backend = MockBackend::new(&Config::instant());
        assert_eq!(backend.check_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repeated_actions_are_not_deduplicated() {
        let backend = MockBackend::new(&Config::instant());
        backend.reserve("m1").await.unwrap();
        backend.reserve("m1").await.unwrap();
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_social_login_with_every_provider() {
        let backend = MockBackend::new(&Config::instant());
        for provider in SocialProvider::ALL {
            let handle = backend.social_login(provider).await.unwrap();
            assert_eq!(handle, "@johndoe");
        }
        assert_eq!(backend.calls(), 4);
        assert_eq!("GitHub".parse::<SocialProvider>().unwrap(), SocialProvider::Github);
        assert_eq!("twitter".parse::<SocialProvider>().unwrap(), SocialProvider::Twitter);
        assert!("myspace".parse::<SocialProvider>().is_err());
    }

    #[tokio::test]
    async fn test_log_only_actions_are_recorded() {
        let backend = MockBackend::new(&Config::instant());
        backend.follow("2", true).await.unwrap();
        backend.view_listing("m1").await.unwrap();
        backend.contact_seller("m1").await.unwrap();
        backend.refresh_feed().await.unwrap();
        assert_eq!(backend.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_waits_for_latency() {
        let backend = MockBackend::default();
        let started = tokio::time::Instant::now();
        backend.refresh_feed().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let backend = MockBackend::default();
        let started = tokio::time::Instant::now();
        backend.social_login(SocialProvider::Apple).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
