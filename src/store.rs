//! Single in-memory application store. Seeded once from `seed`; the
//! stubbed actions go through the backend. Only the follow flag on a user
//! changes after seeding.

use crate::backend::{BackendTrait, Reaction, SocialProvider};
use crate::error::{AppError, AppResult};
use crate::forms::{ComposeForm, ListingForm, LoginForm};
use crate::market::{self, MarketFilters, SortMode};
use crate::models::{Hashtag, Listing, Post, Profile, User};
use crate::seed;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Authentication status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    Loading,
    SignedOut,
    SignedIn { handle: String },
}

/// Posts shown under the profile tabs
#[derive(Debug, Clone, Default)]
pub struct ProfilePosts {
    pub posts: Vec<Post>,
    pub replies: Vec<Post>,
    pub media: Vec<Post>,
    pub likes: Vec<Post>,
}

pub struct AppStore {
    backend: Arc<dyn BackendTrait>,
    now: DateTime<Utc>,
    session: Session,
    feed: Vec<Post>,
    replies: Vec<Post>,
    search_posts: Vec<Post>,
    users: Vec<User>,
    hashtags: Vec<Hashtag>,
    profile: Profile,
    profile_posts: ProfilePosts,
    listings: Vec<Listing>,
}

impl AppStore {
    /// Seed the store with mock data laid out relative to `now`. The profile,
    /// its posts and its listings all belong to `user_handle`.
    pub fn new(backend: Arc<dyn BackendTrait>, now: DateTime<Utc>, user_handle: &str) -> Self {
        let profile = seed::profile(user_handle);
        let (posts, replies, media, likes) = seed::profile_posts(now, &profile);
        Self {
            backend,
            now,
            session: Session::Loading,
            feed: seed::feed(now),
            replies: seed::replies(now),
            search_posts: seed::search_posts(now),
            users: seed::users(),
            hashtags: seed::hashtags(),
            listings: seed::listings_owned_by(now, &profile.handle()),
            profile,
            profile_posts: ProfilePosts {
                posts,
                replies,
                media,
                likes,
            },
        }
    }

    /// Reference instant used to render recency tokens
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.session, Session::SignedIn { .. })
    }

    /// Resolve the startup session check. A failing check leaves the user signed out.
    pub async fn bootstrap(&mut self) {
        self.session = Session::Loading;
        self.session = match self.backend.check_session().await {
            Ok(Some(handle)) => Session::SignedIn { handle },
            Ok(None) => Session::SignedOut,
            Err(e) => {
                warn!("Error checking auth status: {:#}", e);
                Session::SignedOut
            }
        };
        info!("Session resolved: {:?}", self.session);
    }

    pub async fn login(&mut self, form: &LoginForm) -> AppResult<String> {
        form.validate().map_err(AppError::Validation)?;
        let handle = self.backend.login(&form.email, &form.password).await?;
        Ok(self.sign_in(handle))
    }

    pub async fn social_login(&mut self, provider: SocialProvider) -> AppResult<String> {
        let handle = self.backend.social_login(provider).await?;
        Ok(self.sign_in(handle))
    }

    fn sign_in(&mut self, handle: String) -> String {
        if handle != self.profile.handle() {
            warn!(
                "Backend signed in {} but the store is seeded for {}",
                handle,
                self.profile.handle()
            );
        }
        self.session = Session::SignedIn {
            handle: handle.clone(),
        };
        handle
    }

    pub fn logout(&mut self) {
        info!("Logging out");
        self.session = Session::SignedOut;
    }

    pub fn feed(&self) -> &[Post] {
        &self.feed
    }

    /// Find a post anywhere in the store: feed, replies, search results or profile
    pub fn post(&self, id: &str) -> AppResult<&Post> {
        self.feed
            .iter()
            .chain(&self.replies)
            .chain(&self.search_posts)
            .chain(&self.profile_posts.posts)
            .chain(&self.profile_posts.replies)
            .chain(&self.profile_posts.media)
            .chain(&self.profile_posts.likes)
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    pub fn replies_to(&self, post_id: &str) -> Vec<&Post> {
        self.replies
            .iter()
            .filter(|r| r.in_reply_to.as_deref() == Some(post_id))
            .collect()
    }

    /// Publish a post, reply or edit, then clear the form
    pub async fn submit_post(&self, form: &mut ComposeForm) -> AppResult<()> {
        form.validate().map_err(AppError::Validation)?;
        if let Some(parent) = &form.reply_to {
            self.post(parent)?;
        }
        if let Some(edited) = &form.editing {
            self.post(edited)?;
        }
        self.backend.post(form).await?;
        form.reset();
        Ok(())
    }

    pub async fn react(&self, post_id: &str, reaction: Reaction) -> AppResult<()> {
        self.post(post_id)?;
        self.backend.react(post_id, reaction).await?;
        Ok(())
    }

    /// Pull-to-refresh. The seeded timeline does not change.
    pub async fn refresh_feed(&self) -> AppResult<()> {
        self.backend.refresh_feed().await?;
        Ok(())
    }

    pub fn search_posts(&self) -> &[Post] {
        &self.search_posts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> AppResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    /// Flip the follow state of a user, returning the new state
    pub async fn toggle_follow(&mut self, user_id: &str) -> AppResult<bool> {
        let follow = !self.user(user_id)?.is_following;
        self.backend.follow(user_id, follow).await?;
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.is_following = follow;
        }
        Ok(follow)
    }

    pub fn hashtags(&self) -> &[Hashtag] {
        &self.hashtags
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_posts(&self) -> &ProfilePosts {
        &self.profile_posts
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn listing(&self, id: &str) -> AppResult<&Listing> {
        self.listings
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", id)))
    }

    /// Listings owned by the signed-in profile
    pub fn own_listings(&self) -> Vec<&Listing> {
        let handle = self.profile.handle();
        self.listings.iter().filter(|l| l.seller == handle).collect()
    }

    pub fn market(&self, filters: &MarketFilters, sort: SortMode) -> Vec<&Listing> {
        market::apply(&self.listings, filters, sort)
    }

    /// Hand the listing to the backend and reset the form. The store's
    /// listings are left untouched.
    pub async fn create_listing(&self, form: &mut ListingForm) -> AppResult<()> {
        let draft = form.to_draft().map_err(AppError::Validation)?;
        self.backend.create_listing(&draft).await?;
        form.reset();
        Ok(())
    }

    pub async fn reserve(&self, listing_id: &str) -> AppResult<()> {
        self.listing(listing_id)?;
        self.backend.reserve(listing_id).await?;
        Ok(())
    }

    pub async fn view_listing(&self, listing_id: &str) -> AppResult<()> {
        self.listing(listing_id)?;
        self.backend.view_listing(listing_id).await?;
        Ok(())
    }

    pub async fn contact_seller(&self, listing_id: &str) -> AppResult<()> {
        self.listing(listing_id)?;
        self.backend.contact_seller(listing_id).await?;
        Ok(())
    }

    pub async fn bargain(&self, listing_id: &str) -> AppResult<()> {
        let listing = self.listing(listing_id)?;
        if !listing.bargaining_allowed {
            warn!("Seller of listing {} has not opted into bargaining", listing_id);
        }
        self.backend.bargain(listing_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::config::{Config, DEFAULT_USER_HANDLE};

    fn store() -> AppStore {
        AppStore::new(
            Arc::new(MockBackend::new(&Config::instant())),
            Utc::now(),
            DEFAULT_USER_HANDLE,
        )
    }

    #[tokio::test]
    async fn test_bootstrap_then_login_and_logout() {
        let mut store = store();
        assert_eq!(store.session(), &Session::Loading);

        store.bootstrap().await;
        assert_eq!(store.session(), &Session::SignedOut);

        let handle = store
            .login(&LoginForm::new("john@example.com", "hunter22"))
            .await
            .unwrap();
        assert_eq!(handle, "@johndoe");
        assert!(store.is_signed_in());

        store.logout();
        assert_eq!(store.session(), &Session::SignedOut);
    }

    #[tokio::test]
    async fn test_invalid_login_keeps_session() {
        let mut store = store();
        store.bootstrap().await;
        let err = store.login(&LoginForm::new("john", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.len() == 2));
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn test_submit_post_resets_form() {
        let store = store();
        let mut form = ComposeForm::reply("1");
        form.content = "Nice launch!".to_string();
        store.submit_post(&mut form).await.unwrap();
        assert!(form.content.is_empty());
        assert!(form.reply_to.is_none());
    }

    #[tokio::test]
    async fn test_reply_to_unknown_post_fails() {
        let store = store();
        let mut form = ComposeForm::reply("nope");
        form.content = "hello".to_string();
        let err = store.submit_post(&mut form).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(form.content, "hello");
    }

    #[tokio::test]
    async fn test_create_listing_does_not_touch_store() {
        let store = store();
        let before = store.listings().len();
        let mut form = ListingForm {
            title: "Desk".to_string(),
            description: "Solid oak".to_string(),
            location: "Boston, MA".to_string(),
            ..ListingForm::default()
        };
        store.create_listing(&mut form).await.unwrap();
        assert_eq!(store.listings().len(), before);
        assert!(form.title.is_empty());
    }

    #[tokio::test]
    async fn test_reserve_and_bargain_require_known_listing() {
        let store = store();
        store.reserve("m1").await.unwrap();
        store.bargain("m1").await.unwrap();
        assert!(matches!(store.reserve("x").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_follow_flips_state() {
        let mut store = store();
        assert!(!store.user("1").unwrap().is_following);
        assert!(store.toggle_follow("1").await.unwrap());
        assert!(store.user("1").unwrap().is_following);
        assert!(!store.toggle_follow("1").await.unwrap());
        assert!(!store.user("1").unwrap().is_following);
        assert!(matches!(store.toggle_follow("99").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_listing_card_actions() {
        let store = store();
        store.view_listing("m2").await.unwrap();
        store.contact_seller("m2").await.unwrap();
        assert!(matches!(store.contact_seller("x").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_refresh_feed_keeps_timeline() {
        let store = store();
        let before: Vec<String> = store.feed().iter().map(|p| p.id.clone()).collect();
        store.refresh_feed().await.unwrap();
        let after: Vec<String> = store.feed().iter().map(|p| p.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_configured_handle_owns_profile_and_listings() {
        let config = Config {
            user_handle: "@janesmith".to_string(),
            ..Config::instant()
        };
        let mut store = AppStore::new(Arc::new(MockBackend::new(&config)), Utc::now(), &config.user_handle);
        let handle = store
            .social_login(SocialProvider::Github)
            .await
            .unwrap();

        assert_eq!(handle, "@janesmith");
        assert_eq!(store.profile().handle(), "@janesmith");
        assert_eq!(store.post("p1").unwrap().handle, "@janesmith");
        let own = store.own_listings();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].seller, "@janesmith");
    }

    #[test]
    fn test_post_lookup_spans_collections() {
        let store = store();
        assert_eq!(store.post("r2").unwrap().handle, "@alexj");
        assert_eq!(store.post("p5").unwrap().username, "John Doe");
        assert_eq!(store.replies_to("1").len(), 3);
        assert_eq!(store.own_listings().len(), 1);
    }
}
