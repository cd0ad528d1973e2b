//! Screen state as tagged unions and a single `render` dispatch that turns
//! store data into serializable view models.

use crate::error::{AppError, AppResult};
use crate::market::{MarketFilters, SortMode};
use crate::models::{recency_token, Hashtag, Listing, Post, User};
use crate::store::{AppStore, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTab {
    #[default]
    Home,
    Search,
    Notifications,
    Market,
    Profile,
}

impl NavTab {
    pub fn route(&self) -> &'static str {
        match self {
            NavTab::Home => "/",
            NavTab::Search => "/search",
            NavTab::Notifications => "/notifications",
            NavTab::Market => "/market",
            NavTab::Profile => "/profile",
        }
    }

    /// Unknown routes fall back to home
    pub fn from_route(route: &str) -> Self {
        match route {
            "/search" => NavTab::Search,
            "/notifications" => NavTab::Notifications,
            "/market" => NavTab::Market,
            "/profile" => NavTab::Profile,
            _ => NavTab::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    SignUp,
}

impl AuthTab {
    pub fn heading(&self) -> &'static str {
        match self {
            AuthTab::Login => "Log in to Chirp",
            AuthTab::SignUp => "Join Chirp today",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTab {
    #[default]
    Top,
    Latest,
    People,
    Media,
}

impl FromStr for SearchTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(SearchTab::Top),
            "latest" => Ok(SearchTab::Latest),
            "people" => Ok(SearchTab::People),
            "media" => Ok(SearchTab::Media),
            other => Err(AppError::InvalidInput(format!("unknown search tab: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileTab {
    #[default]
    Posts,
    Replies,
    Media,
    Likes,
    Market,
}

impl ProfileTab {
    pub fn empty_message(&self) -> &'static str {
        match self {
            ProfileTab::Posts => "No posts yet",
            ProfileTab::Replies => "No replies yet",
            ProfileTab::Media => "No media posts yet",
            ProfileTab::Likes => "No liked posts yet",
            ProfileTab::Market => "No market items yet",
        }
    }
}

impl FromStr for ProfileTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posts" => Ok(ProfileTab::Posts),
            "replies" => Ok(ProfileTab::Replies),
            "media" => Ok(ProfileTab::Media),
            "likes" => Ok(ProfileTab::Likes),
            "market" => Ok(ProfileTab::Market),
            other => Err(AppError::InvalidInput(format!("unknown profile tab: {}", other))),
        }
    }
}

/// Search box state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub tab: SearchTab,
}

impl SearchState {
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Tapping a hashtag searches for it
    pub fn press_hashtag(&mut self, hashtag: &Hashtag) {
        self.query = hashtag.tag.clone();
    }
}

/// Everything the app can show
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Auth(AuthTab),
    Feed,
    TweetDetail(String),
    Search(SearchState),
    Market { filters: MarketFilters, sort: SortMode },
    Profile(ProfileTab),
}

impl Screen {
    pub fn nav_tab(&self) -> Option<NavTab> {
        match self {
            Screen::Auth(_) => None,
            Screen::Feed | Screen::TweetDetail(_) => Some(NavTab::Home),
            Screen::Search(_) => Some(NavTab::Search),
            Screen::Market { .. } => Some(NavTab::Market),
            Screen::Profile(_) => Some(NavTab::Profile),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: String,
    pub username: String,
    pub handle: String,
    pub content: String,
    pub time_ago: String,
    pub likes: u32,
    pub retweets: u32,
    pub replies: u32,
    pub dislikes: u32,
    pub image: Option<String>,
    pub is_own: bool,
}

impl PostCard {
    fn new(post: &Post, now: DateTime<Utc>, own_handle: &str) -> Self {
        Self {
            id: post.id.clone(),
            username: post.username.clone(),
            handle: post.handle.clone(),
            content: post.content.clone(),
            time_ago: recency_token(post.posted_at, now),
            likes: post.likes,
            retweets: post.retweets,
            replies: post.replies,
            dislikes: post.dislikes,
            image: post.image.clone(),
            is_own: post.handle == own_handle,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingCard {
    pub id: String,
    pub title: String,
    pub price: String,
    pub bargaining: bool,
    pub description: String,
    pub location: String,
    pub category: String,
    pub condition: String,
    pub seller: String,
    pub time_ago: String,
    pub new_badge: bool,
    pub reserved: Option<String>,
}

impl ListingCard {
    fn new(listing: &Listing, now: DateTime<Utc>) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price_label(),
            bargaining: listing.bargaining_allowed,
            description: listing.description.clone(),
            location: listing.location.clone(),
            category: listing.category.to_string(),
            condition: listing.condition.to_string(),
            seller: listing.seller.clone(),
            time_ago: recency_token(listing.posted_at, now),
            new_badge: listing.is_new,
            reserved: listing.reserved_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileHeader {
    pub display_name: String,
    pub handle: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub join_date: String,
    pub followers: u32,
    pub following: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ProfileContent {
    Posts(Vec<PostCard>),
    Listings(Vec<ListingCard>),
    Empty(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Loading,
    Auth {
        heading: String,
        tab: AuthTab,
    },
    Feed {
        posts: Vec<PostCard>,
    },
    TweetDetail {
        post: PostCard,
        replies: Vec<PostCard>,
    },
    SearchPrompt,
    SearchPeople {
        query: String,
        users: Vec<User>,
        trending: Vec<Hashtag>,
    },
    SearchPosts {
        query: String,
        tab: SearchTab,
        posts: Vec<PostCard>,
        trending: Vec<Hashtag>,
    },
    Market {
        sort: SortMode,
        filters_active: bool,
        listings: Vec<ListingCard>,
    },
    Profile {
        header: ProfileHeader,
        tab: ProfileTab,
        content: ProfileContent,
    },
}

/// Build the view model for `screen`. Any screen but `Auth` needs a
/// resolved, signed-in session: a loading session renders `Loading` and a
/// signed-out one falls back to the login screen. Ownership of posts is
/// decided by the store's profile handle.
pub fn render(store: &AppStore, screen: &Screen) -> AppResult<View> {
    match (store.session(), screen) {
        (_, Screen::Auth(tab)) => {
            return Ok(View::Auth {
                heading: tab.heading().to_string(),
                tab: *tab,
            })
        }
        (Session::Loading, _) => return Ok(View::Loading),
        (Session::SignedOut, _) => {
            return Ok(View::Auth {
                heading: AuthTab::Login.heading().to_string(),
                tab: AuthTab::Login,
            })
        }
        (Session::SignedIn { .. }, _) => {}
    }
    let own_handle = store.profile().handle();
    let now = store.now();
    let card = |post: &Post| PostCard::new(post, now, &own_handle);

    let view = match screen {
        Screen::Auth(_) => unreachable!("handled above"),
        Screen::Feed => View::Feed {
            posts: store.feed().iter().map(card).collect(),
        },
        Screen::TweetDetail(id) => View::TweetDetail {
            post: card(store.post(id)?),
            replies: store.replies_to(id).into_iter().map(card).collect(),
        },
        Screen::Search(state) => render_search(store, state, &card),
        Screen::Market { filters, sort } => View::Market {
            sort: *sort,
            filters_active: filters.is_active(),
            listings: store
                .market(filters, *sort)
                .into_iter()
                .map(|l| ListingCard::new(l, now))
                .collect(),
        },
        Screen::Profile(tab) => render_profile(store, *tab, &card),
    };
    Ok(view)
}

fn render_search(store: &AppStore, state: &SearchState, card: &dyn Fn(&Post) -> PostCard) -> View {
    if !state.is_searching() {
        return View::SearchPrompt;
    }
    let trending = store.hashtags().to_vec();
    match state.tab {
        SearchTab::People => View::SearchPeople {
            query: state.query.clone(),
            users: store.users().to_vec(),
            trending,
        },
        tab => {
            let mut posts: Vec<&Post> = store.search_posts().iter().collect();
            match tab {
                SearchTab::Latest => posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at)),
                SearchTab::Media => posts.retain(|p| p.image.is_some()),
                _ => {}
            }
            View::SearchPosts {
                query: state.query.clone(),
                tab,
                posts: posts.into_iter().map(card).collect(),
                trending,
            }
        }
    }
}

fn render_profile(store: &AppStore, tab: ProfileTab, card: &dyn Fn(&Post) -> PostCard) -> View {
    let profile = store.profile();
    let header = ProfileHeader {
        display_name: profile.display_name.clone(),
        handle: profile.handle(),
        bio: profile.bio.clone(),
        location: profile.location.clone(),
        website: profile.website.clone(),
        join_date: profile.join_date.clone(),
        followers: profile.followers_count,
        following: profile.following_count,
    };

    let posts = store.profile_posts();
    let content = match tab {
        ProfileTab::Market => {
            let own: Vec<ListingCard> = store
                .own_listings()
                .into_iter()
                .map(|l| ListingCard::new(l, store.now()))
                .collect();
            if own.is_empty() {
                ProfileContent::Empty(tab.empty_message().to_string())
            } else {
                ProfileContent::Listings(own)
            }
        }
        _ => {
            let source = match tab {
                ProfileTab::Replies => &posts.replies,
                ProfileTab::Media => &posts.media,
                ProfileTab::Likes => &posts.likes,
                _ => &posts.posts,
            };
            if source.is_empty() {
                ProfileContent::Empty(tab.empty_message().to_string())
            } else {
                ProfileContent::Posts(source.iter().map(card).collect())
            }
        }
    };

    View::Profile {
        header,
        tab,
        content,
    }
}

fn write_post(f: &mut fmt::Formatter<'_>, post: &PostCard) -> fmt::Result {
    writeln!(f, "{} {} · {}", post.username, post.handle, post.time_ago)?;
    writeln!(f, "   {}", post.content)?;
    if let Some(image) = &post.image {
        writeln!(f, "   [image] {}", image)?;
    }
    writeln!(
        f,
        "   💬 {}  🔁 {}  ❤️ {}  👎 {}",
        post.replies, post.retweets, post.likes, post.dislikes
    )
}

fn write_listing(f: &mut fmt::Formatter<'_>, listing: &ListingCard) -> fmt::Result {
    writeln!(f, "{} ({}) [{}]", listing.title, listing.price, listing.id)?;
    let mut badges = Vec::new();
    if listing.new_badge {
        badges.push("New".to_string());
    }
    if let Some(reserved) = &listing.reserved {
        badges.push(reserved.clone());
    }
    if listing.bargaining {
        badges.push("Open to offers".to_string());
    }
    if !badges.is_empty() {
        writeln!(f, "   {}", badges.join(" | "))?;
    }
    writeln!(f, "   {}", listing.description)?;
    writeln!(
        f,
        "   {} · {} · {} · {} · {}",
        listing.location, listing.category, listing.condition, listing.seller, listing.time_ago
    )
}

fn write_trending(f: &mut fmt::Formatter<'_>, trending: &[Hashtag]) -> fmt::Result {
    writeln!(f, "Trending:")?;
    for tag in trending {
        writeln!(f, "   {} ({} posts)", tag.tag, tag.post_count)?;
    }
    Ok(())
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => writeln!(f, "Loading..."),
            View::Auth { heading, .. } => writeln!(f, "{}", heading),
            View::Feed { posts } => {
                for (i, post) in posts.iter().enumerate() {
                    write!(f, "{}. ", i + 1)?;
                    write_post(f, post)?;
                }
                Ok(())
            }
            View::TweetDetail { post, replies } => {
                write_post(f, post)?;
                writeln!(f, "Replies ({}):", replies.len())?;
                for reply in replies {
                    write!(f, "  ↳ ")?;
                    write_post(f, reply)?;
                }
                Ok(())
            }
            View::SearchPrompt => writeln!(f, "Search for people, topics, or keywords"),
            View::SearchPeople { users, trending, .. } => {
                for user in users {
                    let check = if user.is_verified { " ✔" } else { "" };
                    let follow = if user.is_following { "Following" } else { "Follow" };
                    writeln!(f, "{}{} {} [{}]", user.name, check, user.handle, follow)?;
                    writeln!(f, "   {}", user.bio)?;
                }
                write_trending(f, trending)
            }
            View::SearchPosts { posts, trending, .. } => {
                for post in posts {
                    write_post(f, post)?;
                }
                write_trending(f, trending)
            }
            View::Market { sort, listings, .. } => {
                writeln!(f, "Marketplace ({} listings, sorted by {})", listings.len(), sort)?;
                for listing in listings {
                    write_listing(f, listing)?;
                }
                Ok(())
            }
            View::Profile {
                header,
                content,
                ..
            } => {
                writeln!(f, "{} {}", header.display_name, header.handle)?;
                writeln!(f, "   {}", header.bio)?;
                writeln!(
                    f,
                    "   {} · {} · Joined {}",
                    header.location, header.website, header.join_date
                )?;
                writeln!(
                    f,
                    "   {} Following  {} Followers",
                    header.following, header.followers
                )?;
                match content {
                    ProfileContent::Posts(posts) => posts.iter().try_for_each(|p| write_post(f, p)),
                    ProfileContent::Listings(listings) => {
                        listings.iter().try_for_each(|l| write_listing(f, l))
                    }
                    ProfileContent::Empty(message) => writeln!(f, "{}", message),
                }
            }
        }
    }
}
