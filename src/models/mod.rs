use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Marketplace category of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Vehicles,
    #[serde(rename = "Toys & Games")]
    ToysAndGames,
    Sports,
    Collectibles,
    Books,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndGarden,
        Category::Vehicles,
        Category::ToysAndGames,
        Category::Sports,
        Category::Collectibles,
        Category::Books,
        Category::Other,
    ];

    /// Short slugs accepted besides the label itself
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Category::HomeAndGarden => &["homegarden"],
            Category::ToysAndGames => &["toysgames"],
            _ => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeAndGarden => "Home & Garden",
            Category::Vehicles => "Vehicles",
            Category::ToysAndGames => "Toys & Games",
            Category::Sports => "Sports",
            Category::Collectibles => "Collectibles",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Electronics
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Accepts the display label, its kebab-case slug ("home-and-garden") or
    /// a short alias ("toys-games")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slug(s);
        Category::ALL
            .into_iter()
            .find(|c| slug(c.label()) == wanted || c.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown category: {}", s)))
    }
}

/// Item condition, ordered from best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::New
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slug(s);
        Condition::ALL
            .into_iter()
            .find(|c| slug(c.label()) == wanted)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown condition: {}", s)))
    }
}

/// Lowercase alphanumerics with `&` spelled out, so "Home & Garden" ==
/// "home-and-garden"
fn slug(s: &str) -> String {
    s.to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Core marketplace listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `None` means "make an offer"
    pub price: Option<f64>,
    pub bargaining_allowed: bool,
    pub location: String,
    pub category: Category,
    pub condition: Condition,
    /// Badge shown on the card, independent of `condition`
    pub is_new: bool,
    pub seller: String,
    pub image: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub reserved: bool,
    /// Only rendered while `reserved` is set
    pub reserved_until: Option<String>,
}

impl Listing {
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) => format_price(price),
            None => "Make an offer".to_string(),
        }
    }

    /// Price used by the price comparators; unpriced listings count as zero
    pub fn sort_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn reserved_label(&self) -> Option<String> {
        if !self.reserved {
            return None;
        }
        Some(match &self.reserved_until {
            Some(until) => format!("Reserved until {}", until),
            None => "Reserved".to_string(),
        })
    }
}

/// A feed post (tweet) or a reply to one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub username: String,
    pub handle: String,
    pub avatar: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub likes: u32,
    pub retweets: u32,
    pub replies: u32,
    pub dislikes: u32,
    pub image: Option<String>,
    pub in_reply_to: Option<String>,
}

/// A user as shown in people search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub avatar: String,
    pub bio: String,
    pub is_verified: bool,
    pub is_following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hashtag {
    pub tag: String,
    pub post_count: u64,
}

/// Profile header information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub join_date: String,
    pub followers_count: u32,
    pub following_count: u32,
    pub profile_image: String,
    pub cover_image: String,
}

impl Profile {
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

/// Render the "time ago" token shown on posts and listings ("now", "10m", "2h", "1d", "1w")
pub fn recency_token(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(posted_at);
    if elapsed.num_minutes() < 1 {
        "now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h", elapsed.num_hours())
    } else if elapsed.num_weeks() < 1 {
        format!("{}d", elapsed.num_days())
    } else {
        format!("{}w", elapsed.num_weeks())
    }
}

pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

/// Parse user-entered price text ("$120", "85", "$25 each"). After an
/// optional leading `$`, the longest leading float literal is taken (sign,
/// digits, fraction, exponent), so "1,250" reads as 1 and "1e3" as 1000.
/// Returns `None` when no number leads the text.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    let bytes = trimmed.as_bytes();

    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok().filter(|p| p.is_finite())
}
