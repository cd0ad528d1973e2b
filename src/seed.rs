//! Static mock data the store is seeded from. Timestamps are laid out
//! relative to `now` so recency tokens render the same on every run.

use crate::config::DEFAULT_USER_HANDLE;
use crate::models::{Category, Condition, Hashtag, Listing, Post, Profile, User};
use chrono::{DateTime, Duration, Utc};

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{}?w=600&q=80", photo)
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    username: &str,
    handle: &str,
    avatar_seed: &str,
    content: &str,
    posted_at: DateTime<Utc>,
    (likes, retweets, replies): (u32, u32, u32),
    image: Option<&str>,
) -> Post {
    Post {
        id: id.to_string(),
        username: username.to_string(),
        handle: handle.to_string(),
        avatar: avatar(avatar_seed),
        content: content.to_string(),
        posted_at,
        likes,
        retweets,
        replies,
        dislikes: 0,
        image: image.map(unsplash),
        in_reply_to: None,
    }
}

/// Home timeline
pub fn feed(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        post(
            "1",
            "Jane Smith",
            "@janesmith",
            "jane",
            "Just launched my new website! Check it out at https://example.com #webdev #launch",
            now - Duration::minutes(10),
            (24, 5, 3),
            None,
        ),
        post(
            "2",
            "Tech News",
            "@technews",
            "tech",
            "Breaking: New smartphone features unveiled today will change how we interact with mobile devices",
            now - Duration::minutes(45),
            (153, 78, 34),
            Some("photo-1511707171634-5f897ff02aa9"),
        ),
        post(
            "3",
            "Travel Enthusiast",
            "@travelbug",
            "travel",
            "The sunset in Bali tonight was absolutely breathtaking! #travel #bali #sunset",
            now - Duration::hours(2),
            (287, 42, 12),
            Some("photo-1569288063643-5d29ad6874f9"),
        ),
        post(
            "4",
            "Coding Tips",
            "@codetips",
            "code",
            "Pro tip: Learn keyboard shortcuts for your IDE. It will save you hours of development time!",
            now - Duration::hours(3),
            (89, 23, 7),
            None,
        ),
        post(
            "5",
            "Foodie Dreams",
            "@foodielove",
            "food",
            "Made homemade pasta for the first time today. The process was therapeutic and the results were delicious!",
            now - Duration::hours(5),
            (112, 14, 22),
            Some("photo-1473093295043-cdd812d0e601"),
        ),
    ]
}

/// Replies to post "1" shown on the detail screen
pub fn replies(now: DateTime<Utc>) -> Vec<Post> {
    let mut replies = vec![
        post(
            "r1",
            "Jane Smith",
            "@janesmith",
            "jane",
            "This is a great point! I completely agree with what you're saying.",
            now - Duration::hours(1),
            (15, 2, 1),
            None,
        ),
        post(
            "r2",
            "Alex Johnson",
            "@alexj",
            "alex",
            "I have a different perspective on this. Have you considered...",
            now - Duration::minutes(45),
            (8, 0, 3),
            None,
        ),
        post(
            "r3",
            "Sam Wilson",
            "@samwilson",
            "sam",
            "Here's an article that relates to this topic: https://example.com/article",
            now - Duration::minutes(30),
            (21, 5, 2),
            Some("photo-1557804506-669a67965ba0"),
        ),
    ];
    for reply in &mut replies {
        reply.in_reply_to = Some("1".to_string());
    }
    replies
}

/// Posts returned for any non-empty search
pub fn search_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        post(
            "s1",
            "Jane Smith",
            "@janesmith",
            "jane",
            "Just finished designing the new app interface! Can't wait to share it with everyone. #UXDesign #ProductDesign",
            now - Duration::hours(2),
            (128, 42, 17),
            Some("photo-1581291518633-83b4ebd1d83e"),
        ),
        post(
            "s2",
            "Alex Johnson",
            "@alexj",
            "alex",
            "Working on a new React Native project. The new architecture is amazing! #ReactNative #MobileApp",
            now - Duration::hours(5),
            (89, 23, 7),
            None,
        ),
        post(
            "s3",
            "Sam Wilson",
            "@samwilson",
            "sam",
            "Captured this amazing sunset today. Nature never fails to inspire me.",
            now - Duration::days(1),
            (215, 56, 12),
            Some("photo-1472214103451-9374bd1c798e"),
        ),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Jane Smith".to_string(),
            handle: "@janesmith".to_string(),
            avatar: avatar("jane"),
            bio: "UX Designer | Coffee enthusiast | Dog lover".to_string(),
            is_verified: true,
            is_following: false,
        },
        User {
            id: "2".to_string(),
            name: "Alex Johnson".to_string(),
            handle: "@alexj".to_string(),
            avatar: avatar("alex"),
            bio: "Software Engineer at Tech Co. | Tweets about code and food".to_string(),
            is_verified: false,
            is_following: true,
        },
        User {
            id: "3".to_string(),
            name: "Sam Wilson".to_string(),
            handle: "@samwilson".to_string(),
            avatar: avatar("sam"),
            bio: "Photographer | Traveler | Always looking for the next adventure".to_string(),
            is_verified: false,
            is_following: false,
        },
    ]
}

pub fn hashtags() -> Vec<Hashtag> {
    [
        ("#ReactNative", 12_453),
        ("#UXDesign", 8_765),
        ("#MobileApp", 5_432),
        ("#ProductDesign", 3_210),
    ]
    .into_iter()
    .map(|(tag, post_count)| Hashtag {
        tag: tag.to_string(),
        post_count,
    })
    .collect()
}

/// Profile of the signed-in user. The default handle gets the full demo
/// profile; any other handle gets its username as display name.
pub fn profile(handle: &str) -> Profile {
    let username = handle.trim_start_matches('@').to_string();
    let display_name = if handle == DEFAULT_USER_HANDLE {
        "John Doe".to_string()
    } else {
        username.clone()
    };
    Profile {
        user_id: "1".to_string(),
        username,
        display_name,
        bio: "Building things for the web and mobile. Occasional seller of old gear.".to_string(),
        location: "San Francisco, CA".to_string(),
        website: "johndoe.dev".to_string(),
        join_date: "September 2023".to_string(),
        followers_count: 1234,
        following_count: 567,
        profile_image: avatar("john"),
        cover_image: "https://images.unsplash.com/photo-1557683316-973673baf926?w=800&q=80".to_string(),
    }
}

/// Profile tab contents: (posts, replies, media, likes). Everything but
/// likes is authored by `owner`.
pub fn profile_posts(now: DateTime<Utc>, owner: &Profile) -> (Vec<Post>, Vec<Post>, Vec<Post>, Vec<Post>) {
    let posts = vec![
        post(
            "p1",
            &owner.display_name,
            &owner.handle(),
            "john",
            "Just setting up my Social clone!",
            now - Duration::hours(2),
            (42, 12, 5),
            None,
        ),
        post(
            "p2",
            &owner.display_name,
            &owner.handle(),
            "john",
            "Working on a new project. #coding #reactnative",
            now - Duration::days(1),
            (89, 23, 7),
            Some("photo-1607799279861-4dd421887fb3"),
        ),
    ];
    let mut reply = post(
        "p3",
        &owner.display_name,
        &owner.handle(),
        "john",
        "@janedoe Thanks for the feedback on my project!",
        now - Duration::hours(5),
        (12, 2, 1),
        None,
    );
    reply.in_reply_to = Some("1".to_string());
    let media = vec![
        post(
            "p4",
            &owner.display_name,
            &owner.handle(),
            "john",
            "Check out this amazing view! #travel",
            now - Duration::days(3),
            (156, 42, 13),
            Some("photo-1480714378408-67cf0d13bc1b"),
        ),
        post(
            "p5",
            &owner.display_name,
            &owner.handle(),
            "john",
            "My new workspace setup. #tech #productivity",
            now - Duration::weeks(1),
            (201, 56, 24),
            Some("photo-1517694712202-14dd9538aa97"),
        ),
    ];
    let likes = vec![post(
        "p6",
        "Jane Smith",
        "@janesmith",
        "jane",
        "Just launched my new portfolio website!",
        now - Duration::hours(4),
        (78, 15, 8),
        None,
    )];
    (posts, vec![reply], media, likes)
}

/// Marketplace listings owned by the default demo user.
pub fn listings(now: DateTime<Utc>) -> Vec<Listing> {
    listings_owned_by(now, DEFAULT_USER_HANDLE)
}

/// Marketplace listings; the last one is sold by `owner`. The first entry is
/// relied on by tests: Vintage Camera, Electronics, Good, $120.
pub fn listings_owned_by(now: DateTime<Utc>, owner: &str) -> Vec<Listing> {
    vec![
        Listing {
            id: "m1".to_string(),
            title: "Vintage Camera".to_string(),
            description: "Vintage film camera in excellent condition. Perfect for collectors.".to_string(),
            price: Some(120.0),
            bargaining_allowed: false,
            location: "New York, NY".to_string(),
            category: Category::Electronics,
            condition: Condition::Good,
            is_new: false,
            seller: "@photogeek".to_string(),
            image: Some(unsplash("photo-1516035069371-29a1b244cc32")),
            posted_at: now - Duration::hours(2),
            reserved: false,
            reserved_until: None,
        },
        Listing {
            id: "m2".to_string(),
            title: "Mechanical Keyboard".to_string(),
            description: "Mechanical keyboard with RGB lighting and custom keycaps.".to_string(),
            price: Some(85.0),
            bargaining_allowed: true,
            location: "San Francisco, CA".to_string(),
            category: Category::Electronics,
            condition: Condition::LikeNew,
            is_new: false,
            seller: "@techguru".to_string(),
            image: Some(unsplash("photo-1595044426077-d36d9236d54a")),
            posted_at: now - Duration::hours(5),
            reserved: false,
            reserved_until: None,
        },
        Listing {
            id: "m3".to_string(),
            title: "Handmade Pottery".to_string(),
            description: "Handmade ceramic bowl, perfect for your home decor.".to_string(),
            price: Some(45.0),
            bargaining_allowed: false,
            location: "Portland, OR".to_string(),
            category: Category::HomeAndGarden,
            condition: Condition::New,
            is_new: true,
            seller: "@craftlover".to_string(),
            image: Some(unsplash("photo-1565193298357-c5b64a816c38")),
            posted_at: now - Duration::days(1),
            reserved: true,
            reserved_until: Some("Friday".to_string()),
        },
        Listing {
            id: "m4".to_string(),
            title: "Vintage Vinyl Records".to_string(),
            description: "Collection of classic vinyl records from the 70s and 80s.".to_string(),
            price: Some(25.0),
            bargaining_allowed: true,
            location: "Austin, TX".to_string(),
            category: Category::Collectibles,
            condition: Condition::Fair,
            is_new: false,
            seller: "@musicfan".to_string(),
            image: Some(unsplash("photo-1603048588665-791ca8aea617")),
            posted_at: now - Duration::days(3),
            reserved: false,
            reserved_until: None,
        },
        Listing {
            id: "m5".to_string(),
            title: "Road Bike".to_string(),
            description: "Aluminium frame road bike, recently serviced. Make me an offer.".to_string(),
            price: None,
            bargaining_allowed: true,
            location: "Seattle, WA".to_string(),
            category: Category::Sports,
            condition: Condition::Good,
            is_new: false,
            seller: owner.to_string(),
            image: None,
            posted_at: now - Duration::minutes(30),
            reserved: false,
            reserved_until: None,
        },
    ]
}
