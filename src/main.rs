use anyhow::{Context, Result};
use chirp_market::backend::{MockBackend, Reaction, SocialProvider};
use chirp_market::forms::{ComposeForm, ListingForm, LoginForm};
use chirp_market::market::{MarketFilters, SortMode};
use chirp_market::models::{Category, Condition};
use chirp_market::views::{self, ProfileTab, Screen, SearchState, SearchTab};
use chirp_market::{AppError, AppResult, AppStore, Config};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chirp Market - social feed and marketplace, running on mock data
#[derive(Parser)]
#[command(name = "chirp-market")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home feed
    Feed,
    /// Show a post with its replies
    Tweet { id: String },
    /// Browse marketplace listings
    Market(MarketArgs),
    /// Search people and posts
    Search {
        query: String,
        /// top, latest, people or media
        #[arg(long, default_value = "top")]
        tab: String,
    },
    /// Show the signed-in profile
    Profile {
        /// posts, replies, media, likes or market
        #[arg(long, default_value = "posts")]
        tab: String,
    },
    /// Validate credentials and run the simulated login
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in through a social provider
    SocialLogin {
        /// google, apple, twitter or github
        provider: String,
    },
    /// Pull to refresh the home feed
    Refresh,
    /// Follow or unfollow a user
    Follow { user_id: String },
    /// Compose a post
    Post {
        content: String,
        #[arg(long)]
        media: Option<String>,
        #[arg(long)]
        reply_to: Option<String>,
        /// Edit an existing post instead of creating one
        #[arg(long)]
        edit: Option<String>,
    },
    /// List an item for sale
    ListItem(ListItemArgs),
    /// Reserve a listing
    Reserve { id: String },
    /// Start bargaining on a listing
    Bargain { id: String },
    /// Open a listing from its card
    ViewItem { id: String },
    /// Message the seller of a listing
    ContactSeller { id: String },
    Like { id: String },
    Dislike { id: String },
    Retweet { id: String },
    Share { id: String },
}

#[derive(Args)]
struct MarketArgs {
    /// Text to look for in title or description
    #[arg(long, default_value = "")]
    search: String,
    /// Category filter, may be repeated
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Condition filter, may be repeated
    #[arg(long = "condition")]
    conditions: Vec<String>,
    #[arg(long, default_value = "")]
    min_price: String,
    #[arg(long, default_value = "")]
    max_price: String,
    /// relevance, recent, price-low or price-high
    #[arg(long, default_value = "relevance")]
    sort: String,
}

#[derive(Args)]
struct ListItemArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    location: String,
    /// Leave out for "make an offer"
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "Electronics")]
    category: String,
    #[arg(long, default_value = "New")]
    condition: String,
    /// Hide the "New" badge
    #[arg(long)]
    used: bool,
    #[arg(long)]
    bargaining: bool,
    #[arg(long)]
    image: Option<String>,
}

impl MarketArgs {
    fn into_screen(self) -> Result<Screen> {
        let mut filters = MarketFilters {
            search: self.search,
            ..MarketFilters::default()
        };
        for category in &self.categories {
            filters.toggle_category(category.parse::<Category>()?);
        }
        for condition in &self.conditions {
            filters.toggle_condition(condition.parse::<Condition>()?);
        }
        filters.set_min_price(&self.min_price);
        filters.set_max_price(&self.max_price);
        let sort = self.sort.parse::<SortMode>()?;
        Ok(Screen::Market { filters, sort })
    }
}

impl ListItemArgs {
    fn into_form(self) -> Result<ListingForm> {
        Ok(ListingForm {
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            category: self.category.parse()?,
            condition: self.condition.parse()?,
            is_new: !self.used,
            allow_bargaining: self.bargaining,
            image: self.image,
        })
    }
}

fn show(store: &AppStore, screen: &Screen, json: bool) -> Result<()> {
    let view = views::render(store, screen)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view);
    }
    Ok(())
}

/// Exit status for rejected form input
const INVALID_INPUT_STATUS: u8 = 2;

/// Print per-field messages for validation failures and map them to an exit
/// status, pass everything else up
fn report(result: AppResult<()>) -> Result<u8> {
    match result {
        Err(AppError::Validation(errors)) => {
            eprintln!("❌ Please fix the following: {}", errors);
            Ok(INVALID_INPUT_STATUS)
        }
        other => {
            other?;
            Ok(0)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("🐦 Chirp Market");

    let backend = Arc::new(MockBackend::new(&config));
    let mut store = AppStore::new(backend, Utc::now(), &config.user_handle);
    store.bootstrap().await;

    // Browsing commands act as the configured demo user
    let demo_login = LoginForm::new("demo@chirp.example", "demo-password");

    let status = match cli.command {
        Commands::Login { email, password } => {
            let form = LoginForm::new(email, password);
            report(store.login(&form).await.map(|handle| info!("✅ Signed in as {}", handle)))?
        }
        Commands::SocialLogin { provider } => {
            let provider = provider.parse::<SocialProvider>()?;
            let handle = store.social_login(provider).await?;
            info!("✅ Signed in as {}", handle);
            0
        }
        Commands::Refresh => {
            store.login(&demo_login).await?;
            store.refresh_feed().await?;
            show(&store, &Screen::Feed, cli.json)?;
            0
        }
        Commands::Follow { user_id } => {
            let name = store.user(&user_id)?.name.clone();
            if store.toggle_follow(&user_id).await? {
                info!("✅ Following {}", name);
            } else {
                info!("Unfollowed {}", name);
            }
            0
        }
        Commands::Post {
            content,
            media,
            reply_to,
            edit,
        } => {
            let mut form = match edit {
                Some(id) => ComposeForm::edit(id, content, media),
                None => ComposeForm {
                    content,
                    media_url: media,
                    reply_to,
                    editing: None,
                },
            };
            if form.is_near_limit() {
                info!("{} characters left", form.remaining_chars());
            }
            report(store.submit_post(&mut form).await)?
        }
        Commands::ListItem(args) => {
            let mut form = args.into_form()?;
            report(store.create_listing(&mut form).await)?
        }
        Commands::Reserve { id } => report(store.reserve(&id).await)?,
        Commands::Bargain { id } => report(store.bargain(&id).await)?,
        Commands::ViewItem { id } => report(store.view_listing(&id).await)?,
        Commands::ContactSeller { id } => report(store.contact_seller(&id).await)?,
        Commands::Like { id } => report(store.react(&id, Reaction::Like).await)?,
        Commands::Dislike { id } => report(store.react(&id, Reaction::Dislike).await)?,
        Commands::Retweet { id } => report(store.react(&id, Reaction::Retweet).await)?,
        Commands::Share { id } => report(store.react(&id, Reaction::Share).await)?,
        browse => {
            store.login(&demo_login).await?;
            let screen = match browse {
                Commands::Feed => Screen::Feed,
                Commands::Tweet { id } => Screen::TweetDetail(id),
                Commands::Market(args) => args.into_screen()?,
                Commands::Search { query, tab } => Screen::Search(SearchState {
                    query,
                    tab: tab.parse::<SearchTab>()?,
                }),
                Commands::Profile { tab } => Screen::Profile(tab.parse::<ProfileTab>()?),
                _ => unreachable!("action commands handled above"),
            };
            show(&store, &screen, cli.json)?;
            0
        }
    };

    Ok(ExitCode::from(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_market::forms::FieldErrors;

    #[test]
    fn test_report_maps_validation_to_exit_code() {
        let mut errors = FieldErrors::default();
        errors.add("title", "Title is required");
        assert_eq!(report(Err(AppError::Validation(errors))).unwrap(), INVALID_INPUT_STATUS);
        assert_eq!(report(Ok(())).unwrap(), 0);
    }

    #[test]
    fn test_report_passes_other_errors_up() {
        let result = report(Err(AppError::NotFound("listing m9".to_string())));
        assert!(result.is_err());
    }
}
