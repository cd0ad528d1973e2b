use chirp_market::market::{MarketFilters, SortMode};
use chirp_market::models::{Category, Condition};
use chirp_market::views::{self, Screen, View};
use chirp_market::{AppStore, Config, MockBackend};
use chirp_market::forms::LoginForm;
use chrono::Utc;
use std::sync::Arc;

async fn store() -> AppStore {
    let config = Config::instant();
    let mut store = AppStore::new(Arc::new(MockBackend::new(&config)), Utc::now(), &config.user_handle);
    store.bootstrap().await;
    store
        .login(&LoginForm::new("jane@example.com", "secret123"))
        .await
        .expect("valid credentials");
    store
}

fn ids(store: &AppStore, filters: &MarketFilters, sort: SortMode) -> Vec<String> {
    store
        .market(filters, sort)
        .into_iter()
        .map(|l| l.id.clone())
        .collect()
}

#[tokio::test]
async fn test_unfiltered_market_keeps_seed_order() {
    let store = store().await;
    assert_eq!(
        ids(&store, &MarketFilters::default(), SortMode::Relevance),
        vec!["m1", "m2", "m3", "m4", "m5"]
    );
}

#[tokio::test]
async fn test_recent_sort_is_chronological() {
    let store = store().await;
    // posted 2h, 5h, 1d, 3d, 30m ago
    assert_eq!(
        ids(&store, &MarketFilters::default(), SortMode::Recent),
        vec!["m5", "m1", "m2", "m3", "m4"]
    );
}

#[tokio::test]
async fn test_price_sorts_treat_offer_listing_as_zero() {
    let store = store().await;
    let filters = MarketFilters::default();
    assert_eq!(
        ids(&store, &filters, SortMode::PriceLow),
        vec!["m5", "m4", "m3", "m2", "m1"]
    );
    assert_eq!(
        ids(&store, &filters, SortMode::PriceHigh),
        vec!["m1", "m2", "m3", "m4", "m5"]
    );
}

#[tokio::test]
async fn test_price_range_keeps_offer_listings() {
    let store = store().await;
    let mut filters = MarketFilters::default();
    filters.set_min_price("40");
    filters.set_max_price("$100");
    assert_eq!(ids(&store, &filters, SortMode::PriceLow), vec!["m5", "m3", "m2"]);
}

#[tokio::test]
async fn test_combined_filters_render_market_view() {
    let store = store().await;
    let mut filters = MarketFilters {
        search: "vintage".to_string(),
        ..MarketFilters::default()
    };
    filters.toggle_category(Category::Collectibles);
    filters.toggle_condition(Condition::Fair);

    let view = views::render(
        &store,
        &Screen::Market {
            filters,
            sort: SortMode::Recent,
        },
    )
    .unwrap();
    let View::Market {
        listings,
        filters_active,
        ..
    } = view
    else {
        panic!("expected market view");
    };
    assert!(filters_active);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Vintage Vinyl Records");
    assert_eq!(listings[0].price, "$25");
    assert_eq!(listings[0].time_ago, "3d");
}

#[tokio::test]
async fn test_reserved_badge_renders() {
    let store = store().await;
    let mut filters = MarketFilters::default();
    filters.toggle_category(Category::HomeAndGarden);
    let View::Market { listings, .. } = views::render(
        &store,
        &Screen::Market {
            filters,
            sort: SortMode::Relevance,
        },
    )
    .unwrap() else {
        panic!("expected market view");
    };
    assert_eq!(listings[0].reserved.as_deref(), Some("Reserved until Friday"));
    assert!(listings[0].new_badge);

    let json = serde_json::to_value(&listings[0]).unwrap();
    assert_eq!(json["category"], "Home & Garden");
}
