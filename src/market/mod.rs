//! Marketplace listing pipeline: `sort(filter(listings))`, recomputed from
//! scratch whenever the filter or sort state changes.

pub mod filter;
pub mod sort;
pub mod types;

pub use filter::matches;
pub use sort::{compare, sort_listings};
pub use types::{MarketFilters, SortMode};

use crate::models::Listing;
use tracing::debug;

/// Run the full pipeline over `listings`, returning references in display order
pub fn apply<'a>(listings: &'a [Listing], filters: &MarketFilters, mode: SortMode) -> Vec<&'a Listing> {
    let mut kept: Vec<&Listing> = listings.iter().filter(|l| matches(l, filters)).collect();
    sort_listings(&mut kept, mode);
    debug!(
        "Market pipeline kept {} of {} listings (sort: {})",
        kept.len(),
        listings.len(),
        mode
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition};
    use crate::seed;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn listings_with_prices(prices: &[Option<f64>]) -> Vec<Listing> {
        let now = Utc::now();
        let template = seed::listings(now).remove(0);
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| Listing {
                id: format!("l{}", i),
                price: *price,
                posted_at: now - Duration::minutes(i as i64),
                ..template.clone()
            })
            .collect()
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_price_bounds(price in 0.0f64..1000.0, a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let listings = listings_with_prices(&[Some(price)]);
            let filters = MarketFilters {
                min_price: Some(min),
                max_price: Some(max),
                ..MarketFilters::default()
            };
            let kept = apply(&listings, &filters, SortMode::Relevance);
            prop_assert_eq!(kept.len() == 1, min <= price && price <= max);
        }

        #[test]
        fn prop_inactive_filters_are_identity(prices in prop::collection::vec(prop::option::of(0.0f64..500.0), 0..12)) {
            let listings = listings_with_prices(&prices);
            let kept = apply(&listings, &MarketFilters::default(), SortMode::Relevance);
            let kept_ids: Vec<&str> = kept.iter().map(|l| l.id.as_str()).collect();
            let all_ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
            prop_assert_eq!(kept_ids, all_ids);
        }

        #[test]
        fn prop_price_sorts_are_mirrored(prices in prop::collection::btree_set(0u32..10_000, 0..12)) {
            // distinct prices, shuffled by reversing the set order
            let prices: Vec<Option<f64>> = prices.into_iter().rev().map(|p| Some(p as f64)).collect();
            let listings = listings_with_prices(&prices);
            let filters = MarketFilters::default();

            let low: Vec<&str> = apply(&listings, &filters, SortMode::PriceLow).iter().map(|l| l.id.as_str()).collect();
            let mut high: Vec<&str> = apply(&listings, &filters, SortMode::PriceHigh).iter().map(|l| l.id.as_str()).collect();
            high.reverse();
            prop_assert_eq!(low, high);
        }

        #[test]
        fn prop_double_toggle_restores_selection(initial in prop::collection::btree_set(arb_category(), 0..5), toggled in arb_category()) {
            let mut filters = MarketFilters { categories: initial.clone(), ..MarketFilters::default() };
            filters.toggle_category(toggled);
            filters.toggle_category(toggled);
            prop_assert_eq!(filters.categories, initial);
        }
    }

    #[test]
    fn test_make_an_offer_sorts_as_zero() {
        let listings = listings_with_prices(&[Some(120.0), None, Some(85.0)]);
        let filters = MarketFilters::default();

        let low: Vec<Option<f64>> = apply(&listings, &filters, SortMode::PriceLow).iter().map(|l| l.price).collect();
        assert_eq!(low, vec![None, Some(85.0), Some(120.0)]);

        let high: Vec<Option<f64>> = apply(&listings, &filters, SortMode::PriceHigh).iter().map(|l| l.price).collect();
        assert_eq!(high, vec![Some(120.0), Some(85.0), None]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let listings = seed::listings(Utc::now());
        let mut filters = MarketFilters::default();
        filters.toggle_category(Category::Electronics);
        filters.toggle_condition(Condition::LikeNew);

        let kept = apply(&listings, &filters, SortMode::Relevance);
        assert!(!kept.is_empty());
        assert!(kept
            .iter()
            .all(|l| l.category == Category::Electronics && l.condition == Condition::LikeNew));
    }
}
