use crate::market::types::MarketFilters;
use crate::models::Listing;

/// Keep/drop decision for one listing. All active filters must pass.
pub fn matches(listing: &Listing, filters: &MarketFilters) -> bool {
    matches_search(listing, &filters.search)
        && (filters.categories.is_empty() || filters.categories.contains(&listing.category))
        && (filters.conditions.is_empty() || filters.conditions.contains(&listing.condition))
        && within_price(listing, filters.min_price, filters.max_price)
}

fn matches_search(listing: &Listing, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    listing.title.to_lowercase().contains(&needle)
        || listing.description.to_lowercase().contains(&needle)
}

/// Unpriced listings pass any bound
fn within_price(listing: &Listing, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(price) = listing.price else {
        return true;
    };
    if matches!(min, Some(min) if price < min) {
        return false;
    }
    if matches!(max, Some(max) if price > max) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition};
    use crate::seed;
    use chrono::Utc;

    fn listing(price: Option<f64>) -> Listing {
        let mut listing = seed::listings(Utc::now()).remove(0);
        listing.price = price;
        listing
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let item = listing(Some(120.0));
        let mut filters = MarketFilters::default();

        filters.search = "VINTAGE".to_string();
        assert!(matches(&item, &filters));

        filters.search = "collectors".to_string();
        assert!(matches(&item, &filters));

        filters.search = "keyboard".to_string();
        assert!(!matches(&item, &filters));
    }

    #[test]
    fn test_category_and_condition_sets() {
        let item = listing(Some(120.0));
        let mut filters = MarketFilters::default();

        filters.toggle_category(Category::Books);
        assert!(!matches(&item, &filters));
        filters.toggle_category(item.category);
        assert!(matches(&item, &filters));

        filters.toggle_condition(Condition::Poor);
        assert_ne!(item.condition, Condition::Poor);
        assert!(!matches(&item, &filters));
    }

    #[test]
    fn test_price_bounds_skip_unpriced_listings() {
        let mut filters = MarketFilters::default();
        filters.min_price = Some(100.0);
        filters.max_price = Some(110.0);

        assert!(matches(&listing(None), &filters));
        assert!(!matches(&listing(Some(120.0)), &filters));
        assert!(!matches(&listing(Some(99.0)), &filters));
        assert!(matches(&listing(Some(100.0)), &filters));
        assert!(matches(&listing(Some(110.0)), &filters));
    }

    #[test]
    fn test_malformed_bound_means_no_bound() {
        let mut filters = MarketFilters::default();
        filters.set_min_price("abc");
        filters.set_max_price("");
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, None);
        assert!(matches(&listing(Some(5.0)), &filters));
    }
}
