use crate::market::types::SortMode;
use crate::models::Listing;
use std::cmp::Ordering;

/// Comparator for a sort mode. `Relevance` treats everything as equal, so a
/// stable sort leaves the input untouched.
pub fn compare(a: &Listing, b: &Listing, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Relevance => Ordering::Equal,
        SortMode::Recent => b.posted_at.cmp(&a.posted_at),
        SortMode::PriceLow => a.sort_price().total_cmp(&b.sort_price()),
        SortMode::PriceHigh => b.sort_price().total_cmp(&a.sort_price()),
    }
}

/// Stable in-place sort; ties keep their original order
pub fn sort_listings(listings: &mut [&Listing], mode: SortMode) {
    if mode == SortMode::Relevance {
        return;
    }
    listings.sort_by(|a, b| compare(a, b, mode));
}
