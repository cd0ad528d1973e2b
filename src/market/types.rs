use crate::error::AppError;
use crate::models::{parse_price, Category, Condition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Filter state of the market screen
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketFilters {
    /// Free-text search over title and description
    pub search: String,
    /// Selected categories (empty = any)
    pub categories: BTreeSet<Category>,
    /// Selected conditions (empty = any)
    pub conditions: BTreeSet<Condition>,
    /// Minimum price
    pub min_price: Option<f64>,
    /// Maximum price
    pub max_price: Option<f64>,
}

impl MarketFilters {
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_condition(&mut self, condition: Condition) {
        if !self.conditions.remove(&condition) {
            self.conditions.insert(condition);
        }
    }

    /// Set the lower bound from raw input; unparseable text clears the bound
    pub fn set_min_price(&mut self, input: &str) {
        self.min_price = parse_price(input);
    }

    /// Set the upper bound from raw input; unparseable text clears the bound
    pub fn set_max_price(&mut self, input: &str) {
        self.max_price = parse_price(input);
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.categories.is_empty()
            || !self.conditions.is_empty()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep store order
    #[default]
    Relevance,
    /// Newest first
    Recent,
    PriceLow,
    PriceHigh,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Recent => "recent",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "recent" => Ok(SortMode::Recent),
            "price-low" => Ok(SortMode::PriceLow),
            "price-high" => Ok(SortMode::PriceHigh),
            other => Err(AppError::InvalidInput(format!("unknown sort mode: {}", other))),
        }
    }
}
