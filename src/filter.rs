// Category + free-text filtering over the catalog

use crate::catalog::{Catalog, CatalogError, Listing, Tag};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Tag(Tag),
}

impl Category {
    // Chip bar order on the search panel
    pub fn chips() -> Vec<Category> {
        std::iter::once(Category::All)
            .chain(Tag::ALL.into_iter().map(Category::Tag))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Tag(tag) => tag.as_str(),
        }
    }

    // "near-metro" -> "Near metro"
    pub fn label(&self) -> String {
        let raw = self.as_str().replacen('-', " ", 1);
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Category::All => true,
            Category::Tag(tag) => listing.tag == *tag,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Category::All);
        }
        s.parse().map(Category::Tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub category: Category,
    pub query: String,
}

impl FilterCriteria {
    pub fn new(category: Category, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.category.matches(listing) && query_matches(&self.query, listing)
    }
}

// The query is not trimmed; an empty query matches everything.
fn query_matches(query: &str, listing: &Listing) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [&listing.title, &listing.city, &listing.metro]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Listings that pass `criteria`, in catalog order.
pub fn visible<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Listing> {
    catalog
        .listings()
        .iter()
        .filter(|listing| criteria.matches(listing))
        .collect()
}
