// Static travel catalog shown on the landing page
// Listings are validated once at construction and never mutate afterwards

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate listing id: {0}")]
    DuplicateId(u32),

    #[error("Listing id must be positive")]
    InvalidId,

    #[error("Rating {rating} of listing {id} is outside 0..=5")]
    RatingOutOfRange { id: u32, rating: f32 },

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Unknown tag: {0}")]
    UnknownTag(String),
}

// Closed set of filter tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Beach,
    Mountain,
    NearMetro,
    Romantic,
    Budget,
}

impl Tag {
    pub const ALL: [Tag; 5] = [
        Tag::Beach,
        Tag::Mountain,
        Tag::NearMetro,
        Tag::Romantic,
        Tag::Budget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Beach => "beach",
            Tag::Mountain => "mountain",
            Tag::NearMetro => "near-metro",
            Tag::Romantic => "romantic",
            Tag::Budget => "budget",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownTag(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub tag: Tag,
    pub metro: String,
    pub price: String, // display only, e.g. "₹7,999 / night"
    pub rating: f32,
    pub city: String,
    pub img: String,
}

/// Read-only collection of listings, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    pub fn new(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if listing.id == 0 {
                return Err(CatalogError::InvalidId);
            }
            if !seen.insert(listing.id) {
                return Err(CatalogError::DuplicateId(listing.id));
            }
            if !(0.0..=5.0).contains(&listing.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: listing.id,
                    rating: listing.rating,
                });
            }
        }

        Ok(Self { listings })
    }

    // Parse a JSON array of listings and validate it
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let listings: Vec<Listing> = serde_json::from_str(json)
            .map_err(|e| CatalogError::JsonParseError(e.to_string()))?;
        Self::new(listings)
    }

    /// The eight weekend packages the page ships with.
    pub fn seeded() -> Self {
        Self {
            listings: seed_listings(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: u32,
    title: &str,
    tag: Tag,
    metro: &str,
    price: &str,
    rating: f32,
    city: &str,
    img: &str,
) -> Listing {
    Listing {
        id,
        title: title.to_string(),
        tag,
        metro: metro.to_string(),
        price: price.to_string(),
        rating,
        city: city.to_string(),
        img: img.to_string(),
    }
}

fn seed_listings() -> Vec<Listing> {
    vec![
        listing(
            1,
            "Goa Oceanfront Villa",
            Tag::Beach,
            "Mumbai",
            "₹7,999 / night",
            4.8,
            "Goa",
            "https://images.unsplash.com/photo-1500375592092-40eb2168fd21?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            2,
            "Gokarna Cliff Cabin",
            Tag::Beach,
            "Bengaluru",
            "₹4,999 / night",
            4.6,
            "Gokarna",
            "https://images.unsplash.com/photo-1505764706515-aa95265c5abc?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            3,
            "Alibaug Courtyard Home",
            Tag::NearMetro,
            "Mumbai",
            "₹5,999 / night",
            4.7,
            "Alibaug",
            "https://images.unsplash.com/photo-1491553895911-0055eca6402d?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            4,
            "Panchgani Lake Resort",
            Tag::Mountain,
            "Pune",
            "₹6,299 / night",
            4.5,
            "Panchgani",
            "https://images.unsplash.com/photo-1526778548025-fa2f459cd5c1?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            5,
            "Mahabalipuram Beach Stay",
            Tag::Beach,
            "Chennai",
            "₹3,999 / night",
            4.4,
            "Mahabalipuram",
            "https://images.unsplash.com/photo-1493558103817-58b2924bce98?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            6,
            "Coorg Coffee Estate Cottage",
            Tag::Mountain,
            "Bengaluru",
            "₹3,799 / night",
            4.6,
            "Coorg",
            "https://images.unsplash.com/photo-1470770841072-f978cf4d019e?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            7,
            "Udaipur Lakeside Haveli",
            Tag::Romantic,
            "Ahmedabad",
            "₹8,999 / night",
            4.9,
            "Udaipur",
            "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?q=80&w=1600&auto=format&fit=crop",
        ),
        listing(
            8,
            "Budget Capsule (Mumbai)",
            Tag::Budget,
            "Mumbai",
            "₹1,499 / night",
            4.1,
            "Mumbai",
            "https://images.unsplash.com/photo-1506377247377-2a5b3b417ebb?q=80&w=1600&auto=format&fit=crop",
        ),
    ]
}
