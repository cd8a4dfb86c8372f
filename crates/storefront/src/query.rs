//! Filter composition for the catalog browsing view.
//!
//! A [`FilterState`] combines three independent axes - category, price
//! bucket, and free-text search - with intersection semantics: a product
//! must satisfy all three predicates to appear in the result set.
//!
//! Filter state is round-trippable to a flat query string (`category`,
//! `priceRange`, `search`) so the composed view is shareable as a URL.
//! Parameters at their default value are omitted, and the state is always
//! reconstructible from the query string alone.

use url::form_urlencoded;

use techstore_core::{Price, PriceRange, Product};

use crate::catalog::{ALL_PRODUCTS, Catalog};

/// Named price buckets offered by the filter sidebar.
///
/// Each bucket maps to a concrete closed interval; [`PriceBucket::All`] is
/// the unbounded full range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceBucket {
    /// No price filter.
    #[default]
    All,
    /// `[0, 500]`
    To500,
    /// `[500, 1000]`
    From500To1000,
    /// `[1000, 2000]`
    From1000To2000,
    /// `[2000, +inf)`
    Over2000,
}

impl PriceBucket {
    /// Every bucket, in sidebar display order.
    pub const ALL_BUCKETS: [Self; 5] = [
        Self::All,
        Self::To500,
        Self::From500To1000,
        Self::From1000To2000,
        Self::Over2000,
    ];

    /// The stable key used in the shareable query string.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::To500 => "0-500",
            Self::From500To1000 => "500-1000",
            Self::From1000To2000 => "1000-2000",
            Self::Over2000 => "2000+",
        }
    }

    /// Human-readable label for the bucket.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Prices",
            Self::To500 => "Under $500",
            Self::From500To1000 => "$500 - $1000",
            Self::From1000To2000 => "$1000 - $2000",
            Self::Over2000 => "Over $2000",
        }
    }

    /// Resolve a bucket key. Unrecognized keys fall back to [`Self::All`]
    /// (the unbounded range), never an error.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "all" => Self::All,
            "0-500" => Self::To500,
            "500-1000" => Self::From500To1000,
            "1000-2000" => Self::From1000To2000,
            "2000+" => Self::Over2000,
            other => {
                tracing::debug!(key = other, "Unknown price bucket key, using full range");
                Self::All
            }
        }
    }

    /// The concrete interval this bucket filters by.
    #[must_use]
    pub fn range(self) -> PriceRange {
        match self {
            Self::All => PriceRange::unbounded(),
            Self::To500 => PriceRange::new(Price::ZERO, Price::from_major_units(500)),
            Self::From500To1000 => {
                PriceRange::new(Price::from_major_units(500), Price::from_major_units(1000))
            }
            Self::From1000To2000 => {
                PriceRange::new(Price::from_major_units(1000), Price::from_major_units(2000))
            }
            Self::Over2000 => PriceRange {
                min: Price::from_major_units(2000),
                max: None,
            },
        }
    }
}

/// The three filter axes of the catalog browsing view.
///
/// Changing one axis never touches the other two; recomposing the result
/// set and re-serializing the query string always reflect all three current
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Category filter; [`ALL_PRODUCTS`] means no filter.
    pub category: String,
    /// Price bucket filter.
    pub bucket: PriceBucket,
    /// Free-text search; empty means no filter.
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_PRODUCTS.to_string(),
            bucket: PriceBucket::All,
            search: String::new(),
        }
    }
}

impl FilterState {
    /// Replace the category axis, preserving price bucket and search.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Replace the price bucket axis, preserving category and search.
    #[must_use]
    pub const fn with_bucket(mut self, bucket: PriceBucket) -> Self {
        self.bucket = bucket;
        self
    }

    /// Replace the search axis, preserving category and price bucket.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether every axis is at its default (result set == full catalog).
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Apply all three filters to the catalog with intersection semantics.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let range = self.bucket.range();
        let category_active = !self.category.is_empty() && self.category != ALL_PRODUCTS;
        let needle = self.search.to_lowercase();

        catalog
            .all()
            .iter()
            .filter(|product| !category_active || product.category == self.category)
            .filter(|product| range.contains(product.price))
            .filter(|product| {
                needle.is_empty()
                    || product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Serialize to the shareable query string.
    ///
    /// Axes at their default value are omitted, so the default state
    /// serializes to the empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.category.is_empty() && self.category != ALL_PRODUCTS {
            serializer.append_pair("category", &self.category);
        }
        if self.bucket != PriceBucket::All {
            serializer.append_pair("priceRange", self.bucket.key());
        }
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.finish()
    }

    /// Reconstruct filter state from a query string.
    ///
    /// Missing parameters take their defaults; unknown parameters and
    /// unknown bucket keys are ignored. This never fails.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" => state.category = value.into_owned(),
                "priceRange" => state.bucket = PriceBucket::from_key(&value),
                "search" => state.search = value.into_owned(),
                _ => {}
            }
        }
        state
    }
}
