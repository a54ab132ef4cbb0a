//! # Catalog Browsing
//!
//! Filtering and pagination over a catalog snapshot. The cart reads product
//! records; this module only decides which of them the cashier sees.
//!
//! ```text
//! products ──► CatalogFilter::apply ──► paginate(page, per_page) ──► Page<T>
//!                 │
//!                 ├── search term  (name or id, case-insensitive)
//!                 ├── category     (exact)
//!                 ├── price range  (inclusive)
//!                 └── stock        (all / in stock / out of stock)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Filter
// =============================================================================

/// Which stock levels to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl StockFilter {
    pub fn matches(&self, stock: i64) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::InStock => stock > 0,
            StockFilter::OutOfStock => stock <= 0,
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Criteria for narrowing the catalog. The default shows everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilter {
    /// Matched against name and id; empty matches all.
    pub search_term: String,
    /// Exact category; `None` or empty matches all.
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub stock: StockFilter,
}

impl CatalogFilter {
    /// Checks if a product passes every criterion.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::catalog::CatalogFilter;
    /// use wpos_core::money::Money;
    /// use wpos_core::types::Product;
    ///
    /// let filter = CatalogFilter { search_term: "VIT".into(), ..Default::default() };
    /// assert!(filter.matches(&Product::new("P1", "Vitamin C", Money::from_baht(100), 5)));
    /// ```
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if !term.is_empty()
            && !product.name.to_lowercase().contains(&term)
            && !product.id.to_lowercase().contains(&term)
        {
            return false;
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if product.category.as_deref() != Some(category) {
                return false;
            }
        }

        if let Some(range) = &self.price_range {
            if !range.contains(product.price) {
                return false;
            }
        }

        self.stock.matches(product.stock)
    }

    /// Products that pass the filter, in catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|product| self.matches(product)).collect()
    }
}

/// Unique categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in products.iter().filter_map(|p| p.category.as_deref()) {
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Lowest and highest price in the catalog, or `None` when it is empty.
pub fn price_bounds(products: &[Product]) -> Option<PriceRange> {
    let min = products.iter().map(|p| p.price).min()?;
    let max = products.iter().map(|p| p.price).max()?;
    Some(PriceRange::new(min, max))
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually returned.
    #[ts(type = "number")]
    pub page: usize,
    #[ts(type = "number")]
    pub per_page: usize,
    #[ts(type = "number")]
    pub total_items: usize,
    #[ts(type = "number")]
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Cuts `items` into pages of `per_page` and returns page `page` (1-based).
///
/// Out-of-range pages are clamped into `1..=total_pages`.
///
/// ## Example
/// ```rust
/// use wpos_core::catalog::paginate;
///
/// let page = paginate((1..=14).collect(), 3, 6);
/// assert_eq!(page.items, vec![13, 14]);
/// assert_eq!(page.total_pages, 3);
/// assert!(!page.has_next);
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
