//! # Catalog Commands
//!
//! Browsing the product catalog and reloading it from disk.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('search_catalog', { filter, page })                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate search term ──► filter snapshot ──► annotate with cart stock │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  paginate(page, items_per_page)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { page, categories, priceBounds }                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};
use wpos_core::catalog::{categories, paginate, price_bounds};
use wpos_core::validation::validate_search_query;
use wpos_core::{CatalogFilter, Page, PriceRange, Product};

use crate::error::ApiError;
use crate::state::{CartSession, CatalogState, ConfigState};

/// A catalog card: the product plus what the cart leaves of its stock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub product: Product,
    /// Regular plus back-order units already in the cart
    pub in_cart: i64,
    pub available_stock: i64,
    pub can_add: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub page: Page<CatalogEntry>,
    /// Every category in the catalog, for the filter dropdown
    pub categories: Vec<String>,
    /// Cheapest and dearest product, for the price slider
    pub price_bounds: Option<PriceRange>,
}

/// Filters and pages the catalog.
///
/// ## Arguments
/// * `filter` - Search term, category, price range and stock filter
/// * `page` - 1-based page (default: 1, clamped to the last page)
pub fn search_catalog(
    catalog: &CatalogState,
    cart: &CartSession,
    config: &ConfigState,
    mut filter: CatalogFilter,
    page: Option<usize>,
) -> Result<CatalogResponse, ApiError> {
    let start = Instant::now();
    filter.search_term = validate_search_query(&filter.search_term)?;
    debug!(search_term = %filter.search_term, ?page, "search_catalog command");

    let products = catalog.snapshot();
    let entries: Vec<CatalogEntry> = cart.with_cart(|state| {
        filter
            .apply(&products)
            .into_iter()
            .map(|product| CatalogEntry {
                in_cart: state.total_across_pools(&product.id),
                available_stock: state.available_stock(&product.id, product.stock),
                can_add: state.can_add(&product.id, product.stock),
                product: product.clone(),
            })
            .collect()
    });

    let page = paginate(entries, page.unwrap_or(1), config.items_per_page);
    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        matches = page.total_items,
        page = page.page,
        "search_catalog complete"
    );

    Ok(CatalogResponse {
        page,
        categories: categories(&products),
        price_bounds: price_bounds(&products),
    })
}

/// Re-reads the catalog file named in the configuration.
///
/// ## Returns
/// Number of products now in the catalog
pub async fn reload_catalog(
    catalog: &CatalogState,
    config: &ConfigState,
) -> Result<usize, ApiError> {
    debug!(path = %config.catalog_path.display(), "reload_catalog command");
    Ok(catalog.load_from_path(&config.catalog_path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use wpos_core::{CartCommand, Money, StockFilter};

    fn catalog() -> CatalogState {
        CatalogState::new(
            (1..=8)
                .map(|n| {
                    Product::new(format!("BW-{n:03}"), format!("Item {n}"), Money::from_baht(n * 10), n - 1)
                        .with_category(if n % 2 == 0 { "Even" } else { "Odd" })
                })
                .collect(),
        )
    }

    #[test]
    fn test_first_page_defaults() {
        let response = search_catalog(
            &catalog(),
            &CartSession::new(),
            &ConfigState::default(),
            CatalogFilter::default(),
            None,
        )
        .unwrap();

        assert_eq!(response.page.items.len(), 6);
        assert_eq!(response.page.total_pages, 2);
        assert_eq!(response.categories, vec!["Odd", "Even"]);
        assert_eq!(
            response.price_bounds,
            Some(PriceRange::new(Money::from_baht(10), Money::from_baht(80)))
        );
    }

    #[test]
    fn test_entries_reflect_cart() {
        let catalog = catalog();
        let cart = CartSession::new();
        let product = catalog.find("BW-003").unwrap();
        cart.dispatch(CartCommand::AddItem { product: product.clone() }, |_, _| ());
        cart.dispatch(CartCommand::AddItem { product }, |_, _| ());

        let filter = CatalogFilter {
            search_term: "bw-003".to_string(),
            ..Default::default()
        };
        let response =
            search_catalog(&catalog, &cart, &ConfigState::default(), filter, Some(1)).unwrap();

        let entry = &response.page.items[0];
        assert_eq!(entry.in_cart, 2);
        assert_eq!(entry.available_stock, 0);
        assert!(!entry.can_add);
    }

    #[test]
    fn test_filter_and_page_size() {
        let config = ConfigState {
            items_per_page: 2,
            ..ConfigState::default()
        };
        let filter = CatalogFilter {
            stock: StockFilter::InStock,
            category: Some("Odd".to_string()),
            ..Default::default()
        };

        let response =
            search_catalog(&catalog(), &CartSession::new(), &config, filter, Some(5)).unwrap();

        // BW-003, BW-005, BW-007 are odd and in stock
        assert_eq!(response.page.total_items, 3);
        assert_eq!(response.page.page, 2);
        assert_eq!(response.page.items.len(), 1);
    }

    #[test]
    fn test_overlong_search_is_rejected() {
        let filter = CatalogFilter {
            search_term: "x".repeat(101),
            ..Default::default()
        };
        let err = search_catalog(
            &catalog(),
            &CartSession::new(),
            &ConfigState::default(),
            filter,
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
