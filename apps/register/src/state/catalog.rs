//! # Catalog State
//!
//! Holds the latest product snapshot read from the catalog file.
//!
//! ## Snapshot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load_from_path() ──► parse + validate ──► replace(Arc<Vec<Product>>)  │
//! │       (async)                                      │                    │
//! │                                                    ▼                    │
//! │  cart command ──► snapshot() ──► find(id) ──► price/stock read NOW     │
//! │                                                                         │
//! │  A reload swaps the whole Arc; commands already holding the old        │
//! │  snapshot finish with it. The cart never writes back.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```json
//! { "productList": [
//!   { "no": 1, "productId": "BW-001", "productName": "Vitamin C 1000mg",
//!     "category": "Supplements", "price": 350, "imageUrl": "/img/1.png",
//!     "stock": 12 }
//! ] }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use tracing::{error, info};
use wpos_core::validation::{parse_hundredths, validate_product};
use wpos_core::{CoreError, Money, Product};

use crate::error::CatalogError;

// =============================================================================
// File Records
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    product_list: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    product_id: String,
    product_name: String,
    #[serde(default)]
    category: Option<String>,
    /// Baht as a JSON number, e.g. `350` or `450.5`
    price: serde_json::Number,
    #[serde(default)]
    image_url: Option<String>,
    stock: i64,
    #[serde(default)]
    description: Option<String>,
}

impl ProductRecord {
    fn into_product(self) -> Result<Product, CoreError> {
        let invalid = |id: &str, source| CoreError::InvalidProduct {
            id: id.to_string(),
            source,
        };

        // Decimal text avoids a round trip through f64
        let satang = parse_hundredths("price", &self.price.to_string())
            .map_err(|e| invalid(&self.product_id, e))?;

        let product = Product {
            id: self.product_id,
            name: self.product_name,
            price: Money::from_satang(satang),
            stock: self.stock,
            image: self.image_url.filter(|url| !url.is_empty()),
            category: self.category.filter(|c| !c.is_empty()),
            description: self.description,
        };

        validate_product(&product).map_err(|e| invalid(&product.id, e))?;
        Ok(product)
    }
}

/// Parses and validates a catalog document.
///
/// ## Errors
/// - [`CatalogError::Parse`] for malformed JSON or a missing field
/// - [`CatalogError::InvalidRecord`] for a negative price or stock, or an
///   empty id or name
/// - [`CatalogError::DuplicateId`] when two records share a product id
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(file.product_list.len());
    for (index, record) in file.product_list.into_iter().enumerate() {
        let product = record
            .into_product()
            .map_err(|source| CatalogError::InvalidRecord { index, source })?;
        if !seen.insert(product.id.clone()) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        products.push(product);
    }
    Ok(products)
}

// =============================================================================
// Catalog State
// =============================================================================

/// Shared catalog snapshot.
#[derive(Debug, Default)]
pub struct CatalogState {
    products: RwLock<Arc<Vec<Product>>>,
}

impl CatalogState {
    pub fn new(products: Vec<Product>) -> Self {
        CatalogState {
            products: RwLock::new(Arc::new(products)),
        }
    }

    /// The current snapshot; cheap to clone and safe to hold across a reload.
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        let products = self.products.read().expect("Catalog lock poisoned");
        Arc::clone(&products)
    }

    /// Swaps in a new snapshot.
    pub fn replace(&self, products: Vec<Product>) {
        let mut current = self.products.write().expect("Catalog lock poisoned");
        *current = Arc::new(products);
    }

    /// Looks up a product by id in the current snapshot.
    pub fn find(&self, id: &str) -> Result<Product, CoreError> {
        self.snapshot()
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Reads the catalog file and replaces the snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    ///
    /// ## Returns
    /// Number of products loaded
    pub async fn load_from_path(&self, path: &Path) -> Result<usize, CatalogError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|source| {
            error!(path = %path.display(), error = %source, "Catalog file unreadable");
            CatalogError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let products = parse_catalog(&json).map_err(|e| {
            error!(path = %path.display(), error = %e, "Catalog rejected");
            e
        })?;

        let count = products.len();
        self.replace(products);
        info!(path = %path.display(), count, "Catalog loaded");
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    const CATALOG: &str = r#"{
        "productList": [
            { "no": 1, "productId": "BW-001", "productName": "Vitamin C 1000mg",
              "category": "Supplements", "price": 350, "imageUrl": "/img/1.png", "stock": 12 },
            { "no": 2, "productId": "BW-002", "productName": "Sunscreen SPF50",
              "category": "Skincare", "price": 450.5, "imageUrl": "", "stock": 0 }
        ]
    }"#;

    fn temp_catalog(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wpos-catalog-{}.json", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_catalog() {
        let products = parse_catalog(CATALOG).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "BW-001");
        assert_eq!(products[0].price, Money::from_baht(350));
        assert_eq!(products[0].image.as_deref(), Some("/img/1.png"));
        assert_eq!(products[1].price, Money::from_satang(45_050));
        assert_eq!(products[1].image, None);
        assert_eq!(products[1].category.as_deref(), Some("Skincare"));
    }

    #[test]
    fn test_parse_rejects_bad_records() {
        let negative_stock = r#"{ "productList": [
            { "productId": "X", "productName": "X", "price": 1, "stock": -1 } ] }"#;
        assert!(matches!(
            parse_catalog(negative_stock),
            Err(CatalogError::InvalidRecord { index: 0, .. })
        ));

        let negative_price = r#"{ "productList": [
            { "productId": "X", "productName": "X", "price": -1, "stock": 1 } ] }"#;
        assert!(matches!(
            parse_catalog(negative_price),
            Err(CatalogError::InvalidRecord { .. })
        ));

        let duplicate = r#"{ "productList": [
            { "productId": "X", "productName": "X", "price": 1, "stock": 1 },
            { "productId": "X", "productName": "Y", "price": 2, "stock": 1 } ] }"#;
        assert!(matches!(parse_catalog(duplicate), Err(CatalogError::DuplicateId(id)) if id == "X"));

        assert!(matches!(parse_catalog("{}"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_find() {
        let catalog = CatalogState::new(parse_catalog(CATALOG).unwrap());
        assert_eq!(catalog.find("BW-002").unwrap().stock, 0);
        assert!(matches!(
            catalog.find("BW-404"),
            Err(CoreError::ProductNotFound(id)) if id == "BW-404"
        ));
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let catalog = CatalogState::new(parse_catalog(CATALOG).unwrap());
        let before = catalog.snapshot();

        catalog.replace(Vec::new());

        assert_eq!(before.len(), 2);
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let path = temp_catalog(CATALOG);
        let catalog = CatalogState::default();

        let count = catalog.load_from_path(&path).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(catalog.len(), 2);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let catalog = CatalogState::new(parse_catalog(CATALOG).unwrap());

        let missing = std::env::temp_dir().join(format!("wpos-missing-{}.json", Uuid::new_v4()));
        assert!(matches!(
            catalog.load_from_path(&missing).await,
            Err(CatalogError::Io { .. })
        ));

        let broken = temp_catalog("not json");
        assert!(matches!(
            catalog.load_from_path(&broken).await,
            Err(CatalogError::Parse(_))
        ));
        assert_eq!(catalog.len(), 2);
        std::fs::remove_file(broken).ok();
    }
}
