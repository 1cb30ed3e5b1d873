//! # Product Repository
//!
//! Storage for farmer listings.
//!
//! ## Key Operations
//! - Catalog reads (active listings, a farmer's own listings)
//! - CRUD with soft delete (`set_active(false)`)
//! - Stock adjustments on order placement
//!
//! ## Stock Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(Tomatoes × 3)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  adjust_stock(id, -3)                                                  │
//! │       │                                                                 │
//! │       ├── 50 - 3 = 47 ≥ 0 → stored, product returned                   │
//! │       └── 2 - 3 < 0       → InsufficientStock, nothing changes         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use agri_core::{CoreError, Product, ProductUpdate};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Listing storage.
///
/// ## Usage
/// ```rust,ignore
/// let active = store.products().list_active().await?;
/// let mine = store.products().list_by_farmer(&farmer.id).await?;
/// ```
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every listing, active or not, in insertion order.
    async fn list_all(&self) -> StoreResult<Vec<Product>>;

    /// Listings visible in the marketplace, in insertion order.
    async fn list_active(&self) -> StoreResult<Vec<Product>>;

    async fn list_by_farmer(&self, farmer_id: &str) -> StoreResult<Vec<Product>>;

    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Stores a new listing. Fails with `Duplicate` if the id is taken.
    async fn insert(&self, product: &Product) -> StoreResult<Product>;

    /// Applies a partial edit and returns the updated listing.
    async fn update(&self, id: &str, update: &ProductUpdate) -> StoreResult<Product>;

    /// Soft delete / restore.
    async fn set_active(&self, id: &str, active: bool) -> StoreResult<()>;

    /// Adds `delta` (negative to take stock) to the available quantity.
    ///
    /// ## Errors
    /// - `NotFound` if the id is unknown
    /// - `Core(InsufficientStock)` if stock would go below zero
    async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<Product>;

    async fn count(&self) -> StoreResult<usize>;
}

#[derive(Debug, Default)]
struct ProductTable {
    rows: HashMap<String, Product>,
    /// Insertion order, so listings come back the way they were created.
    order: Vec<String>,
}

impl ProductTable {
    fn ordered(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    fn get_mut(&mut self, id: &str) -> StoreResult<&mut Product> {
        self.rows
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }
}

/// [`ProductRepository`] backed by process memory.
///
/// Cloning is cheap and clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> StoreResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.ordered().cloned().collect())
    }

    async fn list_active(&self) -> StoreResult<Vec<Product>> {
        let table = self.table.read().await;
        let products: Vec<Product> = table.ordered().filter(|p| p.is_active).cloned().collect();
        debug!(count = products.len(), "Listed active products");
        Ok(products)
    }

    async fn list_by_farmer(&self, farmer_id: &str) -> StoreResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table
            .ordered()
            .filter(|p| p.farmer_id == farmer_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    async fn insert(&self, product: &Product) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        if table.rows.contains_key(&product.id) {
            return Err(StoreError::duplicate("product id", &product.id));
        }

        debug!(id = %product.id, name = %product.name, "Inserting product");
        table.order.push(product.id.clone());
        table.rows.insert(product.id.clone(), product.clone());
        Ok(product.clone())
    }

    async fn update(&self, id: &str, update: &ProductUpdate) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        let product = table.get_mut(id)?;
        update.apply_to(product, Utc::now());
        debug!(id = %id, "Product updated");
        Ok(product.clone())
    }

    async fn set_active(&self, id: &str, active: bool) -> StoreResult<()> {
        let mut table = self.table.write().await;
        let product = table.get_mut(id)?;
        product.is_active = active;
        product.updated_at = Utc::now();
        debug!(id = %id, active, "Product visibility changed");
        Ok(())
    }

    async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        let product = table.get_mut(id)?;

        let next = product.available_quantity.checked_add(delta).filter(|q| *q >= 0);
        let Some(next) = next else {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.available_quantity,
                requested: delta.saturating_neg(),
            }
            .into());
        };

        debug!(id = %id, from = product.available_quantity, to = next, "Stock adjusted");
        product.available_quantity = next;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.table.read().await.rows.len())
    }
}

/// Generates a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::{Money, Unit};

    fn product(id: &str, farmer: &str, qty: i64) -> Product {
        Product {
            id: id.to_string(),
            farmer_id: farmer.to_string(),
            farmer_name: "Ravi".to_string(),
            name: format!("Produce {id}"),
            description: String::new(),
            category: "Vegetables".to_string(),
            price_per_unit: Money::from_rupees(40),
            available_quantity: qty,
            unit: Unit::Kg,
            location_text: "Nashik".to_string(),
            lat: None,
            lng: None,
            is_high_demand: false,
            is_active: true,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn repo() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        repo.insert(&product("p-1", "f-1", 10)).await.unwrap();
        repo.insert(&product("p-2", "f-2", 5)).await.unwrap();
        repo.insert(&product("p-3", "f-1", 0)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.get_by_id("p-2").await.unwrap().unwrap().farmer_id, "f-2");
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = repo().await;
        let err = repo.insert(&product("p-1", "f-9", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_lists_preserve_insertion_order() {
        let repo = repo().await;
        let ids: Vec<String> = repo
            .list_by_farmer("f-1")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p-1", "p-3"]);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_catalog() {
        let repo = repo().await;
        repo.set_active("p-1", false).await.unwrap();

        let active = repo.list_active().await.unwrap();
        assert!(active.iter().all(|p| p.id != "p-1"));
        assert_eq!(repo.list_all().await.unwrap().len(), 3);

        assert!(matches!(
            repo.set_active("missing", false).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_applies_partial_edit() {
        let repo = repo().await;
        let update = ProductUpdate {
            price_per_unit: Some(Money::from_rupees(55)),
            ..Default::default()
        };
        let updated = repo.update("p-2", &update).await.unwrap();
        assert_eq!(updated.price_per_unit, Money::from_rupees(55));
        assert_eq!(updated.available_quantity, 5);
    }

    #[tokio::test]
    async fn test_adjust_stock() {
        let repo = repo().await;
        assert_eq!(repo.adjust_stock("p-1", -4).await.unwrap().available_quantity, 6);
        assert_eq!(repo.adjust_stock("p-1", 10).await.unwrap().available_quantity, 16);

        let err = repo.adjust_stock("p-2", -6).await.unwrap_err();
        match err {
            StoreError::Core(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            repo.get_by_id("p-2").await.unwrap().unwrap().available_quantity,
            5
        );
    }
}
