//! # Store Handle
//!
//! Bundles the three repositories behind one cloneable handle.
//!
//! ## Usage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::seeded().await  (or Store::in_memory())                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  Store (clone = same data)              │                           │
//! │  │   products() ─► dyn ProductRepository   │                           │
//! │  │   orders()   ─► dyn OrderRepository     │                           │
//! │  │   users()    ─► dyn UserRepository      │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Commands borrow only the repository they need                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::error::StoreResult;
use crate::repository::order::{InMemoryOrderRepository, OrderRepository};
use crate::repository::product::{InMemoryProductRepository, ProductRepository};
use crate::repository::user::{InMemoryUserRepository, UserRepository};
use crate::seed;

/// Main data handle providing repository access.
#[derive(Clone)]
pub struct Store {
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl Store {
    /// Wraps arbitrary repository implementations.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Store {
            products,
            orders,
            users,
        }
    }

    /// Empty in-memory store.
    pub fn in_memory() -> Self {
        Store::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    /// In-memory store loaded with the demo dataset.
    pub async fn seeded() -> StoreResult<Self> {
        let store = Store::in_memory();
        seed::load(&store).await?;
        info!(
            users = store.users.list_all().await?.len(),
            products = store.products.count().await?,
            orders = store.orders.list_all().await?.len(),
            "Store seeded"
        );
        Ok(store)
    }

    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }

    pub fn orders(&self) -> &dyn OrderRepository {
        self.orders.as_ref()
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
