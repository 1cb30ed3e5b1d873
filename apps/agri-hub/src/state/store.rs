//! # Store State
//!
//! Wraps the `Store` handle for use in hub commands.
//!
//! ## Thread Safety
//! Each repository inside `Store` guards its own table with a
//! `tokio::sync::RwLock`, so commands can read concurrently without an
//! outer lock.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_listings(store: &StoreState, user: &User) -> ApiResult<Vec<Product>> {
//!     let products = store.inner().products().list_by_farmer(&user.id).await?;
//!     Ok(products)
//! }
//! ```

use std::ops::Deref;

use agri_store::Store;

/// Wrapper around `Store` for command state.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Store,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState { store }
    }

    /// Returns a reference to the inner Store.
    pub fn inner(&self) -> &Store {
        &self.store
    }
}

impl Deref for StoreState {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.store
    }
}
