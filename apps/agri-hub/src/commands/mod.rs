//! # Hub Commands Module
//!
//! Every operation a farmer, buyer or admin can perform.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (role checks)
//! ├── marketplace.rs  ◄─── Browse, filter, per-distance listing cards
//! ├── cart.rs         ◄─── Cart manipulation and live pricing
//! ├── order.rs        ◄─── Placement, farmer response, payment flag
//! ├── product.rs      ◄─── Farmer listings
//! └── dashboard.rs    ◄─── Farmer and admin statistics
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  place_order(store, cart, config, user, distance_km)                   │
//! │         │                                                               │
//! │         ├── authorize(user, PlaceOrder) ──── FORBIDDEN ──────────┐     │
//! │         │                                                         │     │
//! │         ├── resolve distance, price cart ── VALIDATION_ERROR ────┤     │
//! │         │                                                         ▼     │
//! │         ├── reserve stock, insert order ─────────────────────► ApiError │
//! │         │                                                               │
//! │         └── Ok(OrderResponse) ──► serde_json                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! async fn list_listings(store: &StoreState, user: &User)
//!
//! // Only needs the cart
//! async fn remove_from_cart(cart: &CartState, config: &ConfigState, user: &User, ...)
//!
//! // Needs both
//! async fn add_to_cart(store: &StoreState, cart: &CartState, ...)
//! ```

pub mod cart;
pub mod dashboard;
pub mod marketplace;
pub mod order;
pub mod product;

use agri_core::{Capability, User};
use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Fails with `FORBIDDEN` unless the user's role grants `capability`.
pub(crate) fn authorize(user: &User, capability: Capability) -> ApiResult<()> {
    if user.can(capability) {
        return Ok(());
    }
    warn!(user = %user.id, role = %user.role, %capability, "Permission denied");
    Err(ApiError::forbidden(format!(
        "{} cannot {}",
        user.role, capability
    )))
}

#[cfg(test)]
pub(crate) mod support {
    use agri_core::User;
    use agri_store::seed::{ADMIN_ID, BUYER_ID, FARMER_ID};
    use agri_store::Store;

    use crate::state::{CartState, ConfigState, StoreState};

    /// Seeded store, empty cart, default config.
    pub struct Fixture {
        pub store: StoreState,
        pub cart: CartState,
        pub config: ConfigState,
    }

    impl Fixture {
        pub async fn seeded() -> Self {
            Fixture {
                store: StoreState::new(Store::seeded().await.unwrap()),
                cart: CartState::new(),
                config: ConfigState::default(),
            }
        }

        pub async fn user(&self, id: &str) -> User {
            self.store.users().get_by_id(id).await.unwrap().unwrap()
        }

        pub async fn farmer(&self) -> User {
            self.user(FARMER_ID).await
        }

        pub async fn buyer(&self) -> User {
            self.user(BUYER_ID).await
        }

        pub async fn admin(&self) -> User {
            self.user(ADMIN_ID).await
        }
    }
}
