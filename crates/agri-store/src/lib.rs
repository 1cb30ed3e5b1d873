//! # agri-store: Data Access Layer for AgriConnect Hub
//!
//! Repository traits for users, listings and orders, with an in-memory
//! implementation and a seed dataset.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AgriConnect Hub Data Flow                           │
//! │                                                                         │
//! │  agri-hub command (place_order)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    agri-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │    Store      │    │  Repositories  │    │    Seed     │  │   │
//! │  │   │  (store.rs)   │    │ (async traits) │    │  (seed.rs)  │  │   │
//! │  │   │               │    │                │    │             │  │   │
//! │  │   │ products()    │───►│ ProductRepo    │    │ 3 users     │  │   │
//! │  │   │ orders()      │    │ OrderRepo      │    │ 6 listings  │  │   │
//! │  │   │ users()       │    │ UserRepo       │    │ 2 orders    │  │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<..>> tables in process memory                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agri_store::Store;
//!
//! let store = Store::seeded().await?;
//! let catalog = store.products().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::Store;

pub use repository::order::{generate_order_id, InMemoryOrderRepository, OrderRepository};
pub use repository::product::{generate_product_id, InMemoryProductRepository, ProductRepository};
pub use repository::user::{InMemoryUserRepository, UserRepository};
