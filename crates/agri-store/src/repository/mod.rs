//! # Repository Module
//!
//! Data access traits and their in-memory implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  agri-hub command                                                      │
//! │       │                                                                 │
//! │       │  store.products().list_active()                                │
//! │       ▼                                                                 │
//! │  dyn ProductRepository  ◄── trait object, swappable                    │
//! │  ├── list_active / list_by_farmer                                      │
//! │  ├── get_by_id / insert / update                                       │
//! │  └── set_active / adjust_stock                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemoryProductRepository (Arc<RwLock<..>>)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Listings and stock
//! - [`OrderRepository`](order::OrderRepository) - Orders, status, payment
//! - [`UserRepository`](user::UserRepository) - Farmers, buyers, admins

pub mod order;
pub mod product;
pub mod user;
