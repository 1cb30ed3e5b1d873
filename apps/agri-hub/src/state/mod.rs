//! # State Module
//!
//! Application state for AgriConnect Hub commands.
//!
//! Separate state types instead of one `AppState`: each command declares
//! exactly the state it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Store       │  │  Arc<Mutex<  │  │  marketplace     │              │
//! │  │  (RwLock'd   │  │    Cart      │  │  distance bounds │              │
//! │  │   tables)    │  │  >>          │  │  seed flag       │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: each repository locks its own table                     │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod store;

pub use cart::{Cart, CartItem, CartState};
pub use config::{ConfigError, ConfigState};
pub use store::StoreState;
