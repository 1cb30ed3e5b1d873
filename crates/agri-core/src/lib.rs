//! # agri-core: Pure Business Logic for AgriConnect Hub
//!
//! This crate is the **heart** of AgriConnect Hub. It contains the dynamic
//! pricing engine and every business rule as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AgriConnect Hub Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │   Marketplace ──► Cart ──► Orders ──► Farmer / Admin boards     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    agri-hub commands                            │   │
//! │  │    browse, add_to_cart, get_cart, place_order, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agri-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │ distance  │  │   Money   │  │  status   │  │  listing  │  │   │
//! │  │   │ demand    │  │  (paise)  │  │  machine  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 agri-store (repositories)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Dynamic pricing engine (distance + demand surcharges)
//! - [`money`] - Money type with integer paise (no floating point!)
//! - [`types`] - Domain types (User, Role, Product)
//! - [`order`] - Order snapshot and status machine
//! - [`listing`] - Marketplace filter and product cards
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use agri_core::money::Money;
//! use agri_core::pricing::{format_currency, price_item};
//!
//! // ₹100 per kg, 2 kg, delivered 10 km: 100 × 2 × 1.05
//! let total = price_item(Money::from_rupees(100), 2, 10.0, false).unwrap();
//! assert_eq!(format_currency(total), "₹210.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod listing;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use listing::{listing_card, ListingCard, ListingFilter};
pub use money::{Currency, Money};
pub use order::{Order, OrderItem, OrderStatus};
pub use pricing::{
    demand_factor, distance_factor, format_currency, parse_currency, price_collection, price_item,
    quote_item, DistanceBand, DistanceKm, ExactAmount, Multiplier, PriceQuote, PriceableItem,
    PricingBreakdown, Surcharge,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in a cart.
///
/// ## Business Reason
/// Catches typos such as 1000 instead of 10 before they reach a farmer.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Upper bound for a farmer's listed stock.
pub const MAX_AVAILABLE_QUANTITY: i64 = 1_000_000;
