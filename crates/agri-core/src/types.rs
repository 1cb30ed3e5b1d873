//! # Domain Types
//!
//! Core domain types used throughout AgriConnect Hub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Product      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  (order.rs)     │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │                 │       │
//! │  │  email          │   │  farmer_id (FK) │   │  buyer_id (FK)  │       │
//! │  │  role           │   │  price_per_unit │   │  total_amount   │       │
//! │  └─────────────────┘   │  is_high_demand │   │  status         │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Role       │   │   Capability    │   │      Unit       │       │
//! │  │  Farmer         │──►│  PlaceOrder     │   │  Kg, G          │       │
//! │  │  Buyer          │   │  MarkPaid       │   │  Piece, Dozen   │       │
//! │  │  Admin          │   │  ...            │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::PriceableItem;

// =============================================================================
// Roles & Capabilities
// =============================================================================

/// The three kinds of marketplace participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Buyer,
    Admin,
}

/// Something a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    BrowseMarketplace,
    ManageCart,
    PlaceOrder,
    ManageOwnListings,
    RespondToOrders,
    ManageAllListings,
    ManageAllOrders,
    MarkPaid,
    ViewPlatformStats,
}

const FARMER_CAPABILITIES: &[Capability] = &[
    Capability::BrowseMarketplace,
    Capability::ManageOwnListings,
    Capability::RespondToOrders,
];

const BUYER_CAPABILITIES: &[Capability] = &[
    Capability::BrowseMarketplace,
    Capability::ManageCart,
    Capability::PlaceOrder,
];

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::BrowseMarketplace,
    Capability::ManageAllListings,
    Capability::ManageAllOrders,
    Capability::MarkPaid,
    Capability::ViewPlatformStats,
];

impl Role {
    /// The capability table for this role.
    ///
    /// ```text
    ///                       Farmer   Buyer   Admin
    /// BrowseMarketplace       ✓        ✓       ✓
    /// ManageCart                       ✓
    /// PlaceOrder                       ✓
    /// ManageOwnListings       ✓
    /// RespondToOrders         ✓
    /// ManageAllListings                        ✓
    /// ManageAllOrders                          ✓
    /// MarkPaid                                 ✓
    /// ViewPlatformStats                        ✓
    /// ```
    pub const fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Farmer => FARMER_CAPABILITIES,
            Role::Buyer => BUYER_CAPABILITIES,
            Role::Admin => ADMIN_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Farmer => "farmer",
            Role::Buyer => "buyer",
            Role::Admin => "admin",
        })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::BrowseMarketplace => "browse_marketplace",
            Capability::ManageCart => "manage_cart",
            Capability::PlaceOrder => "place_order",
            Capability::ManageOwnListings => "manage_own_listings",
            Capability::RespondToOrders => "respond_to_orders",
            Capability::ManageAllListings => "manage_all_listings",
            Capability::ManageAllOrders => "manage_all_orders",
            Capability::MarkPaid => "mark_paid",
            Capability::ViewPlatformStats => "view_platform_stats",
        })
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}

// =============================================================================
// Unit
// =============================================================================

/// Unit a product is sold in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    G,
    Piece,
    Dozen,
}

impl Unit {
    pub const fn label(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Piece => "piece",
            Unit::Dozen => "dozen",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A farmer's listing in the marketplace catalog.
///
/// ## Soft Delete
/// Listings are never removed; `is_active = false` hides them from buyers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub farmer_id: String,
    /// Farmer name at time of listing (denormalised for cards).
    pub farmer_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Base price per `unit`, before surcharges.
    pub price_per_unit: Money,
    pub available_quantity: i64,
    pub unit: Unit,
    pub location_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_high_demand: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        self.price_per_unit
    }

    /// Checks the listing is active and has `quantity` on hand.
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.is_active && quantity <= self.available_quantity
    }

    /// The engine's view of `quantity` units of this product.
    pub fn priceable(&self, quantity: i64) -> PriceableItem {
        PriceableItem::new(self.price_per_unit, quantity, self.is_high_demand)
    }
}

/// Farmer listing form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_per_unit: Money,
    pub available_quantity: i64,
    pub unit: Unit,
    pub location_text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_high_demand: bool,
    pub image_url: Option<String>,
}

/// Partial edit of an existing listing. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_per_unit: Option<Money>,
    pub available_quantity: Option<i64>,
    pub unit: Option<Unit>,
    pub location_text: Option<String>,
    pub is_high_demand: Option<bool>,
    pub is_active: Option<bool>,
}

impl ProductUpdate {
    /// Applies the set fields to `product` and bumps `updated_at`.
    pub fn apply_to(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            product.description = description.trim().to_string();
        }
        if let Some(category) = &self.category {
            product.category = category.trim().to_string();
        }
        if let Some(price) = self.price_per_unit {
            product.price_per_unit = price;
        }
        if let Some(qty) = self.available_quantity {
            product.available_quantity = qty;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(location) = &self.location_text {
            product.location_text = location.trim().to_string();
        }
        if let Some(flag) = self.is_high_demand {
            product.is_high_demand = flag;
        }
        if let Some(flag) = self.is_active {
            product.is_active = flag;
        }
        product.updated_at = now;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            farmer_id: "f-1".to_string(),
            farmer_name: "Ravi Kumar".to_string(),
            name: "Tomatoes".to_string(),
            description: "Vine ripened".to_string(),
            category: "Vegetables".to_string(),
            price_per_unit: Money::from_rupees(40),
            available_quantity: 50,
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

    #[test]
    fn test_capability_table() {
        assert!(Role::Buyer.can(Capability::PlaceOrder));
        assert!(!Role::Farmer.can(Capability::PlaceOrder));
        assert!(Role::Farmer.can(Capability::RespondToOrders));
        assert!(Role::Admin.can(Capability::MarkPaid));
        assert!(!Role::Buyer.can(Capability::MarkPaid));

        for role in [Role::Farmer, Role::Buyer, Role::Admin] {
            assert!(role.can(Capability::BrowseMarketplace));
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Farmer).unwrap(), "\"farmer\"");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(serde_json::to_string(&Unit::Dozen).unwrap(), "\"dozen\"");
    }

    #[test]
    fn test_capability_display_matches_serde() {
        let json = serde_json::to_string(&Capability::MarkPaid).unwrap();
        assert_eq!(json, format!("\"{}\"", Capability::MarkPaid));
    }

    #[test]
    fn test_can_supply() {
        let mut p = product();
        assert!(p.can_supply(50));
        assert!(!p.can_supply(51));
        p.is_active = false;
        assert!(!p.can_supply(1));
    }

    #[test]
    fn test_priceable_carries_demand_flag() {
        let mut p = product();
        p.is_high_demand = true;
        let item = p.priceable(3);
        assert_eq!(item.base_price, Money::from_rupees(40));
        assert_eq!(item.quantity, 3);
        assert!(item.is_high_demand);
    }

    #[test]
    fn test_product_update_applies_only_set_fields() {
        let mut p = product();
        let update = ProductUpdate {
            price_per_unit: Some(Money::from_rupees(45)),
            is_high_demand: Some(true),
            name: Some("  Cherry Tomatoes ".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut p, Utc::now());

        assert_eq!(p.name, "Cherry Tomatoes");
        assert_eq!(p.price_per_unit, Money::from_rupees(45));
        assert!(p.is_high_demand);
        assert_eq!(p.available_quantity, 50);
        assert_eq!(p.category, "Vegetables");
    }
}
