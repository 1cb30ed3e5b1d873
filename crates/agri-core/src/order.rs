//! # Order Lifecycle
//!
//! Orders are created from a buyer's cart and then moved through a small
//! status machine by the farmer.
//!
//! ## Status Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                 accept            complete                              │
//! │   ┌─────────┐ ─────────► ┌──────────┐ ─────────► ┌───────────┐         │
//! │   │ PENDING │            │ ACCEPTED │            │ COMPLETED │ (final) │
//! │   └─────────┘            └──────────┘            └───────────┘         │
//! │        │                                                                │
//! │        │ reject                                                         │
//! │        ▼                                                                │
//! │   ┌──────────┐                                                          │
//! │   │ REJECTED │ (final)                                                  │
//! │   └──────────┘                                                          │
//! │                                                                         │
//! │  Payment (`is_paid`) is tracked separately and toggled by an admin.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Authoritative Total
//! [`Order::place`] runs the pricing engine once and stores the rounded total.
//! The total has no setter: later catalog price changes never touch a placed
//! order. Deserializing re-prices the frozen items and rejects a stored total
//! that disagrees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{price_collection, PriceableItem};
use crate::types::Product;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Accepted)
                | (OrderStatus::Pending, OrderStatus::Rejected)
                | (OrderStatus::Accepted, OrderStatus::Completed)
        )
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Rejected | OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line in an order.
/// Uses the snapshot pattern: product data is frozen at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Base unit price at time of order (frozen).
    pub price_per_unit: Money,
    /// Demand flag at time of order (frozen).
    pub is_high_demand: bool,
    pub farmer_id: String,
    pub farmer_name: String,
}

impl OrderItem {
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price_per_unit: product.price_per_unit,
            is_high_demand: product.is_high_demand,
            farmer_id: product.farmer_id.clone(),
            farmer_name: product.farmer_name.clone(),
        }
    }

    pub fn priceable(&self) -> PriceableItem {
        PriceableItem::new(self.price_per_unit, self.quantity, self.is_high_demand)
    }

    /// `price × quantity` without surcharges, as shown to the farmer.
    pub fn base_amount(&self) -> Money {
        self.price_per_unit.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub items: Vec<OrderItem>,
    total_amount: Money,
    status: OrderStatus,
    is_paid: bool,
    /// Distance the total was priced at.
    pub distance_km: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order and computes its authoritative total.
    ///
    /// ## Errors
    /// - `EmptyOrder` when `items` is empty
    /// - `InvalidInput` when any line or the distance fails pricing
    pub fn place(
        id: impl Into<String>,
        buyer_id: impl Into<String>,
        buyer_name: impl Into<String>,
        items: Vec<OrderItem>,
        distance_km: f64,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let total_amount = priced_total(&items, distance_km)?;

        Ok(Order {
            id: id.into(),
            buyer_id: buyer_id.into(),
            buyer_name: buyer_name.into(),
            items,
            total_amount,
            status: OrderStatus::Pending,
            is_paid: false,
            distance_km,
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[inline]
    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Moves the order to `next` if the status machine allows it.
    pub fn transition_to(&mut self, next: OrderStatus, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidOrderTransition {
                order_id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_paid(&mut self, paid: bool, now: DateTime<Utc>) {
        self.is_paid = paid;
        self.updated_at = now;
    }

    /// True when at least one line belongs to `farmer_id`.
    pub fn involves_farmer(&self, farmer_id: &str) -> bool {
        self.items.iter().any(|i| i.farmer_id == farmer_id)
    }

    /// Base value of this farmer's lines (no surcharges).
    pub fn farmer_subtotal(&self, farmer_id: &str) -> Money {
        self.items
            .iter()
            .filter(|i| i.farmer_id == farmer_id)
            .map(OrderItem::base_amount)
            .sum()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

fn priced_total(items: &[OrderItem], distance_km: f64) -> CoreResult<Money> {
    if items.is_empty() {
        return Err(CoreError::EmptyOrder);
    }
    let priceable: Vec<PriceableItem> = items.iter().map(OrderItem::priceable).collect();
    Ok(price_collection(&priceable, distance_km)?.to_money())
}

// =============================================================================
// Deserialization
// =============================================================================

/// Wire shape of [`Order`], checked before it becomes one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    id: String,
    buyer_id: String,
    buyer_name: String,
    items: Vec<OrderItem>,
    total_amount: Money,
    status: OrderStatus,
    is_paid: bool,
    distance_km: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = CoreError;

    fn try_from(record: OrderRecord) -> CoreResult<Self> {
        let total_amount = priced_total(&record.items, record.distance_km)?;
        if total_amount != record.total_amount {
            return Err(ValidationError::invalid_format(
                "total_amount",
                format!("expected {total_amount} for the listed items, found {}", record.total_amount),
            )
            .into());
        }

        Ok(Order {
            id: record.id,
            buyer_id: record.buyer_id,
            buyer_name: record.buyer_name,
            items: record.items,
            total_amount,
            status: record.status,
            is_paid: record.is_paid,
            distance_km: record.distance_km,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = OrderRecord::deserialize(deserializer)?;
        Order::try_from(record).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
