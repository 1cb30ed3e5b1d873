//! # Cart State
//!
//! Manages the signed-in buyer's cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Frontend Action          Command                 Cart State Change     │
//! │  ───────────────          ───────                 ─────────────────     │
//! │                                                                         │
//! │  Add to Cart ────────────► add_to_cart() ───────► merge or push        │
//! │                                                                         │
//! │  +/- Buttons ────────────► update_cart_item() ──► items[i].qty = n     │
//! │                                                                         │
//! │  Trash Icon ─────────────► remove_from_cart() ──► items.remove(i)      │
//! │                                                                         │
//! │  Place Order ────────────► place_order() ───────► items.clear()        │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use agri_core::validation::{validate_cart_size, validate_quantity};
use agri_core::{
    CoreError, CoreResult, Money, OrderItem, PriceableItem, Product, Unit, MAX_CART_ITEMS,
    MAX_ITEM_QUANTITY,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item in the cart.
///
/// Price and demand flag are frozen when the item is added, so the cart
/// keeps showing what the buyer saw even if the farmer edits the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub farmer_id: String,
    pub farmer_name: String,
    pub location_text: String,
    pub unit: Unit,

    /// Base price at time of adding (frozen)
    pub price_per_unit: Money,

    /// Demand flag at time of adding (frozen)
    pub is_high_demand: bool,

    pub quantity: i64,

    /// Stock seen when the item was last added or updated
    pub available_quantity: i64,

    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            farmer_id: product.farmer_id.clone(),
            farmer_name: product.farmer_name.clone(),
            location_text: product.location_text.clone(),
            unit: product.unit,
            price_per_unit: product.price_per_unit,
            is_high_demand: product.is_high_demand,
            quantity,
            available_quantity: product.available_quantity,
            added_at: Utc::now(),
        }
    }

    pub fn priceable(&self) -> PriceableItem {
        PriceableItem::new(self.price_per_unit, self.quantity, self.is_high_demand)
    }

    /// The order line this cart item becomes.
    pub fn order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product_id.clone(),
            product_name: self.name.clone(),
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            is_high_demand: self.is_high_demand,
            farmer_id: self.farmer_id.clone(),
            farmer_name: self.farmer_name.clone(),
        }
    }

    fn check_quantity(&self, quantity: i64) -> CoreResult<()> {
        check_line_quantity(quantity)?;
        if quantity > self.available_quantity {
            return Err(CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.available_quantity,
                requested: quantity,
            });
        }
        Ok(())
    }
}

fn check_line_quantity(quantity: i64) -> CoreResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    validate_quantity(quantity)?;
    Ok(())
}

/// The buyer's cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product merges)
/// - 1 ≤ quantity ≤ min(stock, MAX_ITEM_QUANTITY)
/// - At most MAX_CART_ITEMS distinct products
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product or increases its quantity if already present.
    ///
    /// ## Errors
    /// - `ProductInactive` for a switched-off listing
    /// - `InsufficientStock` when the merged quantity exceeds stock
    /// - `QuantityTooLarge` above MAX_ITEM_QUANTITY
    /// - `CartTooLarge` when a new line would exceed MAX_CART_ITEMS
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        check_line_quantity(quantity)?;
        if !product.is_active {
            return Err(CoreError::ProductInactive(product.name.clone()));
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.available_quantity = product.available_quantity;
            let merged = item.quantity.saturating_add(quantity);
            item.check_quantity(merged)?;
            item.quantity = merged;
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;

        let item = CartItem::from_product(product, quantity);
        item.check_quantity(quantity)?;
        self.items.push(item);
        Ok(())
    }

    /// Sets an item's quantity. Zero removes the item.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        item.check_quantity(quantity)?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// The engine's view of the cart, in cart order.
    pub fn priceable_items(&self) -> Vec<PriceableItem> {
        self.items.iter().map(CartItem::priceable).collect()
    }

    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(CartItem::order_item).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared cart state.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them modify state.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}
