//! # Cart Commands
//!
//! Buyer cart manipulation with live pricing at the chosen distance.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Distance │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │  Slider  │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart        get_cart          place_order     │
//! │                   update_item     (re-priced at d)     (order.rs)      │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole cart re-priced, so the frontend never
//! computes a fee itself.

use agri_core::{Capability, DistanceBand, Money, PricingBreakdown, User};
use serde::Serialize;
use tracing::debug;

use super::authorize;
use crate::error::{ApiError, ApiResult};
use crate::state::{Cart, CartItem, CartState, ConfigState, StoreState};

/// One cart row with its priced amounts.
///
/// The amounts are rounded to paise for display only; the summary total
/// comes from the exact sum, so rows may differ from it by a paisa.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub base_amount: Money,
    pub delivery_fee: Money,
    pub demand_fee: Money,
    pub line_total: Money,
}

/// Totals panel under the cart.
///
/// ## Layout
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  Subtotal                                  ₹720.00             │
/// │  Delivery Fee (5%)                          ₹36.00             │
/// │  High Demand Fee                            ₹30.00             │
/// │  ──────────────────────────────────────────────────            │
/// │  TOTAL                                     ₹786.00             │
/// └────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub distance_km: f64,
    pub band: DistanceBand,
    pub band_label: &'static str,
    pub delivery_percent: u32,
    pub item_count: usize,
    pub total_quantity: i64,
    pub base_subtotal: Money,
    pub delivery_fee: Money,
    pub demand_fee: Money,
    pub total: Money,
    pub has_high_demand_items: bool,
}

/// Cart response including priced lines and the summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
}

impl CartResponse {
    /// Prices `cart` at `distance_km`.
    pub fn priced(cart: &Cart, distance_km: f64) -> ApiResult<Self> {
        let breakdown = PricingBreakdown::compute(&cart.priceable_items(), distance_km)?;

        let items = cart
            .items
            .iter()
            .zip(&breakdown.lines)
            .map(|(item, quote)| CartLine {
                item: item.clone(),
                base_amount: quote.base_amount.to_money(),
                delivery_fee: quote.delivery_fee().to_money(),
                demand_fee: quote.demand_fee().to_money(),
                line_total: quote.line_total.to_money(),
            })
            .collect();

        Ok(CartResponse {
            items,
            summary: CartSummary {
                distance_km: breakdown.distance.km(),
                band: breakdown.band,
                band_label: breakdown.band.label(),
                delivery_percent: breakdown.band.surcharge().percent(),
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
                base_subtotal: breakdown.base_subtotal.to_money(),
                delivery_fee: breakdown.delivery_fee.to_money(),
                demand_fee: breakdown.demand_fee.to_money(),
                total: breakdown.total.to_money(),
                has_high_demand_items: breakdown.has_high_demand_items(),
            },
        })
    }
}

fn respond(cart: &CartState, config: &ConfigState, distance_km: Option<f64>) -> ApiResult<CartResponse> {
    let km = config.resolve_distance(distance_km)?;
    cart.with_cart(|c| CartResponse::priced(c, km))
}

/// Gets the current cart priced at `distance_km` (default when `None`).
pub fn get_cart(
    cart: &CartState,
    config: &ConfigState,
    user: &User,
    distance_km: Option<f64>,
) -> ApiResult<CartResponse> {
    debug!(user = %user.id, ?distance_km, "get_cart command");
    authorize(user, Capability::ManageCart)?;
    respond(cart, config, distance_km)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases, bounded by stock
/// - If product not in cart: added as new item
/// - Price and demand flag are frozen at the time of adding
///
/// ## Arguments
/// * `product_id` - Product UUID to add
/// * `quantity` - Quantity to add (default: 1)
pub async fn add_to_cart(
    store: &StoreState,
    cart: &CartState,
    config: &ConfigState,
    user: &User,
    product_id: &str,
    quantity: Option<i64>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(user = %user.id, product_id = %product_id, quantity, "add_to_cart command");
    authorize(user, Capability::ManageCart)?;

    let product = store
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    cart.with_cart_mut(|c| c.add_item(&product, quantity))?;
    respond(cart, config, None)
}

/// Sets the quantity of an item already in the cart. Zero removes it.
///
/// The stock bound is refreshed from the store first, so a farmer's
/// restock or sale since the item was added is taken into account.
pub async fn update_cart_item(
    store: &StoreState,
    cart: &CartState,
    config: &ConfigState,
    user: &User,
    product_id: &str,
    quantity: i64,
) -> ApiResult<CartResponse> {
    debug!(user = %user.id, product_id = %product_id, quantity, "update_cart_item command");
    authorize(user, Capability::ManageCart)?;

    let available = store
        .products()
        .get_by_id(product_id)
        .await?
        .map(|p| p.available_quantity);

    cart.with_cart_mut(|c| {
        if let (Some(available), Some(item)) = (
            available,
            c.items.iter_mut().find(|i| i.product_id == product_id),
        ) {
            item.available_quantity = available;
        }
        c.update_quantity(product_id, quantity)
    })?;
    respond(cart, config, None)
}

pub fn remove_from_cart(
    cart: &CartState,
    config: &ConfigState,
    user: &User,
    product_id: &str,
) -> ApiResult<CartResponse> {
    debug!(user = %user.id, product_id = %product_id, "remove_from_cart command");
    authorize(user, Capability::ManageCart)?;

    cart.with_cart_mut(|c| c.remove_item(product_id))?;
    respond(cart, config, None)
}

pub fn clear_cart(cart: &CartState, config: &ConfigState, user: &User) -> ApiResult<CartResponse> {
    debug!(user = %user.id, "clear_cart command");
    authorize(user, Capability::ManageCart)?;

    cart.with_cart_mut(Cart::clear);
    respond(cart, config, None)
}
