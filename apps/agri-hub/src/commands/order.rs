//! # Order Commands
//!
//! Placement, the farmer's response, completion and the admin payment flag.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Flow                                           │
//! │                                                                         │
//! │  Buyer                  Farmer                      Admin              │
//! │  ─────                  ──────                      ─────              │
//! │  place_order ──► PENDING ──► respond_to_order(accept) ──► ACCEPTED     │
//! │    │                 │                                      │          │
//! │    │ reserve stock   └──► respond_to_order(reject) ──► REJECTED        │
//! │    │ total fixed               │ stock released            │          │
//! │    ▼                           ▼                            ▼          │
//! │  cart cleared                                   complete_order         │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                                   COMPLETED             │
//! │                                                       │                 │
//! │                                               toggle_paid (admin)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is computed once by `Order::place` and never recomputed.

use agri_core::{Capability, CoreError, Order, OrderItem, OrderStatus, User};
use agri_store::generate_order_id;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::authorize;
use crate::error::{ApiError, ApiResult};
use crate::state::{Cart, CartState, ConfigState, StoreState};

/// Turns the cart into a pending order priced at `distance_km`.
///
/// ## Steps
/// 1. Every listing in the cart must still exist and be active
/// 2. The total is priced once from the cart's frozen prices
/// 3. Stock is reserved line by line; a failure releases what was taken
/// 4. The order is stored and the cart cleared
///
/// ## Errors
/// - `CART_ERROR` for an empty cart
/// - `INSUFFICIENT_STOCK` when a listing sold out since it was added
/// - `BUSINESS_LOGIC` when a listing was switched off
pub async fn place_order(
    store: &StoreState,
    cart: &CartState,
    config: &ConfigState,
    user: &User,
    distance_km: Option<f64>,
) -> ApiResult<Order> {
    debug!(user = %user.id, ?distance_km, "place_order command");
    authorize(user, Capability::PlaceOrder)?;

    let km = config.resolve_distance(distance_km)?;
    let items = cart.with_cart(Cart::order_items);
    if items.is_empty() {
        return Err(CoreError::EmptyOrder.into());
    }

    for item in &items {
        let product = store
            .products()
            .get_by_id(&item.product_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Product", &item.product_id))?;
        if !product.is_active {
            return Err(CoreError::ProductInactive(product.name).into());
        }
    }

    let order = Order::place(generate_order_id(), &user.id, &user.name, items, km, Utc::now())?;

    reserve_stock(store, &order.items).await?;
    if let Err(err) = store.orders().insert(&order).await {
        release_stock(store, &order.items).await;
        return Err(err.into());
    }

    cart.with_cart_mut(Cart::clear);

    info!(
        order_id = %order.id,
        buyer = %user.id,
        total = %order.total_amount(),
        distance_km = km,
        lines = order.items.len(),
        "Order placed"
    );
    Ok(order)
}

async fn reserve_stock(store: &StoreState, items: &[OrderItem]) -> ApiResult<()> {
    for (taken, item) in items.iter().enumerate() {
        if let Err(err) = store.products().adjust_stock(&item.product_id, -item.quantity).await {
            warn!(product_id = %item.product_id, error = %err, "Stock reservation failed");
            release_stock(store, &items[..taken]).await;
            return Err(err.into());
        }
    }
    Ok(())
}

async fn release_stock(store: &StoreState, items: &[OrderItem]) {
    for item in items {
        if let Err(err) = store.products().adjust_stock(&item.product_id, item.quantity).await {
            warn!(product_id = %item.product_id, error = %err, "Could not release stock");
        }
    }
}

/// Loads an order the user may act on as a seller.
///
/// Admins may act on any order; farmers only on orders containing one of
/// their listings.
async fn order_for_seller(store: &StoreState, user: &User, order_id: &str) -> ApiResult<Order> {
    let order = store
        .orders()
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    if user.can(Capability::ManageAllOrders) {
        return Ok(order);
    }
    authorize(user, Capability::RespondToOrders)?;
    if !order.involves_farmer(&user.id) {
        warn!(user = %user.id, order_id, "Farmer is not a seller on this order");
        return Err(ApiError::forbidden(format!(
            "order {} has no listings from {}",
            order_id, user.name
        )));
    }
    Ok(order)
}

/// Accepts or rejects a pending order. Rejection releases the stock.
pub async fn respond_to_order(
    store: &StoreState,
    user: &User,
    order_id: &str,
    accept: bool,
) -> ApiResult<Order> {
    debug!(user = %user.id, order_id, accept, "respond_to_order command");
    order_for_seller(store, user, order_id).await?;

    let next = if accept {
        OrderStatus::Accepted
    } else {
        OrderStatus::Rejected
    };
    let order = store.orders().update_status(order_id, next).await?;

    if next == OrderStatus::Rejected {
        release_stock(store, &order.items).await;
    }

    info!(order_id, by = %user.id, status = %next, "Order answered");
    Ok(order)
}

/// Marks an accepted order as delivered.
pub async fn complete_order(store: &StoreState, user: &User, order_id: &str) -> ApiResult<Order> {
    debug!(user = %user.id, order_id, "complete_order command");
    order_for_seller(store, user, order_id).await?;

    let order = store
        .orders()
        .update_status(order_id, OrderStatus::Completed)
        .await?;
    info!(order_id, by = %user.id, "Order completed");
    Ok(order)
}

/// Flips the payment flag. Admin only; the total is left untouched.
pub async fn toggle_paid(store: &StoreState, user: &User, order_id: &str) -> ApiResult<Order> {
    debug!(user = %user.id, order_id, "toggle_paid command");
    authorize(user, Capability::MarkPaid)?;

    let current = store
        .orders()
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", order_id))?;

    let order = store.orders().set_paid(order_id, !current.is_paid()).await?;
    info!(order_id, paid = order.is_paid(), "Payment flag toggled");
    Ok(order)
}

/// Orders visible to `user`, newest first.
///
/// Buyers see what they placed, farmers see orders containing their
/// listings, admins see everything.
pub async fn list_orders(
    store: &StoreState,
    user: &User,
    status: Option<OrderStatus>,
) -> ApiResult<Vec<Order>> {
    debug!(user = %user.id, ?status, "list_orders command");

    let mut orders = if user.can(Capability::ManageAllOrders) {
        store.orders().list_all().await?
    } else if user.can(Capability::RespondToOrders) {
        store.orders().list_by_farmer(&user.id).await?
    } else {
        authorize(user, Capability::PlaceOrder)?;
        store.orders().list_by_buyer(&user.id).await?
    };

    if let Some(status) = status {
        orders.retain(|o| o.status() == status);
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(orders)
}
