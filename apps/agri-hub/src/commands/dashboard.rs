//! # Dashboard Commands
//!
//! Headline numbers for the farmer and admin dashboards.
//!
//! Revenue only counts COMPLETED orders. A farmer's revenue is the base
//! value of their own lines; the platform figure is the sum of order
//! totals, surcharges included.

use agri_core::{Capability, Money, Order, OrderStatus, Product, Role, User};
use serde::Serialize;
use tracing::debug;

use super::authorize;
use crate::error::ApiResult;
use crate::state::StoreState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerStats {
    pub total_listings: usize,
    pub active_listings: usize,
    pub high_demand_listings: usize,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub farmers: usize,
    pub buyers: usize,
    pub total_listings: usize,
    pub active_listings: usize,
    pub high_demand_listings: usize,
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub paid_orders: usize,
    pub revenue: Money,
}

fn count_status(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|o| o.status() == status).count()
}

fn high_demand(products: &[Product]) -> usize {
    products
        .iter()
        .filter(|p| p.is_active && p.is_high_demand)
        .count()
}

pub async fn farmer_stats(store: &StoreState, user: &User) -> ApiResult<FarmerStats> {
    debug!(user = %user.id, "farmer_stats command");
    authorize(user, Capability::ManageOwnListings)?;

    let products = store.products().list_by_farmer(&user.id).await?;
    let orders = store.orders().list_by_farmer(&user.id).await?;

    let revenue: Money = orders
        .iter()
        .filter(|o| o.status() == OrderStatus::Completed)
        .map(|o| o.farmer_subtotal(&user.id))
        .sum();

    Ok(FarmerStats {
        total_listings: products.len(),
        active_listings: products.iter().filter(|p| p.is_active).count(),
        high_demand_listings: high_demand(&products),
        total_orders: orders.len(),
        pending_orders: count_status(&orders, OrderStatus::Pending),
        completed_orders: count_status(&orders, OrderStatus::Completed),
        revenue,
    })
}

pub async fn admin_stats(store: &StoreState, user: &User) -> ApiResult<AdminStats> {
    debug!(user = %user.id, "admin_stats command");
    authorize(user, Capability::ViewPlatformStats)?;

    let users = store.users().list_all().await?;
    let products = store.products().list_all().await?;
    let orders = store.orders().list_all().await?;

    let revenue: Money = orders
        .iter()
        .filter(|o| o.status() == OrderStatus::Completed)
        .map(Order::total_amount)
        .sum();

    Ok(AdminStats {
        total_users: users.len(),
        farmers: users.iter().filter(|u| u.role == Role::Farmer).count(),
        buyers: users.iter().filter(|u| u.role == Role::Buyer).count(),
        total_listings: products.len(),
        active_listings: products.iter().filter(|p| p.is_active).count(),
        high_demand_listings: high_demand(&products),
        total_orders: orders.len(),
        pending_orders: count_status(&orders, OrderStatus::Pending),
        completed_orders: count_status(&orders, OrderStatus::Completed),
        paid_orders: orders.iter().filter(|o| o.is_paid()).count(),
        revenue,
    })
}
