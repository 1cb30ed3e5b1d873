//! # Order Repository
//!
//! Storage for placed orders.
//!
//! Orders arrive fully priced from [`agri_core::Order::place`]. This
//! repository only persists status and payment changes; the total is
//! never rewritten.

use std::sync::Arc;

use agri_core::{Order, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a newly placed order. Fails with `Duplicate` if the id is taken.
    async fn insert(&self, order: &Order) -> StoreResult<Order>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Order>>;

    async fn list_all(&self) -> StoreResult<Vec<Order>>;

    async fn list_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<Order>>;

    /// Orders with at least one line from `farmer_id`.
    async fn list_by_farmer(&self, farmer_id: &str) -> StoreResult<Vec<Order>>;

    async fn list_by_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>>;

    /// Moves an order through the status machine.
    ///
    /// ## Errors
    /// - `NotFound` if the id is unknown
    /// - `Core(InvalidOrderTransition)` if the move is not allowed
    async fn update_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order>;

    async fn set_paid(&self, id: &str, paid: bool) -> StoreResult<Order>;
}

/// [`OrderRepository`] backed by process memory. Orders are kept in
/// placement order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Order>
    where
        F: Fn(&Order) -> bool + Send,
    {
        let orders = self.orders.read().await;
        orders.iter().filter(|o| keep(o)).cloned().collect()
    }

    async fn modify<F>(&self, id: &str, change: F) -> StoreResult<Order>
    where
        F: FnOnce(&mut Order) -> StoreResult<()> + Send,
    {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;
        change(order)?;
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::duplicate("order id", &order.id));
        }

        info!(
            id = %order.id,
            buyer = %order.buyer_id,
            total = %order.total_amount(),
            "Order stored"
        );
        orders.push(order.clone());
        Ok(order.clone())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn list_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<Order>> {
        Ok(self.filtered(|o| o.buyer_id == buyer_id).await)
    }

    async fn list_by_farmer(&self, farmer_id: &str) -> StoreResult<Vec<Order>> {
        Ok(self.filtered(|o| o.involves_farmer(farmer_id)).await)
    }

    async fn list_by_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>> {
        Ok(self.filtered(|o| o.status() == status).await)
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let order = self
            .modify(id, |order| Ok(order.transition_to(status, Utc::now())?))
            .await?;
        info!(id = %id, status = %status, "Order status changed");
        Ok(order)
    }

    async fn set_paid(&self, id: &str, paid: bool) -> StoreResult<Order> {
        let order = self
            .modify(id, |order| {
                order.set_paid(paid, Utc::now());
                Ok(())
            })
            .await?;
        debug!(id = %id, paid, "Payment flag changed");
        Ok(order)
    }
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::{CoreError, Money, OrderItem};

    fn line(farmer: &str, rupees: i64) -> OrderItem {
        OrderItem {
            product_id: format!("p-{farmer}"),
            product_name: "Onions".to_string(),
            quantity: 2,
            price_per_unit: Money::from_rupees(rupees),
            is_high_demand: false,
            farmer_id: farmer.to_string(),
            farmer_name: "Farmer".to_string(),
        }
    }

    fn order(id: &str, buyer: &str, farmer: &str) -> Order {
        Order::place(id, buyer, "Buyer", vec![line(farmer, 30)], 3.0, Utc::now()).unwrap()
    }

    async fn repo() -> InMemoryOrderRepository {
        let repo = InMemoryOrderRepository::new();
        repo.insert(&order("o-1", "b-1", "f-1")).await.unwrap();
        repo.insert(&order("o-2", "b-2", "f-1")).await.unwrap();
        repo.insert(&order("o-3", "b-1", "f-2")).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = repo().await;
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
        assert_eq!(repo.list_by_buyer("b-1").await.unwrap().len(), 2);
        assert_eq!(repo.list_by_farmer("f-1").await.unwrap().len(), 2);
        assert_eq!(repo.list_by_farmer("f-9").await.unwrap().len(), 0);
        assert_eq!(
            repo.list_by_status(OrderStatus::Pending).await.unwrap().len(),
            3
        );
    }

    #[tokio::test]
    async fn test_duplicate_order_rejected() {
        let repo = repo().await;
        let err = repo.insert(&order("o-1", "b-3", "f-3")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_status_changes_follow_machine() {
        let repo = repo().await;
        let accepted = repo.update_status("o-1", OrderStatus::Accepted).await.unwrap();
        assert_eq!(accepted.status(), OrderStatus::Accepted);

        let err = repo
            .update_status("o-2", OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidOrderTransition { .. })
        ));
        assert_eq!(
            repo.get_by_id("o-2").await.unwrap().unwrap().status(),
            OrderStatus::Pending
        );

        assert!(matches!(
            repo.update_status("nope", OrderStatus::Accepted).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_set_paid_keeps_total() {
        let repo = repo().await;
        let before = repo.get_by_id("o-3").await.unwrap().unwrap().total_amount();
        let paid = repo.set_paid("o-3", true).await.unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.total_amount(), before);
        assert_eq!(before, Money::from_rupees(60));
    }
}
