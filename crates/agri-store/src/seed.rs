//! # Seed Data
//!
//! Demo dataset for development and tests.
//!
//! ## Contents
//! - One user per role (farmer, buyer, admin) with stable UUIDs
//! - Six listings across Vegetables, Fruits, Grains and Dairy, one of them
//!   switched off and two flagged high-demand
//! - Two orders: one pending, one completed and paid
//!
//! Every id is fixed so tests and the demo walkthrough can refer to them.

use agri_core::{Money, Order, OrderItem, OrderStatus, Product, Role, Unit, User};
use chrono::{Duration, Utc};
use tracing::debug;

use crate::error::StoreResult;
use crate::store::Store;

pub const FARMER_ID: &str = "3f2c8a10-5b7e-4c1d-9a6e-0d4b2f7c1a01";
pub const BUYER_ID: &str = "3f2c8a10-5b7e-4c1d-9a6e-0d4b2f7c1a02";
pub const ADMIN_ID: &str = "3f2c8a10-5b7e-4c1d-9a6e-0d4b2f7c1a03";

pub const TOMATOES_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a01";
pub const MANGOES_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a02";
pub const RICE_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a03";
pub const ONIONS_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a04";
pub const PANEER_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a05";
pub const OKRA_ID: &str = "7a1e4b20-9c3d-4e5f-8a6b-1c2d3e4f5a06";

pub const PENDING_ORDER_ID: &str = "c5d6e7f8-1a2b-4c3d-9e4f-5a6b7c8d9e01";
pub const COMPLETED_ORDER_ID: &str = "c5d6e7f8-1a2b-4c3d-9e4f-5a6b7c8d9e02";

const FARMER_NAME: &str = "Ravi Patil";
const BUYER_NAME: &str = "Asha Menon";

/// Categories offered in the marketplace filter.
pub const CATEGORIES: &[&str] = &["Vegetables", "Fruits", "Grains", "Dairy"];

/// (id, name, description, category, paise per unit, stock, unit, high demand, active)
const LISTINGS: &[(&str, &str, &str, &str, i64, i64, Unit, bool, bool)] = &[
    (
        TOMATOES_ID,
        "Tomatoes",
        "Vine-ripened, picked this morning",
        "Vegetables",
        4_000,
        120,
        Unit::Kg,
        false,
        true,
    ),
    (
        MANGOES_ID,
        "Alphonso Mangoes",
        "Ratnagiri Alphonso, export grade",
        "Fruits",
        60_000,
        40,
        Unit::Dozen,
        true,
        true,
    ),
    (
        RICE_ID,
        "Basmati Rice",
        "Aged one year, long grain",
        "Grains",
        12_000,
        500,
        Unit::Kg,
        false,
        true,
    ),
    (
        ONIONS_ID,
        "Red Onions",
        "Nashik red onions, sun dried",
        "Vegetables",
        3_500,
        300,
        Unit::Kg,
        true,
        true,
    ),
    (
        PANEER_ID,
        "Fresh Paneer",
        "Made daily from buffalo milk",
        "Dairy",
        42_000,
        15,
        Unit::Kg,
        false,
        true,
    ),
    (
        OKRA_ID,
        "Okra",
        "Tender bhindi",
        "Vegetables",
        3_000,
        0,
        Unit::Kg,
        false,
        false,
    ),
];

fn users() -> Vec<User> {
    let now = Utc::now();
    vec![
        User {
            id: FARMER_ID.to_string(),
            email: "farmer@agriconnect.in".to_string(),
            name: FARMER_NAME.to_string(),
            role: Role::Farmer,
            phone: Some("+91 98220 11223".to_string()),
            location: Some("Nashik, Maharashtra".to_string()),
            created_at: now,
        },
        User {
            id: BUYER_ID.to_string(),
            email: "buyer@agriconnect.in".to_string(),
            name: BUYER_NAME.to_string(),
            role: Role::Buyer,
            phone: Some("+91 99870 44556".to_string()),
            location: Some("Pune, Maharashtra".to_string()),
            created_at: now,
        },
        User {
            id: ADMIN_ID.to_string(),
            email: "admin@agriconnect.in".to_string(),
            name: "Platform Admin".to_string(),
            role: Role::Admin,
            phone: None,
            location: None,
            created_at: now,
        },
    ]
}

fn products() -> Vec<Product> {
    let now = Utc::now();
    LISTINGS
        .iter()
        .map(
            |&(id, name, description, category, paise, stock, unit, high_demand, active)| Product {
                id: id.to_string(),
                farmer_id: FARMER_ID.to_string(),
                farmer_name: FARMER_NAME.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                price_per_unit: Money::from_paise(paise),
                available_quantity: stock,
                unit,
                location_text: "Nashik, Maharashtra".to_string(),
                lat: Some(19.9975),
                lng: Some(73.7898),
                is_high_demand: high_demand,
                is_active: active,
                image_url: None,
                created_at: now,
                updated_at: now,
            },
        )
        .collect()
}

fn line(products: &[Product], id: &str, quantity: i64) -> Option<OrderItem> {
    products
        .iter()
        .find(|p| p.id == id)
        .map(|p| OrderItem::from_product(p, quantity))
}

/// Loads the dataset into `store`.
///
/// ## Errors
/// `Duplicate` if the store already holds any of the seed ids.
pub async fn load(store: &Store) -> StoreResult<()> {
    for user in users() {
        store.users().insert(&user).await?;
    }

    let catalog = products();
    for product in &catalog {
        store.products().insert(product).await?;
    }

    let placed = Utc::now() - Duration::days(3);

    // 3 kg tomatoes + 1 dozen mangoes at 12 km
    let pending_items = [line(&catalog, TOMATOES_ID, 3), line(&catalog, MANGOES_ID, 1)]
        .into_iter()
        .flatten()
        .collect();
    let pending = Order::place(PENDING_ORDER_ID, BUYER_ID, BUYER_NAME, pending_items, 12.0, placed)?;
    store.orders().insert(&pending).await?;

    // 10 kg rice at 4 km, delivered and paid
    let completed_items = line(&catalog, RICE_ID, 10).into_iter().collect();
    let mut completed = Order::place(
        COMPLETED_ORDER_ID,
        BUYER_ID,
        BUYER_NAME,
        completed_items,
        4.0,
        placed - Duration::days(7),
    )?;
    completed.transition_to(OrderStatus::Accepted, placed)?;
    completed.transition_to(OrderStatus::Completed, placed)?;
    completed.set_paid(true, placed);
    store.orders().insert(&completed).await?;

    debug!("Seed data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_contents() {
        let store = Store::seeded().await.unwrap();

        assert_eq!(store.users().list_all().await.unwrap().len(), 3);
        assert_eq!(store.products().count().await.unwrap(), LISTINGS.len());
        assert_eq!(store.products().list_active().await.unwrap().len(), 5);

        let pending = store.orders().get_by_id(PENDING_ORDER_ID).await.unwrap().unwrap();
        // (3 × ₹40 × 1.05) + (₹600 × 1.10) = 126 + 660
        assert_eq!(pending.total_amount(), Money::from_rupees(786));
        assert_eq!(pending.status(), OrderStatus::Pending);

        let completed = store
            .orders()
            .get_by_id(COMPLETED_ORDER_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(completed.total_amount(), Money::from_rupees(1_200));
        assert!(completed.is_paid());
    }

    #[tokio::test]
    async fn test_seed_twice_is_duplicate() {
        let store = Store::seeded().await.unwrap();
        assert!(load(&store).await.is_err());
    }

    #[test]
    fn test_seed_ids_are_uuids() {
        for id in [FARMER_ID, BUYER_ID, ADMIN_ID, TOMATOES_ID, OKRA_ID, PENDING_ORDER_ID] {
            assert!(agri_core::validation::validate_uuid(id).is_ok(), "{id}");
        }
    }

    #[test]
    fn test_categories_cover_listings() {
        for listing in LISTINGS {
            assert!(CATEGORIES.contains(&listing.3));
        }
    }
}
