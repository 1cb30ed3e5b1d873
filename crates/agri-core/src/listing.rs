//! # Marketplace Listings
//!
//! Filtering and card pricing for the buyer's catalog view.
//!
//! ## Flow
//! ```text
//! active products ──► ListingFilter::apply ──► listing_card(product, distance)
//!                     (query, category,        (price for 1 unit including
//!                      max base price)          distance + demand surcharge)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::money::Money;
use crate::pricing::{quote_item, Multiplier};
use crate::types::{Product, Unit};

/// Buyer-side catalog filter.
///
/// All conditions must hold. The query is matched case-insensitively against
/// the name OR the description; an empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub query: String,
    /// `None` means every category.
    pub category: Option<String>,
    /// Compared against the base price, before surcharges.
    pub max_price: Option<Money>,
}

impl ListingFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_active {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query);

        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |c| product.category == c);

        let matches_price = self
            .max_price
            .map_or(true, |max| product.price_per_unit <= max);

        matches_query && matches_category && matches_price
    }

    /// Keeps matching products, preserving input order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// One product card in the marketplace grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingCard {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub farmer_name: String,
    pub location_text: String,
    pub unit: Unit,
    pub available_quantity: i64,
    pub is_high_demand: bool,
    pub base_price: Money,
    /// Price of one unit at the buyer's distance, surcharges included.
    pub display_price: Money,
    /// True when `display_price` differs from `base_price`.
    pub includes_fees: bool,
    pub in_stock: bool,
}

/// Prices one unit of `product` at `distance_km` for display.
pub fn listing_card(product: &Product, distance_km: f64) -> ValidationResult<ListingCard> {
    let quote = quote_item(product.price_per_unit, 1, distance_km, product.is_high_demand)?;

    Ok(ListingCard {
        product_id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        farmer_name: product.farmer_name.clone(),
        location_text: product.location_text.clone(),
        unit: product.unit,
        available_quantity: product.available_quantity,
        is_high_demand: product.is_high_demand,
        base_price: product.price_per_unit,
        display_price: quote.line_total.to_money(),
        includes_fees: quote.unit_multiplier > Multiplier::ONE,
        in_stock: product.available_quantity > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, category: &str, rupees: i64, high_demand: bool) -> Product {
        Product {
            id: format!("p-{name}"),
            farmer_id: "f-1".to_string(),
            farmer_name: "Lakshmi".to_string(),
            name: name.to_string(),
            description: format!("Fresh {name} from the farm"),
            category: category.to_string(),
            price_per_unit: Money::from_rupees(rupees),
            available_quantity: 10,
            unit: Unit::Kg,
            location_text: "Pune".to_string(),
            lat: None,
            lng: None,
            is_high_demand: high_demand,
            is_active: true,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<Product> {
        let mut inactive = product("Okra", "Vegetables", 30, false);
        inactive.is_active = false;
        vec![
            product("Tomatoes", "Vegetables", 40, false),
            product("Mangoes", "Fruits", 200, true),
            product("Wheat", "Grains", 35, false),
            inactive,
        ]
    }

    fn names(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_returns_active_only() {
        let products = catalog();
        let result = ListingFilter::default().apply(&products);
        assert_eq!(names(result), vec!["Tomatoes", "Mangoes", "Wheat"]);
    }

    #[test]
    fn test_query_matches_name_or_description() {
        let products = catalog();
        let filter = ListingFilter {
            query: "MANGO".to_string(),
            ..Default::default()
        };
        assert_eq!(names(filter.apply(&products)), vec!["Mangoes"]);

        let filter = ListingFilter {
            query: "from the farm".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&products).len(), 3);
    }

    #[test]
    fn test_category_and_price_filters() {
        let products = catalog();
        let filter = ListingFilter {
            category: Some("Vegetables".to_string()),
            ..Default::default()
        };
        assert_eq!(names(filter.apply(&products)), vec!["Tomatoes"]);

        let filter = ListingFilter {
            max_price: Some(Money::from_rupees(40)),
            ..Default::default()
        };
        assert_eq!(names(filter.apply(&products)), vec!["Tomatoes", "Wheat"]);
    }

    #[test]
    fn test_listing_card_includes_surcharges() {
        let mango = product("Mangoes", "Fruits", 200, true);
        let card = listing_card(&mango, 10.0).unwrap();
        assert_eq!(card.display_price, Money::from_rupees(220));
        assert!(card.includes_fees);

        let wheat = product("Wheat", "Grains", 35, false);
        let card = listing_card(&wheat, 4.0).unwrap();
        assert_eq!(card.display_price, Money::from_rupees(35));
        assert!(!card.includes_fees);
        assert!(card.in_stock);
    }

    #[test]
    fn test_listing_card_rejects_negative_distance() {
        let wheat = product("Wheat", "Grains", 35, false);
        assert_eq!(listing_card(&wheat, -2.0).unwrap_err().field(), "distance_km");
    }
}
