//! # Marketplace Walkthrough
//!
//! A scripted session against the seed dataset, one step per command:
//!
//! ```text
//!  Buyer                        Farmer                   Admin
//!  ─────                        ──────                   ─────
//!  browse "mango"
//!  add tomatoes, mangoes
//!  cart at 10 km / 25 km
//!  place order ───────────────► accept
//!                               complete ──────────────► mark paid
//!                               dashboard                dashboard
//!  mark paid ✗ (FORBIDDEN)
//! ```

use agri_core::{ListingFilter, User};
use agri_store::seed::{ADMIN_ID, BUYER_ID, FARMER_ID, MANGOES_ID, TOMATOES_ID};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::commands::{cart, dashboard, marketplace, order};
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, ConfigState, StoreState};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Seed user missing: {0}")]
    MissingUser(String),

    #[error("Unexpected outcome in step '{0}'")]
    Unexpected(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One step's title and its command output.
#[derive(Debug, Clone, Serialize)]
pub struct DemoStep {
    pub title: String,
    pub output: Value,
}

struct Script {
    steps: Vec<DemoStep>,
}

impl Script {
    fn record<T: Serialize>(&mut self, title: &str, output: &T) -> Result<(), DemoError> {
        info!(step = self.steps.len() + 1, title, "Walkthrough step");
        self.steps.push(DemoStep {
            title: title.to_string(),
            output: serde_json::to_value(output)?,
        });
        Ok(())
    }
}

async fn seed_user(store: &StoreState, id: &str) -> Result<User, DemoError> {
    store
        .users()
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| DemoError::MissingUser(id.to_string()))
}

/// Runs the walkthrough and returns every step's output.
///
/// Needs the seed dataset.
pub async fn walkthrough(
    store: &StoreState,
    cart: &CartState,
    config: &ConfigState,
) -> Result<Vec<DemoStep>, DemoError> {
    let buyer = seed_user(store, BUYER_ID).await?;
    let farmer = seed_user(store, FARMER_ID).await?;
    let admin = seed_user(store, ADMIN_ID).await?;
    let mut script = Script { steps: Vec::new() };

    let filter = ListingFilter {
        query: "mango".to_string(),
        ..Default::default()
    };
    let listings = marketplace::browse(store, config, &buyer, filter, None).await?;
    script.record("Buyer searches for mango", &listings)?;

    cart::add_to_cart(store, cart, config, &buyer, TOMATOES_ID, Some(3)).await?;
    cart::add_to_cart(store, cart, config, &buyer, MANGOES_ID, Some(1)).await?;
    let near = cart::get_cart(cart, config, &buyer, Some(10.0))?;
    script.record("Cart at 10 km", &near)?;
    let far = cart::get_cart(cart, config, &buyer, Some(25.0))?;
    script.record("Cart at 25 km", &far.summary)?;

    let placed = order::place_order(store, cart, config, &buyer, Some(10.0)).await?;
    script.record("Buyer places the order", &placed)?;

    let accepted = order::respond_to_order(store, &farmer, &placed.id, true).await?;
    script.record("Farmer accepts", &accepted)?;
    let completed = order::complete_order(store, &farmer, &placed.id).await?;
    script.record("Farmer marks it delivered", &completed)?;

    let paid = order::toggle_paid(store, &admin, &placed.id).await?;
    script.record("Admin marks it paid", &paid)?;

    let farmer_view = dashboard::farmer_stats(store, &farmer).await?;
    script.record("Farmer dashboard", &farmer_view)?;
    let admin_view = dashboard::admin_stats(store, &admin).await?;
    script.record("Admin dashboard", &admin_view)?;

    let title = "Buyer tries to mark an order paid";
    match order::toggle_paid(store, &buyer, &placed.id).await {
        Err(err) if err.code == ErrorCode::Forbidden => script.record(title, &err)?,
        Err(err) => return Err(err.into()),
        Ok(_) => return Err(DemoError::Unexpected(title.to_string())),
    }

    Ok(script.steps)
}
