//! # Product Commands
//!
//! Farmer listing management, plus the admin's moderation switch.
//!
//! Listings are never deleted: orders keep snapshots of them, so removal is
//! a deactivation that hides the listing from the marketplace.

use agri_core::validation::{validate_new_product, validate_product_update};
use agri_core::{Capability, NewProduct, Product, ProductUpdate, User};
use agri_store::generate_product_id;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::authorize;
use crate::error::{ApiError, ApiResult};
use crate::state::StoreState;

/// Creates an active listing owned by `user`.
pub async fn create_listing(store: &StoreState, user: &User, form: NewProduct) -> ApiResult<Product> {
    debug!(user = %user.id, name = %form.name, "create_listing command");
    authorize(user, Capability::ManageOwnListings)?;
    validate_new_product(&form)?;

    let now = Utc::now();
    let product = Product {
        id: generate_product_id(),
        farmer_id: user.id.clone(),
        farmer_name: user.name.clone(),
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        category: form.category.trim().to_string(),
        price_per_unit: form.price_per_unit,
        available_quantity: form.available_quantity,
        unit: form.unit,
        location_text: form.location_text.trim().to_string(),
        lat: form.lat,
        lng: form.lng,
        is_high_demand: form.is_high_demand,
        is_active: true,
        image_url: form.image_url,
        created_at: now,
        updated_at: now,
    };

    let product = store.products().insert(&product).await?;
    info!(id = %product.id, farmer = %user.id, price = %product.price_per_unit, "Listing created");
    Ok(product)
}

/// Loads a listing the user may edit: their own, or any for an admin.
async fn editable_listing(store: &StoreState, user: &User, product_id: &str) -> ApiResult<Product> {
    let product = store
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    if user.can(Capability::ManageAllListings) {
        return Ok(product);
    }
    authorize(user, Capability::ManageOwnListings)?;
    if product.farmer_id != user.id {
        warn!(user = %user.id, product_id, "Edit of another farmer's listing");
        return Err(ApiError::forbidden(format!(
            "{} is not listed by {}",
            product.name, user.name
        )));
    }
    Ok(product)
}

/// Applies a partial edit.
///
/// A price change does not touch carts (their prices are frozen) or
/// placed orders (their totals are fixed).
pub async fn update_listing(
    store: &StoreState,
    user: &User,
    product_id: &str,
    update: ProductUpdate,
) -> ApiResult<Product> {
    debug!(user = %user.id, product_id, "update_listing command");
    editable_listing(store, user, product_id).await?;
    validate_product_update(&update)?;

    let product = store.products().update(product_id, &update).await?;
    info!(id = %product.id, by = %user.id, "Listing updated");
    Ok(product)
}

/// Shows or hides a listing in the marketplace.
pub async fn set_listing_active(
    store: &StoreState,
    user: &User,
    product_id: &str,
    active: bool,
) -> ApiResult<Product> {
    debug!(user = %user.id, product_id, active, "set_listing_active command");
    let mut product = editable_listing(store, user, product_id).await?;

    store.products().set_active(product_id, active).await?;
    product.is_active = active;
    info!(id = %product_id, by = %user.id, active, "Listing visibility changed");
    Ok(product)
}

pub async fn deactivate_listing(store: &StoreState, user: &User, product_id: &str) -> ApiResult<Product> {
    set_listing_active(store, user, product_id, false).await
}

/// Listings the user manages: a farmer's own, or every listing for an
/// admin. Inactive listings are included.
pub async fn list_listings(store: &StoreState, user: &User) -> ApiResult<Vec<Product>> {
    debug!(user = %user.id, "list_listings command");

    if user.can(Capability::ManageAllListings) {
        return Ok(store.products().list_all().await?);
    }
    authorize(user, Capability::ManageOwnListings)?;
    Ok(store.products().list_by_farmer(&user.id).await?)
}
