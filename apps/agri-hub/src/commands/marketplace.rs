//! # Marketplace Commands
//!
//! The buyer-facing catalog: filter active listings and price one unit of
//! each at the buyer's delivery distance.

use std::collections::BTreeSet;

use agri_core::validation::validate_search_query;
use agri_core::{listing_card, Capability, DistanceBand, DistanceKm, ListingCard, ListingFilter, User};
use serde::Serialize;
use tracing::debug;

use super::authorize;
use crate::error::ApiResult;
use crate::state::{ConfigState, StoreState};

/// The marketplace grid at one distance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    /// Distance the cards were priced at, after clamping
    pub distance_km: f64,
    pub band: DistanceBand,
    pub band_label: &'static str,
    /// Categories of every active listing, for the filter dropdown
    pub categories: Vec<String>,
    pub cards: Vec<ListingCard>,
}

/// Lists active products matching `filter`, priced at `distance_km`.
///
/// `None` uses the configured default distance.
pub async fn browse(
    store: &StoreState,
    config: &ConfigState,
    user: &User,
    filter: ListingFilter,
    distance_km: Option<f64>,
) -> ApiResult<BrowseResponse> {
    debug!(user = %user.id, query = %filter.query, ?distance_km, "browse command");
    authorize(user, Capability::BrowseMarketplace)?;

    let filter = ListingFilter {
        query: validate_search_query(&filter.query)?,
        ..filter
    };
    let km = config.resolve_distance(distance_km)?;
    let band = DistanceKm::new(km)?.band();

    let products = store.products().list_active().await?;
    let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

    let cards = filter
        .apply(&products)
        .into_iter()
        .map(|p| listing_card(p, km))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(matches = cards.len(), "browse complete");

    Ok(BrowseResponse {
        distance_km: km,
        band,
        band_label: band.label(),
        categories: categories.into_iter().map(str::to_string).collect(),
        cards,
    })
}
