//! # Dynamic Pricing Engine
//!
//! Maps a cart's contents plus a delivery distance to the amount the buyer is
//! charged.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line_total = base_price_per_unit × quantity × multiplier               │
//! │                                                                         │
//! │  multiplier = 1 + distance_factor(distance_km) + demand_factor(flag)   │
//! │                                                                         │
//! │  distance_factor                     demand_factor                      │
//! │  ───────────────                     ─────────────                      │
//! │    d ≤ 5 km         → 0.00             high demand → 0.05               │
//! │    5 < d ≤ 15 km    → 0.05             normal      → 0.00               │
//! │    d > 15 km        → 0.10                                              │
//! │                                                                         │
//! │  Upper bounds are inclusive: 5 km is Local, 15 km is Regional.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exactness
//! Factors are basis points and prices are paise, so a line total is the
//! integer `paise × quantity × multiplier_bps`. [`ExactAmount`] keeps that
//! integer (1/10_000 of a paisa) through every sum, and rounding to paise
//! happens once, when the amount is formatted or persisted. Summation order
//! therefore never changes a cart total.
//!
//! ## Usage
//! ```rust
//! use agri_core::money::Money;
//! use agri_core::pricing::{format_currency, price_collection, price_item, PriceableItem};
//!
//! // ₹100/kg, 2 kg, 20 km away, high demand: 100 × 2 × 1.15
//! let line = price_item(Money::from_rupees(100), 2, 20.0, true).unwrap();
//! assert_eq!(format_currency(line), "₹230.00");
//!
//! let cart = [
//!     PriceableItem::new(Money::from_rupees(50), 1, false),
//!     PriceableItem::new(Money::from_rupees(200), 1, true),
//! ];
//! let total = price_collection(&cart, 10.0).unwrap();
//! assert_eq!(format_currency(total), "₹272.50");
//! ```
//!
//! Every operation is a pure function of its arguments: no shared state, no
//! I/O, safe to call from any number of threads at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::{Currency, Money};

// =============================================================================
// Constants
// =============================================================================

/// Basis points in a whole (1 bp = 0.0001).
pub const BPS_SCALE: u32 = 10_000;

/// Deliveries up to and including this distance carry no surcharge.
pub const LOCAL_DELIVERY_MAX_KM: f64 = 5.0;

/// Deliveries up to and including this distance carry the regional surcharge.
pub const REGIONAL_DELIVERY_MAX_KM: f64 = 15.0;

/// +5% for 5 < d ≤ 15 km.
pub const REGIONAL_SURCHARGE: Surcharge = Surcharge::from_bps(500);

/// +10% for d > 15 km.
pub const LONG_HAUL_SURCHARGE: Surcharge = Surcharge::from_bps(1_000);

/// +5% for listings flagged high-demand.
pub const HIGH_DEMAND_SURCHARGE: Surcharge = Surcharge::from_bps(500);

// =============================================================================
// Surcharge
// =============================================================================

/// A surcharge fraction in basis points.
///
/// `Surcharge::from_bps(500)` is the 0.05 factor.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Surcharge(u32);

impl Surcharge {
    /// No surcharge.
    pub const NONE: Surcharge = Surcharge(0);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Surcharge(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The factor as a decimal fraction (0.05 for 500 bps).
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }

    /// Whole percent, for labels like "Delivery Fee (5%)".
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.0 / 100
    }
}

impl Add for Surcharge {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Surcharge(self.0 + other.0)
    }
}

// =============================================================================
// Distance
// =============================================================================

/// Caller-to-supplier delivery distance in kilometres.
///
/// ## Invariant
/// Always finite and non-negative. The surrounding UI clamps its slider to
/// [1, 30] km, but the engine accepts any non-negative distance.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DistanceKm(f64);

impl DistanceKm {
    /// Validates a raw distance.
    ///
    /// ## Errors
    /// - `NotFinite` for NaN or ±∞
    /// - `MustNotBeNegative` for anything below zero
    pub fn new(km: f64) -> ValidationResult<Self> {
        if !km.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "distance_km".to_string(),
            });
        }
        if km < 0.0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "distance_km".to_string(),
            });
        }
        Ok(DistanceKm(km))
    }

    #[inline]
    pub fn km(&self) -> f64 {
        self.0
    }

    /// The delivery band this distance falls into.
    pub fn band(&self) -> DistanceBand {
        DistanceBand::for_distance(*self)
    }
}

impl TryFrom<f64> for DistanceKm {
    type Error = ValidationError;

    fn try_from(km: f64) -> Result<Self, Self::Error> {
        DistanceKm::new(km)
    }
}

impl From<DistanceKm> for f64 {
    fn from(distance: DistanceKm) -> Self {
        distance.0
    }
}

/// Delivery distance bands.
///
/// ```text
///   0 km          5 km                15 km
///   ├─────────────┤───────────────────┤──────────────────►
///        Local          Regional            LongHaul
///        +0%            +5%                 +10%
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    /// d ≤ 5 km
    Local,
    /// 5 < d ≤ 15 km
    Regional,
    /// d > 15 km
    LongHaul,
}

impl DistanceBand {
    pub fn for_distance(distance: DistanceKm) -> Self {
        let km = distance.km();
        if km <= LOCAL_DELIVERY_MAX_KM {
            DistanceBand::Local
        } else if km <= REGIONAL_DELIVERY_MAX_KM {
            DistanceBand::Regional
        } else {
            DistanceBand::LongHaul
        }
    }

    pub const fn surcharge(&self) -> Surcharge {
        match self {
            DistanceBand::Local => Surcharge::NONE,
            DistanceBand::Regional => REGIONAL_SURCHARGE,
            DistanceBand::LongHaul => LONG_HAUL_SURCHARGE,
        }
    }

    /// Hint shown under the distance selector.
    pub const fn label(&self) -> &'static str {
        match self {
            DistanceBand::Local => "No delivery surcharge",
            DistanceBand::Regional => "+5% delivery fee",
            DistanceBand::LongHaul => "+10% delivery fee",
        }
    }
}

// =============================================================================
// Multiplier
// =============================================================================

/// The single scalar applied to `base price × quantity`, in basis points.
///
/// ## Invariant
/// Always ≥ 10_000 (a factor of 1.0), because surcharges are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Multiplier(u32);

impl Multiplier {
    /// The neutral multiplier (1.0).
    pub const ONE: Multiplier = Multiplier(BPS_SCALE);

    /// `1 + distance + demand`.
    #[inline]
    pub const fn from_surcharges(distance: Surcharge, demand: Surcharge) -> Self {
        Multiplier(BPS_SCALE + distance.bps() + demand.bps())
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The multiplier as a decimal (1.15 for 11_500 bps).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::ONE
    }
}

// =============================================================================
// Exact Amount
// =============================================================================

/// A full-precision amount in units of 1/10_000 paisa.
///
/// Produced by the engine and summed without rounding. Convert with
/// [`ExactAmount::to_money`] only when the value leaves the engine.
///
/// Every value lies within the `i64` paise range: the engine rejects lines
/// and totals beyond it, and [`ExactAmount::checked_add`] refuses to leave it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactAmount(i128);

impl ExactAmount {
    pub const ZERO: ExactAmount = ExactAmount(0);

    /// `i64::MAX` paise.
    pub const MAX: ExactAmount = ExactAmount(i64::MAX as i128 * BPS_SCALE as i128);

    /// `i64::MIN` paise.
    pub const MIN: ExactAmount = ExactAmount(i64::MIN as i128 * BPS_SCALE as i128);

    /// Lifts a paise amount into exact units.
    #[inline]
    pub fn from_money(money: Money) -> Self {
        ExactAmount(money.paise() as i128 * BPS_SCALE as i128)
    }

    /// Raw units (1/10_000 paisa).
    #[inline]
    pub const fn units(&self) -> i128 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `None` when the sum would leave the `i64` paise range.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Self::from_units(self.0.checked_add(other.0)?)
    }

    fn from_units(units: i128) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&units)
            .then_some(ExactAmount(units))
    }

    /// Rounds half away from zero to whole paise.
    pub fn to_money(&self) -> Money {
        let scale = BPS_SCALE as i128;
        let mut paise = self.0 / scale;
        let remainder = self.0 % scale;
        if remainder.abs() * 2 >= scale {
            paise += self.0.signum();
        }
        // In range, a quotient of i64::MAX or i64::MIN leaves no remainder to
        // round, so the cast is lossless.
        Money::from_paise(paise as i64)
    }

    /// Fractional rupees. Comparison and display only.
    #[inline]
    pub fn as_rupees(&self) -> f64 {
        self.0 as f64 / (BPS_SCALE as f64 * 100.0)
    }
}

impl From<Money> for ExactAmount {
    fn from(money: Money) -> Self {
        ExactAmount::from_money(money)
    }
}

impl fmt::Display for ExactAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_money())
    }
}

// =============================================================================
// Priceable Item & Quote
// =============================================================================

/// One cart/order line as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceableItem {
    pub base_price: Money,
    pub quantity: i64,
    pub is_high_demand: bool,
}

impl PriceableItem {
    pub fn new(base_price: Money, quantity: i64, is_high_demand: bool) -> Self {
        PriceableItem {
            base_price,
            quantity,
            is_high_demand,
        }
    }
}

/// The priced result for one line.
///
/// `line_total == base_amount + delivery_fee() + demand_fee()` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub distance_surcharge: Surcharge,
    pub demand_surcharge: Surcharge,
    pub unit_multiplier: Multiplier,
    /// `base price × quantity`, before any surcharge.
    pub base_amount: ExactAmount,
    pub line_total: ExactAmount,
    pub currency: Currency,
}

impl PriceQuote {
    /// Portion of the line total due to delivery distance.
    pub fn delivery_fee(&self) -> ExactAmount {
        self.fee(self.distance_surcharge)
    }

    /// Portion of the line total due to the high-demand flag.
    pub fn demand_fee(&self) -> ExactAmount {
        self.fee(self.demand_surcharge)
    }

    // base_amount is gross × BPS_SCALE, so the division is exact and the
    // product never exceeds line_total.
    fn fee(&self, surcharge: Surcharge) -> ExactAmount {
        let gross = self.base_amount.units() / BPS_SCALE as i128;
        ExactAmount(gross * surcharge.bps() as i128)
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Surcharge fraction for a delivery distance.
///
/// ## Example
/// ```rust
/// use agri_core::pricing::distance_factor;
///
/// assert_eq!(distance_factor(5.0).unwrap().as_fraction(), 0.0);
/// assert_eq!(distance_factor(5.0001).unwrap().as_fraction(), 0.05);
/// assert_eq!(distance_factor(15.0).unwrap().as_fraction(), 0.05);
/// assert_eq!(distance_factor(15.0001).unwrap().as_fraction(), 0.10);
/// assert!(distance_factor(-1.0).is_err());
/// ```
pub fn distance_factor(distance_km: f64) -> ValidationResult<Surcharge> {
    Ok(DistanceKm::new(distance_km)?.band().surcharge())
}

/// Surcharge fraction for the high-demand flag.
#[inline]
pub const fn demand_factor(is_high_demand: bool) -> Surcharge {
    if is_high_demand {
        HIGH_DEMAND_SURCHARGE
    } else {
        Surcharge::NONE
    }
}

/// Prices one line and returns the charged amount.
///
/// ## Errors
/// `InvalidInput` naming the parameter:
/// - `base_price` when ≤ 0
/// - `quantity` when ≤ 0
/// - `distance_km` when negative or not finite
pub fn price_item(
    base_price: Money,
    quantity: i64,
    distance_km: f64,
    is_high_demand: bool,
) -> ValidationResult<ExactAmount> {
    Ok(quote_item(base_price, quantity, distance_km, is_high_demand)?.line_total)
}

/// Prices one line and returns the full quote (multiplier, fees, currency).
pub fn quote_item(
    base_price: Money,
    quantity: i64,
    distance_km: f64,
    is_high_demand: bool,
) -> ValidationResult<PriceQuote> {
    validate_line(base_price, quantity)?;
    let distance = DistanceKm::new(distance_km)?;
    quote_at(&PriceableItem::new(base_price, quantity, is_high_demand), distance)
}

/// Prices every item at the same distance and sums in input order.
///
/// The distance is validated once, up front, so an invalid distance fails
/// even for an empty slice. An empty slice at a valid distance is zero.
pub fn price_collection(items: &[PriceableItem], distance_km: f64) -> ValidationResult<ExactAmount> {
    let distance = DistanceKm::new(distance_km)?;
    items.iter().try_fold(ExactAmount::ZERO, |total, item| {
        let quote = quote_at(item, distance)?;
        total.checked_add(quote.line_total).ok_or_else(|| overflow("total"))
    })
}

/// Renders an amount with exactly two fraction digits, en-IN style.
///
/// Rounds to paise here and nowhere earlier. [`parse_currency`] reads the
/// string back to within one paisa.
pub fn format_currency(amount: ExactAmount) -> String {
    amount.to_money().to_string()
}

/// Inverse of [`format_currency`].
pub fn parse_currency(text: &str) -> ValidationResult<Money> {
    text.parse()
}

/// Converts a caller-entered quantity into the integer the engine prices.
///
/// ## Errors
/// - `NotFinite` for NaN or ±∞
/// - `NotAnInteger` for 2.5 and friends
/// - `MustBePositive` for 0 and below
pub fn quantity_from_decimal(value: f64) -> ValidationResult<i64> {
    let field = "quantity".to_string();
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive { field });
    }
    if value >= i64::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(value as i64)
}

fn validate_line(base_price: Money, quantity: i64) -> ValidationResult<()> {
    if !base_price.is_positive() {
        return Err(ValidationError::must_be_positive("base_price"));
    }
    if quantity <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }
    Ok(())
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX,
    }
}

fn quote_at(item: &PriceableItem, distance: DistanceKm) -> ValidationResult<PriceQuote> {
    validate_line(item.base_price, item.quantity)?;

    let distance_surcharge = distance.band().surcharge();
    let demand_surcharge = demand_factor(item.is_high_demand);
    let unit_multiplier = Multiplier::from_surcharges(distance_surcharge, demand_surcharge);

    let gross = (item.base_price.paise() as i128)
        .checked_mul(item.quantity as i128)
        .ok_or_else(|| overflow("line_total"))?;
    let base_amount = gross
        .checked_mul(BPS_SCALE as i128)
        .ok_or_else(|| overflow("line_total"))?;
    let line_total = gross
        .checked_mul(unit_multiplier.bps() as i128)
        .and_then(ExactAmount::from_units)
        .ok_or_else(|| overflow("line_total"))?;

    Ok(PriceQuote {
        distance_surcharge,
        demand_surcharge,
        unit_multiplier,
        base_amount: ExactAmount(base_amount),
        line_total,
        currency: Currency::Inr,
    })
}

// =============================================================================
// Cart Breakdown
// =============================================================================

/// Per-line pricing of a whole cart, with fees attributed line by line.
///
/// ## Fee Attribution
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart @ 10 km: Onions ₹50 (normal) + Mangoes ₹200 (high demand)        │
/// │                                                                         │
/// │  Line        base      delivery (5%)   demand (5%)     total            │
/// │  Onions      50.00     2.50            0.00            52.50            │
/// │  Mangoes     200.00    10.00           10.00           220.00           │
/// │  ─────────────────────────────────────────────────────────────          │
/// │  Sum         250.00    12.50           10.00           272.50           │
/// │                                                                         │
/// │  base_subtotal + delivery_fee + demand_fee == total, exactly.          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Dividing the total by one blended `1 + distance + demand` factor, as
/// [`PricingBreakdown::blended_subtotal_estimate`] does, charges the demand
/// surcharge to every line as soon as one line is high-demand. It is kept
/// only to compare against screens that still show that figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub distance: DistanceKm,
    pub band: DistanceBand,
    pub lines: Vec<PriceQuote>,
    pub base_subtotal: ExactAmount,
    pub delivery_fee: ExactAmount,
    pub demand_fee: ExactAmount,
    pub total: ExactAmount,
}

impl PricingBreakdown {
    /// Quotes every item at `distance_km`, in input order.
    pub fn compute(items: &[PriceableItem], distance_km: f64) -> ValidationResult<Self> {
        let distance = DistanceKm::new(distance_km)?;
        let lines = items
            .iter()
            .map(|item| quote_at(item, distance))
            .collect::<ValidationResult<Vec<_>>>()?;

        let mut breakdown = PricingBreakdown {
            distance,
            band: distance.band(),
            lines,
            base_subtotal: ExactAmount::ZERO,
            delivery_fee: ExactAmount::ZERO,
            demand_fee: ExactAmount::ZERO,
            total: ExactAmount::ZERO,
        };

        for line in &breakdown.lines {
            breakdown.base_subtotal = add_checked(breakdown.base_subtotal, line.base_amount)?;
            breakdown.delivery_fee = add_checked(breakdown.delivery_fee, line.delivery_fee())?;
            breakdown.demand_fee = add_checked(breakdown.demand_fee, line.demand_fee())?;
            breakdown.total = add_checked(breakdown.total, line.line_total)?;
        }

        Ok(breakdown)
    }

    pub fn has_high_demand_items(&self) -> bool {
        self.lines.iter().any(|l| !l.demand_surcharge.is_none())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `total / (1 + distance + (any high demand ? 0.05 : 0))`.
    ///
    /// Known approximation: only correct when every line shares the same
    /// demand flag. Prefer [`PricingBreakdown::base_subtotal`].
    pub fn blended_subtotal_estimate(&self) -> ExactAmount {
        let blended_demand = if self.has_high_demand_items() {
            HIGH_DEMAND_SURCHARGE
        } else {
            Surcharge::NONE
        };
        let blended = Multiplier::from_surcharges(self.band.surcharge(), blended_demand);
        ExactAmount(self.total.units() * BPS_SCALE as i128 / blended.bps() as i128)
    }
}

fn add_checked(a: ExactAmount, b: ExactAmount) -> ValidationResult<ExactAmount> {
    a.checked_add(b).ok_or_else(|| overflow("total"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rupees(r: i64) -> Money {
        Money::from_rupees(r)
    }

    #[test]
    fn test_distance_bands_boundaries() {
        assert_eq!(distance_factor(0.0).unwrap(), Surcharge::NONE);
        assert_eq!(distance_factor(5.0).unwrap(), Surcharge::NONE);
        assert_eq!(distance_factor(5.0001).unwrap(), REGIONAL_SURCHARGE);
        assert_eq!(distance_factor(15.0).unwrap(), REGIONAL_SURCHARGE);
        assert_eq!(distance_factor(15.0001).unwrap(), LONG_HAUL_SURCHARGE);
        assert_eq!(distance_factor(500.0).unwrap(), LONG_HAUL_SURCHARGE);
    }

    #[test]
    fn test_distance_rejects_negative_and_non_finite() {
        let err = distance_factor(-0.5).unwrap_err();
        assert_eq!(err.field(), "distance_km");
        assert!(matches!(err, ValidationError::MustNotBeNegative { .. }));

        assert!(matches!(
            distance_factor(f64::NAN).unwrap_err(),
            ValidationError::NotFinite { .. }
        ));
        assert!(distance_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_demand_factor() {
        assert_eq!(demand_factor(true).as_fraction(), 0.05);
        assert_eq!(demand_factor(false).as_fraction(), 0.0);
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(DistanceKm::new(3.0).unwrap().band().label(), "No delivery surcharge");
        assert_eq!(DistanceKm::new(10.0).unwrap().band().label(), "+5% delivery fee");
        assert_eq!(DistanceKm::new(20.0).unwrap().band().label(), "+10% delivery fee");
        assert_eq!(DistanceBand::LongHaul.surcharge().percent(), 10);
    }

    #[test]
    fn test_price_item_scenarios() {
        // 100 × 2 × 1.00
        assert_eq!(price_item(rupees(100), 2, 3.0, false).unwrap().to_money(), rupees(200));
        // 100 × 2 × 1.05
        assert_eq!(price_item(rupees(100), 2, 10.0, false).unwrap().to_money(), rupees(210));
        // 100 × 2 × 1.15
        assert_eq!(price_item(rupees(100), 2, 20.0, true).unwrap().to_money(), rupees(230));
    }

    #[test]
    fn test_price_collection_scenario() {
        let items = [
            PriceableItem::new(rupees(50), 1, false),
            PriceableItem::new(rupees(200), 1, true),
        ];
        let total = price_collection(&items, 10.0).unwrap();
        assert_eq!(total.to_money(), Money::from_paise(27_250));
        assert_eq!(format_currency(total), "₹272.50");
    }

    #[test]
    fn test_price_collection_empty_is_zero() {
        assert_eq!(price_collection(&[], 7.0).unwrap(), ExactAmount::ZERO);
        assert!(price_collection(&[], -1.0).is_err());
    }

    #[test]
    fn test_price_item_invalid_inputs() {
        let err = price_item(Money::zero(), 1, 1.0, false).unwrap_err();
        assert_eq!(err.field(), "base_price");

        let err = price_item(Money::from_paise(-100), 1, 1.0, false).unwrap_err();
        assert_eq!(err.field(), "base_price");

        let err = price_item(rupees(10), 0, 1.0, false).unwrap_err();
        assert_eq!(err.field(), "quantity");

        let err = price_item(rupees(10), -3, 1.0, false).unwrap_err();
        assert_eq!(err.field(), "quantity");

        let err = price_item(rupees(10), 1, -0.01, false).unwrap_err();
        assert_eq!(err.field(), "distance_km");
    }

    #[test]
    fn test_price_collection_stops_at_first_invalid_item() {
        let items = [
            PriceableItem::new(rupees(50), 1, false),
            PriceableItem::new(rupees(20), 0, false),
        ];
        let err = price_collection(&items, 2.0).unwrap_err();
        assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn test_overflow_is_invalid_input() {
        let err = price_item(Money::from_paise(i64::MAX), i64::MAX, 20.0, true).unwrap_err();
        assert_eq!(err.field(), "line_total");
    }

    #[test]
    fn test_line_beyond_paise_range_is_rejected() {
        // Fits in i128 but not in i64 paise.
        let err = price_item(Money::from_paise(i64::MAX), 2, 0.0, false).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "line_total".to_string(),
                min: 0,
                max: i64::MAX,
            }
        );

        // Exactly i64::MAX paise is still representable.
        let top = price_item(Money::from_paise(i64::MAX), 1, 0.0, false).unwrap();
        assert_eq!(top, ExactAmount::MAX);
        assert_eq!(top.to_money(), Money::from_paise(i64::MAX));

        // The 5% surcharge pushes an otherwise valid line past the range.
        let err = price_item(Money::from_paise(i64::MAX), 1, 10.0, false).unwrap_err();
        assert_eq!(err.field(), "line_total");
    }

    #[test]
    fn test_total_beyond_paise_range_is_rejected() {
        let half = Money::from_paise(i64::MAX / 2 + 1);
        let items = [
            PriceableItem::new(half, 1, false),
            PriceableItem::new(half, 1, false),
        ];
        assert_eq!(price_collection(&items, 1.0).unwrap_err().field(), "total");
        assert_eq!(PricingBreakdown::compute(&items, 1.0).unwrap_err().field(), "total");
    }

    #[test]
    fn test_breakdown_at_huge_quantity_does_not_panic() {
        let items = [PriceableItem::new(Money::from_paise(i64::MAX), 1_000_000_000_000_000, false)];
        let collected = price_collection(&items, 10.0);
        let breakdown = PricingBreakdown::compute(&items, 10.0);
        assert_eq!(collected.unwrap_err().field(), "line_total");
        assert_eq!(breakdown.unwrap_err().field(), "line_total");
    }

    #[test]
    fn test_fees_near_range_limit_are_exact() {
        // 10^18 paise × 1.15 stays below i64::MAX paise.
        let items = [PriceableItem::new(Money::from_paise(1_000_000_000_000_000_000), 1, true)];
        let breakdown = PricingBreakdown::compute(&items, 20.0).unwrap();
        assert_eq!(breakdown.delivery_fee.to_money().paise(), 100_000_000_000_000_000);
        assert_eq!(breakdown.demand_fee.to_money().paise(), 50_000_000_000_000_000);
        assert_eq!(breakdown.total.to_money().paise(), 1_150_000_000_000_000_000);
        assert_eq!(breakdown.total, price_collection(&items, 20.0).unwrap());
    }

    #[test]
    fn test_checked_add_stays_in_paise_range() {
        assert_eq!(ExactAmount::MAX.checked_add(ExactAmount(1)), None);
        assert_eq!(ExactAmount::MIN.checked_add(ExactAmount(-1)), None);
        assert_eq!(
            ExactAmount::MAX.checked_add(ExactAmount::MIN),
            Some(ExactAmount::from_money(Money::from_paise(-1)))
        );
    }

    #[test]
    fn test_quote_reports_multiplier_and_currency() {
        let quote = quote_item(rupees(100), 2, 20.0, true).unwrap();
        assert_eq!(quote.unit_multiplier.bps(), 11_500);
        assert!((quote.unit_multiplier.as_f64() - 1.15).abs() < 1e-12);
        assert_eq!(quote.currency, Currency::Inr);
        assert_eq!(quote.delivery_fee().to_money(), rupees(20));
        assert_eq!(quote.demand_fee().to_money(), rupees(10));
        let parts = quote
            .base_amount
            .checked_add(quote.delivery_fee())
            .and_then(|sum| sum.checked_add(quote.demand_fee()));
        assert_eq!(parts, Some(quote.line_total));
    }

    #[test]
    fn test_accumulation_does_not_round_per_line() {
        // ₹0.01 × 1 × 1.05 = 1.05 paise per line; 10 lines = 10.5 paise → 11.
        // Rounding each line first would give 10.
        let items = vec![PriceableItem::new(Money::from_paise(1), 1, false); 10];
        let total = price_collection(&items, 10.0).unwrap();
        assert_eq!(total.units(), 105_000);
        assert_eq!(total.to_money().paise(), 11);
    }

    #[test]
    fn test_to_money_rounds_half_up() {
        assert_eq!(ExactAmount(4_999).to_money().paise(), 0);
        assert_eq!(ExactAmount(5_000).to_money().paise(), 1);
        assert_eq!(ExactAmount(-5_000).to_money().paise(), -1);
        assert_eq!(ExactAmount::from_money(rupees(3)).to_money(), rupees(3));
        assert_eq!(ExactAmount::MAX.to_money(), Money::from_paise(i64::MAX));
        assert_eq!(ExactAmount::MIN.to_money(), Money::from_paise(i64::MIN));
        assert_eq!(ExactAmount(ExactAmount::MAX.units() - 1).to_money(), Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_quantity_from_decimal() {
        assert_eq!(quantity_from_decimal(3.0).unwrap(), 3);
        assert!(matches!(
            quantity_from_decimal(2.5).unwrap_err(),
            ValidationError::NotAnInteger { .. }
        ));
        assert!(matches!(
            quantity_from_decimal(0.0).unwrap_err(),
            ValidationError::MustBePositive { .. }
        ));
        assert!(quantity_from_decimal(-4.0).is_err());
        assert!(quantity_from_decimal(f64::NAN).is_err());
        assert_eq!(quantity_from_decimal(1e30).unwrap_err().field(), "quantity");
        // 2^63 is the first float past i64::MAX.
        assert!(matches!(
            quantity_from_decimal(9_223_372_036_854_775_808.0).unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
        assert_eq!(quantity_from_decimal(9_007_199_254_740_992.0).unwrap(), 1 << 53);
    }

    #[test]
    fn test_breakdown_attributes_demand_fee_per_line() {
        let items = [
            PriceableItem::new(rupees(50), 1, false),
            PriceableItem::new(rupees(200), 1, true),
        ];
        let breakdown = PricingBreakdown::compute(&items, 10.0).unwrap();

        assert_eq!(breakdown.band, DistanceBand::Regional);
        assert_eq!(breakdown.base_subtotal.to_money(), rupees(250));
        assert_eq!(breakdown.delivery_fee.to_money(), Money::from_paise(1_250));
        assert_eq!(breakdown.demand_fee.to_money(), rupees(10));
        assert_eq!(breakdown.total.to_money(), Money::from_paise(27_250));
        let parts = breakdown
            .base_subtotal
            .checked_add(breakdown.delivery_fee)
            .and_then(|sum| sum.checked_add(breakdown.demand_fee));
        assert_eq!(parts, Some(breakdown.total));
        assert!(breakdown.has_high_demand_items());

        // 272.50 / 1.10 = 247.727..., which understates the real ₹250 subtotal.
        let blended = breakdown.blended_subtotal_estimate().to_money();
        assert_eq!(blended, Money::from_paise(24_773));
        assert_ne!(blended, breakdown.base_subtotal.to_money());
    }

    #[test]
    fn test_blended_estimate_matches_when_flags_agree() {
        let items = [
            PriceableItem::new(rupees(40), 2, true),
            PriceableItem::new(rupees(60), 1, true),
        ];
        let breakdown = PricingBreakdown::compute(&items, 20.0).unwrap();
        assert_eq!(breakdown.blended_subtotal_estimate(), breakdown.base_subtotal);
    }

    #[test]
    fn test_distance_serde_validates() {
        let d: DistanceKm = serde_json::from_str("12.5").unwrap();
        assert_eq!(d.km(), 12.5);
        assert!(serde_json::from_str::<DistanceKm>("-2").is_err());
        assert_eq!(serde_json::to_string(&d).unwrap(), "12.5");
    }
}
