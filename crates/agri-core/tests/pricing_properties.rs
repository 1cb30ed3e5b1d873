//! Property tests for the pricing engine.

use agri_core::money::Money;
use agri_core::pricing::{
    demand_factor, distance_factor, format_currency, parse_currency, price_collection, price_item,
    quantity_from_decimal, ExactAmount, PriceableItem, PricingBreakdown,
};
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = PriceableItem> {
    (1i64..5_000_000, 1i64..1_000, any::<bool>())
        .prop_map(|(paise, qty, hd)| PriceableItem::new(Money::from_paise(paise), qty, hd))
}

fn wide_item_strategy() -> impl Strategy<Value = PriceableItem> {
    (1i64..=i64::MAX, 1i64..=i64::MAX, any::<bool>())
        .prop_map(|(paise, qty, hd)| PriceableItem::new(Money::from_paise(paise), qty, hd))
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn local_distances_have_no_surcharge(d in 0.0f64..=5.0) {
        prop_assert_eq!(distance_factor(d).unwrap().as_fraction(), 0.0);
    }

    #[test]
    fn regional_distances_cost_five_percent(d in 5.0f64..=15.0) {
        prop_assume!(d > 5.0);
        prop_assert_eq!(distance_factor(d).unwrap().as_fraction(), 0.05);
    }

    #[test]
    fn long_haul_distances_cost_ten_percent(d in 15.0f64..1.0e7) {
        prop_assume!(d > 15.0);
        prop_assert_eq!(distance_factor(d).unwrap().as_fraction(), 0.10);
    }

    #[test]
    fn negative_distance_is_rejected(d in -1.0e7f64..0.0) {
        prop_assume!(d < 0.0);
        let err = distance_factor(d).unwrap_err();
        prop_assert_eq!(err.field(), "distance_km");
        prop_assert!(price_item(Money::from_rupees(1), 1, d, false).is_err());
        prop_assert!(price_collection(&[], d).is_err());
    }

    #[test]
    fn price_item_matches_formula(
        paise in 1i64..10_000_000,
        qty in 1i64..1_000,
        d in 0.0f64..100.0,
        hd in any::<bool>(),
    ) {
        let charged = price_item(Money::from_paise(paise), qty, d, hd).unwrap();
        let multiplier = 1.0 + distance_factor(d).unwrap().as_fraction() + demand_factor(hd).as_fraction();
        let expected = (paise as f64 / 100.0) * qty as f64 * multiplier;
        prop_assert!(relative_eq(charged.as_rupees(), expected), "{} vs {}", charged.as_rupees(), expected);
        prop_assert!(charged > ExactAmount::ZERO);
    }

    #[test]
    fn price_item_increases_with_price_and_quantity(
        paise in 1i64..1_000_000,
        extra in 1i64..1_000_000,
        qty in 1i64..500,
        more in 1i64..500,
        d in 0.0f64..50.0,
        hd in any::<bool>(),
    ) {
        let base = price_item(Money::from_paise(paise), qty, d, hd).unwrap();
        let pricier = price_item(Money::from_paise(paise + extra), qty, d, hd).unwrap();
        let larger = price_item(Money::from_paise(paise), qty + more, d, hd).unwrap();
        prop_assert!(pricier > base);
        prop_assert!(larger > base);
    }

    #[test]
    fn price_item_never_decreases_with_distance(
        paise in 1i64..1_000_000,
        qty in 1i64..500,
        d1 in 0.0f64..50.0,
        d2 in 0.0f64..50.0,
        hd in any::<bool>(),
    ) {
        let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let near_total = price_item(Money::from_paise(paise), qty, near, hd).unwrap();
        let far_total = price_item(Money::from_paise(paise), qty, far, hd).unwrap();
        prop_assert!(far_total >= near_total);
    }

    #[test]
    fn collection_is_exact_sum_in_any_order(
        items in prop::collection::vec(item_strategy(), 0..20),
        d in 0.0f64..40.0,
    ) {
        let total = price_collection(&items, d).unwrap();

        let summed = items
            .iter()
            .map(|i| price_item(i.base_price, i.quantity, d, i.is_high_demand).unwrap())
            .try_fold(ExactAmount::ZERO, ExactAmount::checked_add);
        prop_assert_eq!(Some(total), summed);

        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(price_collection(&reversed, d).unwrap(), total);

        let mut rotated = items.clone();
        if !rotated.is_empty() {
            let mid = rotated.len() / 2;
            rotated.rotate_left(mid);
        }
        prop_assert_eq!(price_collection(&rotated, d).unwrap(), total);

        let breakdown = PricingBreakdown::compute(&items, d).unwrap();
        prop_assert_eq!(breakdown.total, total);
        let parts = breakdown
            .base_subtotal
            .checked_add(breakdown.delivery_fee)
            .and_then(|sum| sum.checked_add(breakdown.demand_fee));
        prop_assert_eq!(parts, Some(total));
    }

    #[test]
    fn empty_collection_is_zero(d in 0.0f64..1.0e6) {
        prop_assert_eq!(price_collection(&[], d).unwrap(), ExactAmount::ZERO);
    }

    #[test]
    fn non_positive_inputs_are_rejected(
        bad_paise in -1_000_000i64..=0,
        bad_qty in -1_000i64..=0,
        d in 0.0f64..40.0,
    ) {
        let err = price_item(Money::from_paise(bad_paise), 1, d, false).unwrap_err();
        prop_assert_eq!(
            err.field(),
            "base_price"
        );
        let err = price_item(Money::from_rupees(10), bad_qty, d, false).unwrap_err();
        prop_assert_eq!(
            err.field(),
            "quantity"
        );
    }

    #[test]
    fn fractional_quantities_are_rejected(whole in 0i64..1_000, frac in 0.01f64..0.99) {
        let err = quantity_from_decimal(whole as f64 + frac).unwrap_err();
        prop_assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn formatted_amount_parses_back_within_a_paisa(
        paise in 1i64..100_000_000,
        qty in 1i64..1_000,
        d in 0.0f64..40.0,
        hd in any::<bool>(),
    ) {
        let amount = price_item(Money::from_paise(paise), qty, d, hd).unwrap();
        let text = format_currency(amount);

        let fraction = text.rsplit('.').next().unwrap_or_default();
        prop_assert_eq!(fraction.len(), 2);

        let parsed = parse_currency(&text).unwrap();
        prop_assert!((parsed.as_rupees_f64() - amount.as_rupees()).abs() <= 0.01);
    }
}

proptest! {
    #[test]
    fn breakdown_fails_exactly_when_collection_fails(
        items in prop::collection::vec(wide_item_strategy(), 0..4),
        d in 0.0f64..40.0,
    ) {
        let collected = price_collection(&items, d);
        let computed = PricingBreakdown::compute(&items, d);
        prop_assert_eq!(computed.is_err(), collected.is_err());
        if let (Ok(breakdown), Ok(total)) = (computed, collected) {
            prop_assert_eq!(breakdown.total, total);
        }
    }

    #[test]
    fn large_amounts_format_and_parse_back(
        paise in (i64::MAX / 2)..=i64::MAX,
        d in 0.0f64..=5.0,
    ) {
        let amount = price_item(Money::from_paise(paise), 1, d, false).unwrap();
        let parsed = parse_currency(&format_currency(amount)).unwrap();
        prop_assert_eq!(parsed, Money::from_paise(paise));
    }

    #[test]
    fn lines_past_the_paise_range_are_rejected(
        paise in (i64::MAX / 2 + 1)..=i64::MAX,
        qty in 2i64..=i64::MAX,
        d in 0.0f64..40.0,
        hd in any::<bool>(),
    ) {
        let err = price_item(Money::from_paise(paise), qty, d, hd).unwrap_err();
        prop_assert_eq!(err.field(), "line_total");
    }
}

#[test]
fn range_limit_scenarios() {
    let top = price_item(Money::from_paise(i64::MAX), 1, 0.0, false).unwrap();
    assert_eq!(top, ExactAmount::MAX);
    assert_eq!(parse_currency(&format_currency(top)).unwrap(), Money::from_paise(i64::MAX));

    let breakdown =
        PricingBreakdown::compute(&[PriceableItem::new(Money::from_paise(i64::MAX), 1, false)], 0.0).unwrap();
    assert_eq!(breakdown.total, top);
    assert!(breakdown.delivery_fee.is_zero());

    let err = price_item(Money::from_paise(i64::MAX), 2, 0.0, false).unwrap_err();
    assert_eq!(err.field(), "line_total");

    let huge = [PriceableItem::new(Money::from_paise(i64::MAX), 1_000_000_000_000_000, false)];
    assert!(price_collection(&huge, 10.0).is_err());
    assert!(PricingBreakdown::compute(&huge, 10.0).is_err());
}

#[test]
fn concrete_scenarios() {
    let r = Money::from_rupees;

    assert_eq!(format_currency(price_item(r(100), 2, 3.0, false).unwrap()), "₹200.00");
    assert_eq!(format_currency(price_item(r(100), 2, 10.0, false).unwrap()), "₹210.00");
    assert_eq!(format_currency(price_item(r(100), 2, 20.0, true).unwrap()), "₹230.00");

    let cart = [
        PriceableItem::new(r(50), 1, false),
        PriceableItem::new(r(200), 1, true),
    ];
    assert_eq!(format_currency(price_collection(&cart, 10.0).unwrap()), "₹272.50");

    assert!(price_item(r(0), 1, 1.0, false).is_err());

    assert_eq!(distance_factor(5.0).unwrap().as_fraction(), 0.0);
    assert_eq!(distance_factor(5.0001).unwrap().as_fraction(), 0.05);
    assert_eq!(distance_factor(15.0).unwrap().as_fraction(), 0.05);
    assert_eq!(distance_factor(15.0001).unwrap().as_fraction(), 0.10);
}
