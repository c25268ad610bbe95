//! The quote engine: pure fare computation shared by every surface that
//! prices a job. No I/O and no clock reads; the dispatch time comes in on
//! the request, so identical inputs always produce identical results.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};

use crate::entities::{DiscountKind, QuoteResult, RateConfig, ServiceRequest, ServiceType};
use crate::error::{
    invalid_charge_error, invalid_discount_error, invalid_input_error, missing_base_fee_error,
    Error,
};

const AFTER_HOURS_START: u32 = 18;
const AFTER_HOURS_END: u32 = 6;

/// Computes a fully itemized quote from a service request and the current
/// rate configuration.
pub fn compute_quote(request: &ServiceRequest, config: &RateConfig) -> Result<QuoteResult, Error> {
    let base_fee = base_fee_for(request, config)?;
    let distance_cost = request.route.total_distance * config.rate_per_km;

    price_onward(base_fee, distance_cost, base_fee + distance_cost, request, config)
}

/// Manual override path: staff replace the computed base-plus-distance
/// figure with `new_base` and the rest of the formula chain is re-derived.
/// Shares the surcharge/discount/fuel logic with `compute_quote` so the two
/// paths cannot drift apart.
pub fn recompute_from_base(
    new_base: f64,
    request: &ServiceRequest,
    config: &RateConfig,
) -> Result<QuoteResult, Error> {
    if new_base < 0.0 {
        return Err(invalid_input_error());
    }

    // The reported breakdown keeps the distance component at its tariff
    // value; the base fee absorbs the override so the two still sum to the
    // overridden pre-surcharge subtotal.
    let distance_cost = request.route.total_distance * config.rate_per_km;
    let base_fee = new_base - distance_cost;

    price_onward(base_fee, distance_cost, new_base, request, config)
}

fn base_fee_for(request: &ServiceRequest, config: &RateConfig) -> Result<f64, Error> {
    match config.base_fees.get(&request.service_type) {
        Some(fee) => Ok(*fee),
        None => config
            .base_fees
            .get(&ServiceType::Other)
            .copied()
            .ok_or_else(|| missing_base_fee_error(request.service_type.name())),
    }
}

fn price_onward(
    base_fee: f64,
    distance_cost: f64,
    pre_surcharge_subtotal: f64,
    request: &ServiceRequest,
    config: &RateConfig,
) -> Result<QuoteResult, Error> {
    let after_hours_applied = is_after_hours(&request.dispatch_time);
    let weekend_applied = is_weekend(&request.dispatch_time);

    // Premiums stack multiplicatively when both apply.
    let mut multiplier = 1.0;
    if after_hours_applied {
        multiplier *= config.after_hours_multiplier;
    }
    if weekend_applied {
        multiplier *= config.weekend_multiplier;
    }

    let adjusted_subtotal = pre_surcharge_subtotal * multiplier;
    let surcharge_amount = adjusted_subtotal - pre_surcharge_subtotal;

    let mut manual_charges_total = 0.0;
    for charge in &request.manual_charges {
        if charge.amount < 0.0 {
            return Err(invalid_charge_error(&charge.description));
        }
        manual_charges_total += charge.amount;
    }

    let subtotal = adjusted_subtotal + manual_charges_total;

    let discount_amount = match &request.discount {
        Some(discount) => {
            if discount.value < 0.0 {
                return Err(invalid_discount_error());
            }

            let raw = match discount.kind {
                DiscountKind::Percent => subtotal * discount.value / 100.0,
                DiscountKind::Fixed => discount.value,
            };

            // A discount can never invert the sign of the final price.
            raw.min(subtotal)
        }
        None => 0.0,
    };

    // Rounded once, at the end, so intermediate steps carry full precision.
    let final_price = round2(subtotal - discount_amount);

    let consumption = request
        .vehicle_consumption
        .unwrap_or(config.default_consumption_per_100km);
    let fuel_used = request.route.total_distance * consumption / 100.0;
    let fuel_cost = fuel_used * config.fuel_price_per_litre;
    let gross_profit = final_price - fuel_cost;
    let profit_margin_percent = if final_price > 0.0 {
        gross_profit / final_price * 100.0
    } else {
        0.0
    };

    Ok(QuoteResult {
        base_fee,
        distance_cost,
        after_hours_applied,
        weekend_applied,
        surcharge_amount,
        manual_charges_total,
        subtotal,
        discount_amount,
        final_price,
        fuel_used,
        fuel_cost,
        gross_profit,
        profit_margin_percent,
    })
}

fn is_after_hours(dispatch_time: &DateTime<FixedOffset>) -> bool {
    let hour = dispatch_time.hour();

    hour >= AFTER_HOURS_START || hour < AFTER_HOURS_END
}

fn is_weekend(dispatch_time: &DateTime<FixedOffset>) -> bool {
    matches!(dispatch_time.weekday(), Weekday::Sat | Weekday::Sun)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Discount, ManualCharge, Route, RouteLeg, ServiceType};

    fn route(distance: f64) -> Route {
        Route::new(
            vec![RouteLeg {
                from: "yard".into(),
                to: "breakdown".into(),
                distance,
            }],
            false,
        )
        .unwrap()
    }

    fn request(distance: f64, dispatch_time: &str) -> ServiceRequest {
        ServiceRequest {
            service_type: ServiceType::Tow,
            dispatch_time: dispatch_time.parse().unwrap(),
            route: route(distance),
            vehicle_consumption: None,
            manual_charges: vec![],
            discount: None,
        }
    }

    // Tuesday afternoon, no premiums.
    const WEEKDAY_NOON: &str = "2026-08-18T14:00:00+02:00";
    // Saturday night, both premiums.
    const SATURDAY_NIGHT: &str = "2026-08-22T22:00:00+02:00";

    #[test]
    fn weekday_afternoon_has_no_premiums() {
        let result = compute_quote(&request(25.0, WEEKDAY_NOON), &RateConfig::default()).unwrap();

        assert_eq!(result.base_fee, 300.0);
        assert_eq!(result.distance_cost, 375.0);
        assert!(!result.after_hours_applied);
        assert!(!result.weekend_applied);
        assert_eq!(result.surcharge_amount, 0.0);
        assert_eq!(result.final_price, 675.0);
    }

    #[test]
    fn saturday_night_stacks_both_premiums() {
        let result = compute_quote(&request(25.0, SATURDAY_NIGHT), &RateConfig::default()).unwrap();

        assert!(result.after_hours_applied);
        assert!(result.weekend_applied);
        // 675 * 1.5 * 1.2
        assert_eq!(result.final_price, 1215.0);
        assert!((result.surcharge_amount - 540.0).abs() < 1e-9);
    }

    #[test]
    fn after_hours_alone_applies_one_multiplier() {
        let result =
            compute_quote(&request(25.0, "2026-08-18T22:00:00+02:00"), &RateConfig::default())
                .unwrap();

        assert!(result.after_hours_applied);
        assert!(!result.weekend_applied);
        assert_eq!(result.final_price, 1012.5);
    }

    #[test]
    fn early_morning_counts_as_after_hours() {
        let result =
            compute_quote(&request(25.0, "2026-08-18T05:59:00+02:00"), &RateConfig::default())
                .unwrap();

        assert!(result.after_hours_applied);
    }

    #[test]
    fn six_in_the_morning_is_daytime() {
        let result =
            compute_quote(&request(25.0, "2026-08-18T06:00:00+02:00"), &RateConfig::default())
                .unwrap();

        assert!(!result.after_hours_applied);
    }

    #[test]
    fn weekend_alone_applies_one_multiplier() {
        let result =
            compute_quote(&request(25.0, "2026-08-22T14:00:00+02:00"), &RateConfig::default())
                .unwrap();

        assert!(!result.after_hours_applied);
        assert!(result.weekend_applied);
        assert_eq!(result.final_price, 810.0);
    }

    #[test]
    fn premiums_use_the_timestamp_local_offset() {
        // 23:30 UTC on Friday is 01:30 Saturday at +02:00.
        let result =
            compute_quote(&request(25.0, "2026-08-22T01:30:00+02:00"), &RateConfig::default())
                .unwrap();

        assert!(result.after_hours_applied);
        assert!(result.weekend_applied);
    }

    #[test]
    fn zero_distance_route_is_a_pure_call_out_fee() {
        let result = compute_quote(&request(0.0, WEEKDAY_NOON), &RateConfig::default()).unwrap();

        assert_eq!(result.distance_cost, 0.0);
        assert_eq!(result.final_price, 300.0);
        assert_eq!(result.fuel_cost, 0.0);
    }

    #[test]
    fn manual_charges_are_added_after_surcharges() {
        let mut req = request(25.0, SATURDAY_NIGHT);
        req.manual_charges = vec![
            ManualCharge {
                description: "winching".into(),
                amount: 200.0,
            },
            ManualCharge {
                description: "prep to tow".into(),
                amount: 50.0,
            },
        ];

        let result = compute_quote(&req, &RateConfig::default()).unwrap();

        assert_eq!(result.manual_charges_total, 250.0);
        // Charges are not multiplied by the premium.
        assert_eq!(result.final_price, 1465.0);
    }

    #[test]
    fn negative_manual_charge_is_rejected() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.manual_charges = vec![ManualCharge {
            description: "goodwill".into(),
            amount: -50.0,
        }];

        let err = compute_quote(&req, &RateConfig::default()).unwrap_err();

        assert_eq!(err.code, 102);
    }

    #[test]
    fn percent_discount_comes_off_the_subtotal() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.discount = Some(Discount {
            kind: DiscountKind::Percent,
            value: 10.0,
        });

        let result = compute_quote(&req, &RateConfig::default()).unwrap();

        assert_eq!(result.discount_amount, 67.5);
        assert_eq!(result.final_price, 607.5);
    }

    #[test]
    fn fixed_discount_is_clamped_to_the_subtotal() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.discount = Some(Discount {
            kind: DiscountKind::Fixed,
            value: 10_000.0,
        });

        let result = compute_quote(&req, &RateConfig::default()).unwrap();

        assert_eq!(result.discount_amount, result.subtotal);
        assert_eq!(result.final_price, 0.0);
        assert_eq!(result.profit_margin_percent, 0.0);
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.discount = Some(Discount {
            kind: DiscountKind::Percent,
            value: -5.0,
        });

        let err = compute_quote(&req, &RateConfig::default()).unwrap_err();

        assert_eq!(err.code, 103);
    }

    #[test]
    fn unknown_service_type_falls_back_to_other() {
        let mut config = RateConfig::default();
        config.base_fees.remove(&ServiceType::Tow);

        let result = compute_quote(&request(0.0, WEEKDAY_NOON), &config).unwrap();

        assert_eq!(result.base_fee, 200.0);
    }

    #[test]
    fn missing_base_fee_without_fallback_is_an_error() {
        let mut config = RateConfig::default();
        config.base_fees.remove(&ServiceType::Tow);
        config.base_fees.remove(&ServiceType::Other);

        let err = compute_quote(&request(0.0, WEEKDAY_NOON), &config).unwrap_err();

        assert_eq!(err.code, 104);
    }

    #[test]
    fn fuel_and_profit_breakdown() {
        let result = compute_quote(&request(25.0, SATURDAY_NIGHT), &RateConfig::default()).unwrap();

        assert_eq!(result.fuel_used, 3.75);
        assert_eq!(result.fuel_cost, 91.875);
        assert!((result.gross_profit - 1123.125).abs() < 1e-9);
        assert!((result.profit_margin_percent - 1123.125 / 1215.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn vehicle_consumption_overrides_the_default() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.vehicle_consumption = Some(30.0);

        let result = compute_quote(&req, &RateConfig::default()).unwrap();

        assert_eq!(result.fuel_used, 7.5);
    }

    #[test]
    fn final_price_is_rounded_to_cents_once() {
        let mut req = request(25.0, WEEKDAY_NOON);
        req.manual_charges = vec![ManualCharge {
            description: "thirds".into(),
            amount: 10.0 / 3.0,
        }];

        let result = compute_quote(&req, &RateConfig::default()).unwrap();

        assert_eq!(result.final_price, 678.33);
        // The unrounded subtotal keeps full precision.
        assert!((result.subtotal - (675.0 + 10.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let req = request(25.0, SATURDAY_NIGHT);
        let config = RateConfig::default();

        assert_eq!(
            compute_quote(&req, &config).unwrap(),
            compute_quote(&req, &config).unwrap()
        );
    }

    #[test]
    fn recompute_from_base_matches_compute_quote_when_bases_agree() {
        let req = request(25.0, SATURDAY_NIGHT);
        let config = RateConfig::default();

        let computed = compute_quote(&req, &config).unwrap();
        let overridden = recompute_from_base(675.0, &req, &config).unwrap();

        assert_eq!(computed, overridden);
    }

    #[test]
    fn recompute_from_base_reprices_the_whole_chain() {
        let req = request(25.0, SATURDAY_NIGHT);

        let result = recompute_from_base(1000.0, &req, &RateConfig::default()).unwrap();

        // 1000 * 1.5 * 1.2
        assert_eq!(result.final_price, 1800.0);
        assert_eq!(result.base_fee + result.distance_cost, 1000.0);
    }

    #[test]
    fn negative_base_override_is_rejected() {
        let req = request(25.0, WEEKDAY_NOON);

        let err = recompute_from_base(-1.0, &req, &RateConfig::default()).unwrap_err();

        assert_eq!(err.code, 101);
    }
}
