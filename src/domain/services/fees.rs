//! Fee attribution.
//!
//! Uses rust_decimal end to end. Line amounts (subtotal, discounts) are settled
//! to the cent as soon as they are known; fee arithmetic keeps full precision
//! and is rounded only when the breakdown is assembled.

use rust_decimal::prelude::*;
use tracing::warn;

use crate::domain::error::EngineError;
use crate::domain::models::fee::{DiscountType, FeeConfig, FeeMode, GiftCard, PriceBreakdown, PromoCode};

const DECIMAL_PLACES: u32 = 2;

/// Half-up to the cent, always carrying two decimal places.
fn settle(value: Decimal) -> Decimal {
    to_cents(value, RoundingStrategy::MidpointAwayFromZero)
}

fn to_cents(value: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(DECIMAL_PLACES, strategy);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

fn promo_amount(promo: &PromoCode, subtotal: Decimal) -> Decimal {
    let raw = match promo.discount_type {
        DiscountType::Percentage => percent_of(subtotal, promo.discount_value),
        DiscountType::Fixed => promo.discount_value,
    };
    settle(raw).min(subtotal)
}

/// A gift card never spends more than its balance, so partial cents round down.
fn gift_card_amount(card: &GiftCard, remaining: Decimal) -> Decimal {
    to_cents(card.remaining_amount, RoundingStrategy::ToZero).min(remaining)
}

struct Fees {
    platform: Decimal,
    processor: Decimal,
    customer_total: Decimal,
    merchant: Decimal,
}

/// The customer pays the discounted ticket; fees come out of the payout.
fn absorb(discounted: Decimal, config: &FeeConfig) -> Fees {
    let platform = settle(percent_of(discounted, config.platform_fee_percent));
    let processor = settle(percent_of(discounted, config.processor_fee_percent) + config.processor_fee_fixed);
    let net = discounted - platform - processor;

    if net < Decimal::ZERO {
        warn!(
            discounted = %discounted,
            platform_fee = %platform,
            processor_fee = %processor,
            "fees exceed the discounted subtotal, clamping merchant payout to zero"
        );
    }

    Fees {
        platform,
        processor,
        customer_total: discounted,
        merchant: net.max(Decimal::ZERO),
    }
}

/// The processor takes its cut from the amount actually charged, so the total
/// solves `total = discounted + platform + total * p + fixed`, i.e.
/// `total = (discounted + platform + fixed) / (1 - p)`.
fn pass_to_customer(discounted: Decimal, config: &FeeConfig) -> Fees {
    let platform = percent_of(discounted, config.platform_fee_percent);
    let p = config.processor_fee_percent / Decimal::ONE_HUNDRED;
    let base = discounted + platform + config.processor_fee_fixed;
    let total = base / (Decimal::ONE - p);
    let processor = total - discounted - platform;

    Fees {
        platform: settle(platform),
        processor: settle(processor),
        // Rounding up keeps the processor's real cut out of the merchant's share.
        customer_total: to_cents(total, RoundingStrategy::ToPositiveInfinity),
        merchant: discounted,
    }
}

pub fn compute_breakdown(
    subtotal: Decimal,
    config: &FeeConfig,
    promo: Option<&PromoCode>,
    gift_card: Option<&GiftCard>,
) -> Result<PriceBreakdown, EngineError> {
    config.validate()?;
    if subtotal < Decimal::ZERO {
        return Err(EngineError::input(format!("subtotal {subtotal} is negative")));
    }
    if let Some(promo) = promo {
        promo.validate()?;
    }
    if let Some(card) = gift_card {
        card.validate()?;
    }

    let subtotal = settle(subtotal);
    let promo_discount = promo.map_or(Decimal::ZERO, |p| promo_amount(p, subtotal));
    let after_promo = subtotal - promo_discount;
    let gift_card_discount = gift_card.map_or(Decimal::ZERO, |g| gift_card_amount(g, after_promo));
    let discounted = after_promo - gift_card_discount;

    // Nothing is run through a card, so no processor or platform cut applies.
    let fees = if discounted.is_zero() {
        Fees {
            platform: Decimal::ZERO,
            processor: Decimal::ZERO,
            customer_total: Decimal::ZERO,
            merchant: Decimal::ZERO,
        }
    } else {
        match config.mode {
            FeeMode::Absorb => absorb(discounted, config),
            FeeMode::PassToCustomer => pass_to_customer(discounted, config),
        }
    };

    Ok(PriceBreakdown {
        subtotal,
        platform_fee: settle(fees.platform),
        processor_fee: settle(fees.processor),
        promo_discount: settle(promo_discount),
        gift_card_discount: settle(gift_card_discount),
        customer_total: settle(fees.customer_total),
        merchant_receives: settle(fees.merchant),
        currency: config.currency.clone(),
        fee_label: config.fee_label.clone(),
        show_fee_breakdown: config.show_fee_breakdown,
        mode: config.mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn config(mode: FeeMode) -> FeeConfig {
        FeeConfig {
            mode,
            platform_fee_percent: d("1.29"),
            processor_fee_percent: d("2.9"),
            processor_fee_fixed: d("0.30"),
            fee_label: "Booking fee".to_string(),
            show_fee_breakdown: true,
            currency: "usd".to_string(),
        }
    }

    fn promo(kind: DiscountType, value: &str) -> PromoCode {
        PromoCode {
            code: "SPRING".to_string(),
            discount_type: kind,
            discount_value: d(value),
        }
    }

    fn gift(balance: &str) -> GiftCard {
        GiftCard {
            code: "GC-1".to_string(),
            remaining_amount: d(balance),
        }
    }

    #[test]
    fn absorb_reference_vector() {
        let b = compute_breakdown(d("100"), &config(FeeMode::Absorb), None, None).unwrap();
        assert_eq!(b.platform_fee, d("1.29"));
        assert_eq!(b.processor_fee, d("3.20"));
        assert_eq!(b.customer_total, d("100.00"));
        assert_eq!(b.merchant_receives, d("95.51"));
        assert_eq!(b.surfaced_fee(), Decimal::ZERO);
    }

    #[test]
    fn pass_to_customer_reference_vector() {
        let b = compute_breakdown(d("100"), &config(FeeMode::PassToCustomer), None, None).unwrap();
        // 101.59 / 0.971 = 104.6240...
        assert_eq!(b.customer_total, d("104.63"));
        assert_eq!(b.platform_fee, d("1.29"));
        assert_eq!(b.processor_fee, d("3.33"));
        assert_eq!(b.merchant_receives, d("100.00"));
        assert_eq!(b.surfaced_fee(), d("4.62"));
    }

    #[test]
    fn amounts_always_carry_cents() {
        let b = compute_breakdown(d("100"), &config(FeeMode::PassToCustomer), None, None).unwrap();
        assert_eq!(b.subtotal.to_string(), "100.00");
        assert_eq!(b.merchant_receives.to_string(), "100.00");
        assert_eq!(b.promo_discount.to_string(), "0.00");
        assert_eq!(b.customer_total.scale(), 2);
    }

    #[test]
    fn ties_round_half_up() {
        let mut cfg = config(FeeMode::Absorb);
        cfg.platform_fee_percent = d("1");
        cfg.processor_fee_percent = Decimal::ZERO;
        cfg.processor_fee_fixed = Decimal::ZERO;

        // 1% of 10.50 is exactly 0.105.
        let b = compute_breakdown(d("10.50"), &cfg, None, None).unwrap();
        assert_eq!(b.platform_fee, d("0.11"));
        assert_eq!(b.merchant_receives, d("10.39"));
    }

    #[test]
    fn pass_to_customer_applies_discounts_before_the_solve() {
        let p = promo(DiscountType::Percentage, "20");
        let b = compute_breakdown(d("100"), &config(FeeMode::PassToCustomer), Some(&p), None).unwrap();
        // base = 80 + 1.032 + 0.30 = 81.332; 81.332 / 0.971 = 83.7610...
        assert_eq!(b.promo_discount, d("20.00"));
        assert_eq!(b.platform_fee, d("1.03"));
        assert_eq!(b.processor_fee, d("2.73"));
        assert_eq!(b.customer_total, d("83.77"));
        assert_eq!(b.merchant_receives, d("80.00"));
    }

    #[test]
    fn absorb_fees_follow_the_charged_amount() {
        let p = promo(DiscountType::Fixed, "50");
        let b = compute_breakdown(d("100"), &config(FeeMode::Absorb), Some(&p), None).unwrap();
        assert_eq!(b.customer_total, d("50.00"));
        assert_eq!(b.platform_fee, d("0.65"));
        assert_eq!(b.processor_fee, d("1.75"));
        assert_eq!(b.merchant_receives, d("47.60"));
    }

    #[test]
    fn absorb_clamps_merchant_payout_at_zero() {
        let b = compute_breakdown(d("0.20"), &config(FeeMode::Absorb), None, None).unwrap();
        assert_eq!(b.customer_total, d("0.20"));
        assert_eq!(b.processor_fee, d("0.31"));
        assert_eq!(b.merchant_receives, d("0.00"));
    }

    #[test]
    fn gift_card_is_capped_at_the_post_promo_balance() {
        let p = promo(DiscountType::Percentage, "10");
        let g = gift("100");
        for mode in [FeeMode::Absorb, FeeMode::PassToCustomer] {
            let b = compute_breakdown(d("50"), &config(mode), Some(&p), Some(&g)).unwrap();
            assert_eq!(b.promo_discount, d("5.00"));
            assert_eq!(b.gift_card_discount, d("45.00"));
            assert_eq!(b.customer_total, d("0.00"));
            assert_eq!(b.platform_fee, d("0.00"));
            assert_eq!(b.processor_fee, d("0.00"));
            assert_eq!(b.merchant_receives, d("0.00"));
        }
    }

    #[test]
    fn partial_gift_card_reduces_the_charge() {
        let g = gift("30.005");
        let b = compute_breakdown(d("100"), &config(FeeMode::Absorb), None, Some(&g)).unwrap();
        assert_eq!(b.gift_card_discount, d("30.00"));
        assert_eq!(b.customer_total, d("70.00"));
    }

    #[test]
    fn fixed_promo_larger_than_subtotal_is_capped() {
        let p = promo(DiscountType::Fixed, "80");
        let b = compute_breakdown(d("25"), &config(FeeMode::PassToCustomer), Some(&p), None).unwrap();
        assert_eq!(b.promo_discount, d("25.00"));
        assert_eq!(b.customer_total, d("0.00"));
        assert_eq!(b.merchant_receives, d("0.00"));
    }

    #[test]
    fn rejects_bad_inputs() {
        let cfg = config(FeeMode::Absorb);
        assert!(matches!(
            compute_breakdown(d("-1"), &cfg, None, None),
            Err(EngineError::InputValidation(_))
        ));

        let p = promo(DiscountType::Percentage, "150");
        assert!(compute_breakdown(d("10"), &cfg, Some(&p), None).is_err());

        let p = promo(DiscountType::Fixed, "-5");
        assert!(compute_breakdown(d("10"), &cfg, Some(&p), None).is_err());

        assert!(compute_breakdown(d("10"), &cfg, None, Some(&gift("-1"))).is_err());
    }

    #[test]
    fn rejects_bad_fee_config() {
        let mut cfg = config(FeeMode::PassToCustomer);
        cfg.processor_fee_percent = d("100");
        assert!(matches!(
            compute_breakdown(d("10"), &cfg, None, None),
            Err(EngineError::Configuration(_))
        ));

        let mut cfg = config(FeeMode::Absorb);
        cfg.platform_fee_percent = d("-0.5");
        assert!(compute_breakdown(d("10"), &cfg, None, None).is_err());

        let mut cfg = config(FeeMode::Absorb);
        cfg.platform_fee_percent = d("100.01");
        assert!(compute_breakdown(d("10"), &cfg, None, None).is_err());
    }

    fn grid() -> Vec<(Decimal, FeeConfig)> {
        let subtotals = ["0.01", "1.00", "9.99", "10.50", "33.33", "104.63", "999.99"];
        let platform = ["0", "1.29", "2.5", "5"];
        let processor = ["0", "2.9", "3.4", "10", "49.5", "99.9"];
        let fixed = ["0", "0.30"];

        let mut cases = Vec::new();
        for s in subtotals {
            for pf in platform {
                for pp in processor {
                    for fx in fixed {
                        let mut cfg = config(FeeMode::PassToCustomer);
                        cfg.platform_fee_percent = d(pf);
                        cfg.processor_fee_percent = d(pp);
                        cfg.processor_fee_fixed = d(fx);
                        cases.push((d(s), cfg));
                    }
                }
            }
        }
        cases
    }

    #[test]
    fn pass_to_customer_merchant_nets_the_discounted_subtotal() {
        let p = promo(DiscountType::Percentage, "15");
        for (subtotal, cfg) in grid() {
            let b = compute_breakdown(subtotal, &cfg, Some(&p), None).unwrap();
            assert_eq!(b.merchant_receives, b.subtotal - b.promo_discount - b.gift_card_discount);
        }
    }

    #[test]
    fn pass_to_customer_components_drift_at_most_one_cent() {
        let cent = d("0.01");
        for (subtotal, cfg) in grid() {
            let b = compute_breakdown(subtotal, &cfg, None, None).unwrap();
            let parts = b.subtotal + b.platform_fee + b.processor_fee;
            assert!((b.customer_total - parts).abs() <= cent, "{subtotal} {cfg:?} -> {b:?}");
        }
    }

    #[test]
    fn pass_to_customer_total_covers_the_real_processor_cut() {
        for (subtotal, cfg) in grid() {
            let b = compute_breakdown(subtotal, &cfg, None, None).unwrap();
            let real_processor = percent_of(b.customer_total, cfg.processor_fee_percent) + cfg.processor_fee_fixed;
            let platform = percent_of(b.subtotal, cfg.platform_fee_percent);
            assert!(b.customer_total - real_processor - platform >= b.subtotal);
        }
    }

    #[test]
    fn merchant_payout_is_never_negative() {
        for (subtotal, mut cfg) in grid() {
            for mode in [FeeMode::Absorb, FeeMode::PassToCustomer] {
                cfg.mode = mode;
                let b = compute_breakdown(subtotal, &cfg, None, None).unwrap();
                assert!(b.merchant_receives >= Decimal::ZERO);
                assert!(b.customer_total >= Decimal::ZERO);
            }
        }
    }
}
