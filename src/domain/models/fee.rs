use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;

/// Who carries the platform and processor fees.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeeMode {
    /// Fees are added on top of the ticket price; the merchant nets the full ticket.
    PassToCustomer,
    /// Fees come out of the merchant's payout; the customer pays the ticket price.
    Absorb,
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_fee_label() -> String {
    "Service fee".to_string()
}

/// Percentages are on the 0–100 scale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeeConfig {
    pub mode: FeeMode,
    pub platform_fee_percent: Decimal,
    pub processor_fee_percent: Decimal,
    pub processor_fee_fixed: Decimal,
    #[serde(default = "default_fee_label")]
    pub fee_label: String,
    #[serde(default)]
    pub show_fee_breakdown: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl FeeConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.platform_fee_percent < Decimal::ZERO
            || self.processor_fee_percent < Decimal::ZERO
            || self.processor_fee_fixed < Decimal::ZERO
        {
            return Err(EngineError::config("fee amounts and percentages must not be negative"));
        }
        if self.platform_fee_percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::config(format!(
                "platform_fee_percent {} exceeds 100",
                self.platform_fee_percent
            )));
        }
        // The inverse solve divides by (1 - p).
        if self.processor_fee_percent >= Decimal::ONE_HUNDRED {
            return Err(EngineError::config(format!(
                "processor_fee_percent {} must be below 100",
                self.processor_fee_percent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// An already-validated promo code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PromoCode {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
}

impl PromoCode {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.discount_value < Decimal::ZERO {
            return Err(EngineError::input(format!("promo {} has a negative value", self.code)));
        }
        if self.discount_type == DiscountType::Percentage && self.discount_value > Decimal::ONE_HUNDRED {
            return Err(EngineError::input(format!(
                "promo {} discounts more than 100%",
                self.code
            )));
        }
        Ok(())
    }
}

/// An already-validated gift card and its balance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GiftCard {
    pub code: String,
    pub remaining_amount: Decimal,
}

impl GiftCard {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.remaining_amount < Decimal::ZERO {
            return Err(EngineError::input(format!(
                "gift card {} has a negative balance",
                self.code
            )));
        }
        Ok(())
    }
}

/// Itemized amounts for one order. Every amount carries two decimal places.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub platform_fee: Decimal,
    pub processor_fee: Decimal,
    pub promo_discount: Decimal,
    pub gift_card_discount: Decimal,
    pub customer_total: Decimal,
    pub merchant_receives: Decimal,
    pub currency: String,
    pub fee_label: String,
    pub show_fee_breakdown: bool,
    pub mode: FeeMode,
}

impl PriceBreakdown {
    /// The single fee line shown to customers when the breakdown is hidden.
    pub fn surfaced_fee(&self) -> Decimal {
        match self.mode {
            FeeMode::PassToCustomer => self.platform_fee + self.processor_fee,
            FeeMode::Absorb => Decimal::ZERO,
        }
    }
}
