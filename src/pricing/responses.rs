//! Response DTOs for price quotes.

use rust_decimal::Decimal;
use serde::Serialize;

/// One line of the service summary, e.g. "Hours" / "4 hours"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDetail {
    pub item: String,
    pub value: String,
}

impl ServiceDetail {
    pub fn new(item: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            value: value.into(),
        }
    }
}

/// Signed cost line; negative amounts are discounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdownItem {
    pub item: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl PriceBreakdownItem {
    pub fn new(item: impl Into<String>, amount: Decimal) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }

    pub fn is_discount(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// Quote returned to the caller.
///
/// Either a successful itemized quote, or a failure with empty lists, a zero
/// total and an error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub service_details: Vec<ServiceDetail>,
    pub breakdown: Vec<PriceBreakdownItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PricingResponse {
    pub fn quote(
        service_details: Vec<ServiceDetail>,
        breakdown: Vec<PriceBreakdownItem>,
        total_price: Decimal,
    ) -> Self {
        Self {
            service_details,
            breakdown,
            total_price,
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            service_details: vec![],
            breakdown: vec![],
            total_price: Decimal::ZERO,
            success: false,
            error: Some(message.into()),
        }
    }
}
