//! HTML rendering of quote results

use askama::Template;
use rust_decimal::Decimal;

use crate::error::Result;

use super::calculators::round_money;
use super::responses::{PricingResponse, ServiceDetail};

const CONTACT_PHONE: &str = "(804) 972-4550";
const CONTACT_EMAIL: &str = "info@tntlimousine.com";

/// Breakdown line ready for display
struct BreakdownLine {
    item: String,
    amount: String,
    is_discount: bool,
}

#[derive(Template)]
#[template(path = "pricing/results.html")]
struct PricingResultsTemplate<'a> {
    has_error: bool,
    error: &'a str,
    details: &'a [ServiceDetail],
    lines: Vec<BreakdownLine>,
    total: String,
    contact_phone: &'a str,
    contact_email: &'a str,
}

/// Format as dollars with exactly two decimals, e.g. "$1045.00"
pub fn format_money(amount: Decimal) -> String {
    let mut cents = round_money(amount, 2);
    cents.rescale(2);
    format!("${}", cents)
}

/// Signed display amount: "+$20.00" for charges, "-$30.00" for discounts
pub fn format_signed(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}", format_money(amount.abs()))
    } else {
        format!("+{}", format_money(amount))
    }
}

/// Render a quote (or its error) as an HTML fragment.
pub fn render_results(response: &PricingResponse) -> Result<String> {
    let template = PricingResultsTemplate {
        has_error: !response.success,
        error: response
            .error
            .as_deref()
            .unwrap_or("An error occurred calculating the price"),
        details: &response.service_details,
        lines: response
            .breakdown
            .iter()
            .map(|line| BreakdownLine {
                item: line.item.clone(),
                amount: format_signed(line.amount),
                is_discount: line.is_discount(),
            })
            .collect(),
        total: format_money(response.total_price),
        contact_phone: CONTACT_PHONE,
        contact_email: CONTACT_EMAIL,
    };

    Ok(template.render()?)
}
