//! Quote gateway: partner authentication around the calculator.
//!
//! Callers hand in a request (or a raw form) together with their API token.
//! The gateway rejects unknown tokens, prices the request against the
//! configured catalog and records one log line per quote.

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;

use super::calculators::calculate_price_with;
use super::catalog::RateCatalog;
use super::requests::{PricingForm, PricingRequest};
use super::responses::PricingResponse;

/// Shared token for local development and demos
pub const DEV_TOKEN: &str = "gnet_dev_token";

pub const UNAUTHORIZED: &str = "Unauthorized: Invalid API token";

#[derive(Debug, Clone)]
enum CatalogSource {
    Builtin(&'static RateCatalog),
    File(RateCatalog),
}

/// Authenticating front door for price quotes
#[derive(Debug, Clone)]
pub struct QuoteGateway {
    tokens: Vec<String>,
    catalog: CatalogSource,
}

impl QuoteGateway {
    /// Build a gateway from configuration.
    ///
    /// Loads the replacement rate file when one is configured, otherwise
    /// checks that the built-in catalog is usable.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = match &config.rate_catalog_path {
            Some(path) => {
                let catalog = RateCatalog::load(path)?;
                info!(
                    path = %path.display(),
                    vehicles = catalog.vehicles.len(),
                    "Loaded rate catalog"
                );
                CatalogSource::File(catalog)
            }
            None => {
                let catalog = RateCatalog::builtin()
                    .map_err(|e| AppError::Catalog(e.clone()))
                    .context("built-in rate catalog")?;
                CatalogSource::Builtin(catalog)
            }
        };

        let mut tokens: Vec<String> = config.api_token.iter().cloned().collect();
        if config.allow_dev_token {
            tokens.push(DEV_TOKEN.to_string());
        }
        if tokens.is_empty() {
            warn!("No API tokens configured; every quote request will be rejected");
        }

        Ok(Self { tokens, catalog })
    }

    /// Gateway over an explicit catalog and token list
    pub fn with_catalog(catalog: RateCatalog, tokens: Vec<String>) -> Self {
        Self {
            tokens,
            catalog: CatalogSource::File(catalog),
        }
    }

    pub fn catalog(&self) -> &RateCatalog {
        match &self.catalog {
            CatalogSource::Builtin(catalog) => *catalog,
            CatalogSource::File(catalog) => catalog,
        }
    }

    fn is_authorized(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.tokens.iter().any(|valid| valid == t))
    }

    /// Price a request for an authenticated caller.
    pub fn get_pricing(&self, request: &PricingRequest, token: Option<&str>) -> PricingResponse {
        if !self.is_authorized(token) {
            warn!(
                vehicle_type = %request.vehicle_type,
                has_token = token.is_some(),
                "Rejected pricing request"
            );
            return PricingResponse::failure(UNAUTHORIZED);
        }

        let result = calculate_price_with(self.catalog(), request);

        info!(
            timestamp = %Utc::now().to_rfc3339(),
            service_type = request.service_type.as_str(),
            vehicle_type = %request.vehicle_type,
            total_price = %result.total_price,
            success = result.success,
            "Pricing request"
        );

        result
    }

    /// Price a raw form submission, using the token it carries.
    pub fn submit_form(&self, mut form: PricingForm) -> PricingResponse {
        let token = form.token.take();
        let request = form.into_request();
        self.get_pricing(&request, token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::catalog::AirportCode;
    use crate::pricing::requests::{DayType, ServiceType, TripType};
    use rust_decimal_macros::dec;

    fn gateway() -> QuoteGateway {
        QuoteGateway::from_config(&Config {
            api_token: Some("partner-secret".to_string()),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_accepts_configured_and_dev_tokens() {
        let gateway = gateway();
        let request = PricingRequest::new(ServiceType::PointToPoint, "sedan");

        for token in ["partner-secret", DEV_TOKEN] {
            let response = gateway.get_pricing(&request, Some(token));
            assert!(response.success, "token {}", token);
            assert_eq!(response.total_price, dec!(155.00));
        }
    }

    #[test]
    fn test_rejects_missing_or_unknown_token() {
        let gateway = gateway();
        let request = PricingRequest::new(ServiceType::PointToPoint, "sedan");

        for token in [None, Some("guess"), Some("")] {
            let response = gateway.get_pricing(&request, token);
            assert!(!response.success);
            assert_eq!(response.error.as_deref(), Some(UNAUTHORIZED));
            assert!(response.breakdown.is_empty());
        }
    }

    #[test]
    fn test_dev_token_can_be_disabled() {
        let gateway = QuoteGateway::from_config(&Config {
            allow_dev_token: false,
            ..Config::default()
        })
        .unwrap();
        let request = PricingRequest::new(ServiceType::Hourly, "sedan");

        let response = gateway.get_pricing(&request, Some(DEV_TOKEN));
        assert_eq!(response.error.as_deref(), Some(UNAUTHORIZED));
    }

    #[test]
    fn test_submit_form_uses_form_defaults() {
        let form = PricingForm {
            token: Some(DEV_TOKEN.to_string()),
            ..Default::default()
        };
        // hourly, sedan, 3 hours, weekday
        let response = gateway().submit_form(form);
        assert!(response.success);
        assert_eq!(response.total_price, dec!(270.00));
    }

    #[test]
    fn test_submit_form_without_token() {
        let form = PricingForm {
            service_type: Some("airport".to_string()),
            ..Default::default()
        };
        let response = gateway().submit_form(form);
        assert_eq!(response.error.as_deref(), Some(UNAUTHORIZED));
    }

    #[test]
    fn test_custom_catalog_is_used() {
        let mut catalog = RateCatalog::builtin().unwrap().clone();
        catalog
            .vehicles
            .get_mut("sedan")
            .unwrap()
            .airport_rates
            .as_mut()
            .unwrap()
            .insert(AirportCode::Richmond, dec!(110));
        let gateway = QuoteGateway::with_catalog(catalog, vec!["t".to_string()]);

        let request = PricingRequest::new(ServiceType::Airport, "sedan")
            .airport(AirportCode::Richmond, TripType::OneWay)
            .day_type(DayType::Holiday);
        let response = gateway.get_pricing(&request, Some("t"));
        assert_eq!(response.total_price, dec!(110.00));
    }

    #[test]
    fn test_missing_rate_file_fails_startup() {
        let err = QuoteGateway::from_config(&Config {
            rate_catalog_path: Some("/nonexistent/rates.json".into()),
            ..Config::default()
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("reading rate catalog"));
    }
}
