//! Price quoting for TNT Limousine services.
//!
//! The calculator is a pure function over a request and the rate catalog.
//! The gateway, form intake and renderer are the glue a web front end calls.

pub mod calculators;
pub mod catalog;
pub mod render;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_price, calculate_price_with, round_money, PricingError};
pub use catalog::{AirportCode, CatalogError, RateCatalog, VehicleRates};
pub use render::render_results;
pub use requests::{DayType, PricingForm, PricingRequest, ServiceType, TripType};
pub use responses::{PriceBreakdownItem, PricingResponse, ServiceDetail};
pub use services::QuoteGateway;
