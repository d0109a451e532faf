//! Core price calculation.
//!
//! Pure functions over a request and a rate catalog - no I/O, no logging.
//! Every failure is folded into a `success: false` response.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::catalog::{RateCatalog, VehicleRates};
use super::requests::{DayType, PricingRequest, ServiceType, TripType, DEFAULT_HOURS};
use super::responses::{PriceBreakdownItem, PricingResponse, ServiceDetail};

/// Round trips to the airport are billed at 1.8x the one-way rate
const AIRPORT_ROUND_TRIP_MULTIPLIER: Decimal = dec!(1.8);

/// Trips at or above this many hours get the long-trip discount
const LONG_TRIP_HOURS: u32 = 6;

/// Pickups from 23:00 up to 06:00 carry the after-hour fee
const AFTER_HOURS_START: u32 = 23;
const AFTER_HOURS_END: u32 = 6;

/// Reasons a quote cannot be produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid vehicle type")]
    InvalidVehicle,

    #[error("Airport transfer not available for this vehicle")]
    AirportUnavailable,

    #[error("Rate catalog unavailable: {0}")]
    Catalog(String),

    #[error("Price calculation overflowed computing {0}")]
    Arithmetic(&'static str),
}

/// Round to the given decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tnt_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Quote a request against the built-in rate catalog.
pub fn calculate_price(request: &PricingRequest) -> PricingResponse {
    match RateCatalog::builtin() {
        Ok(catalog) => calculate_price_with(catalog, request),
        Err(e) => PricingResponse::failure(PricingError::Catalog(e.to_string()).to_string()),
    }
}

/// Quote a request against the given rate catalog.
pub fn calculate_price_with(catalog: &RateCatalog, request: &PricingRequest) -> PricingResponse {
    match build_quote(catalog, request) {
        Ok(quote) => quote.finish(),
        Err(e) => PricingResponse::failure(e.to_string()),
    }
}

/// Running quote: detail lines, breakdown lines and the authoritative price.
#[derive(Debug, Default)]
struct Quote {
    details: Vec<ServiceDetail>,
    breakdown: Vec<PriceBreakdownItem>,
    price: Decimal,
}

impl Quote {
    fn detail(&mut self, item: &str, value: impl Into<String>) {
        self.details.push(ServiceDetail::new(item, value));
    }

    /// Informational line; the price is tracked separately
    fn line(&mut self, item: impl Into<String>, amount: Decimal) {
        self.breakdown.push(PriceBreakdownItem::new(item, amount));
    }

    /// Line that also moves the running price
    fn adjust(&mut self, item: impl Into<String>, amount: Decimal) -> Result<(), PricingError> {
        self.price = self
            .price
            .checked_add(amount)
            .ok_or(PricingError::Arithmetic("adjustment"))?;
        self.line(item, amount);
        Ok(())
    }

    fn finish(self) -> PricingResponse {
        PricingResponse::quote(self.details, self.breakdown, round_money(self.price, 2))
    }
}

fn build_quote(catalog: &RateCatalog, request: &PricingRequest) -> Result<Quote, PricingError> {
    let vehicle = catalog
        .vehicle(&request.vehicle_type)
        .ok_or(PricingError::InvalidVehicle)?;

    let mut quote = match request.service_type {
        ServiceType::Hourly => hourly_quote(catalog, vehicle, request)?,
        ServiceType::PointToPoint => point_to_point_quote(vehicle),
        ServiceType::Airport => airport_quote(vehicle, request)?,
    };

    if request.service_time.as_deref().is_some_and(is_after_hours) {
        quote.adjust(
            "After-Hour Pickup Fee (11pm-6am)",
            catalog.surcharges.after_hour_pickup_fee,
        )?;
    }

    Ok(quote)
}

/// Hours actually billed: the request (default 3) raised to the vehicle minimum
pub fn effective_hours(requested: Option<u32>, vehicle: &VehicleRates) -> u32 {
    let requested = requested.filter(|h| *h > 0).unwrap_or(DEFAULT_HOURS);
    requested.max(vehicle.round_trip.min_hours)
}

fn hourly_quote(
    catalog: &RateCatalog,
    vehicle: &VehicleRates,
    request: &PricingRequest,
) -> Result<Quote, PricingError> {
    let hours = effective_hours(request.hours, vehicle);
    let hours_dec = Decimal::from(hours);
    let rates = &vehicle.round_trip;
    let mut quote = Quote::default();

    quote.detail("Service Type", "Hourly (Round Trip)");
    quote.detail("Vehicle", vehicle.display_name());
    quote.detail("Hours", format!("{} hours", hours));
    quote.detail(
        "Day Type",
        match request.day_type {
            DayType::Weekday => "Mon-Thu (Discount)",
            DayType::Weekend => "Weekend",
            DayType::Holiday => "Holiday",
        },
    );

    for (label, rate) in [
        ("Base Rate", rates.base_hourly),
        ("Gratuity", rates.gratuity),
        ("Fuel Surcharge", rates.fuel_surcharge),
        ("Mileage Charge", rates.mileage_charge),
    ] {
        let amount = rate
            .checked_mul(hours_dec)
            .ok_or(PricingError::Arithmetic("hourly component"))?;
        quote.line(format!("{} ({} hrs × ${})", label, hours, rate), amount);
    }

    quote.price = rates
        .total_hourly
        .checked_mul(hours_dec)
        .ok_or(PricingError::Arithmetic("hourly base price"))?;

    let surcharges = &catalog.surcharges;
    match request.day_type {
        DayType::Weekday => {
            let discount = percent_of(quote.price, surcharges.discounts.monday_thursday_service)?;
            quote.adjust("Monday-Thursday Discount (10%)", -discount)?;
        }
        DayType::Holiday => {
            let surcharge = percent_of(quote.price, surcharges.holiday_surcharge)?;
            quote.adjust("Holiday Surcharge (25%)", surcharge)?;
        }
        DayType::Weekend => {}
    }

    // Compounds on the day-adjusted price
    if hours >= LONG_TRIP_HOURS {
        let discount = percent_of(quote.price, surcharges.discounts.six_plus_hour_trip)?;
        quote.adjust("6+ Hour Discount (10%)", -discount)?;
    }

    Ok(quote)
}

fn point_to_point_quote(vehicle: &VehicleRates) -> Quote {
    let rates = &vehicle.point_to_point;
    let mut quote = Quote::default();

    quote.detail("Service Type", "Point to Point");
    quote.detail("Vehicle", vehicle.display_name());

    quote.line("Base Rate", rates.base_rate);
    quote.line("Gratuity (Flat)", rates.gratuity_flat);
    quote.line("Fuel Surcharge", rates.fuel_surcharge);
    quote.line("Mileage Charge", rates.mileage_charge);

    quote.price = rates.total;
    quote
}

fn airport_quote(vehicle: &VehicleRates, request: &PricingRequest) -> Result<Quote, PricingError> {
    let (airport, one_way) = request
        .airport_code
        .and_then(|code| vehicle.airport_rate(code).map(|rate| (code, rate)))
        .ok_or(PricingError::AirportUnavailable)?;

    let mut quote = Quote::default();
    quote.detail("Service Type", "Airport Transfer");
    quote.detail("Vehicle", vehicle.display_name());
    quote.detail("Airport", airport.display_name());
    quote.detail(
        "Trip Type",
        match request.trip_type {
            TripType::OneWay => "One Way",
            TripType::RoundTrip => "Round Trip",
        },
    );

    let price = match request.trip_type {
        TripType::OneWay => one_way,
        TripType::RoundTrip => one_way
            .checked_mul(AIRPORT_ROUND_TRIP_MULTIPLIER)
            .ok_or(PricingError::Arithmetic("airport round trip"))?,
    };

    quote.adjust(
        format!("{} - {}", airport.display_name(), request.trip_type.as_str()),
        price,
    )?;
    Ok(quote)
}

fn percent_of(amount: Decimal, rate: Decimal) -> Result<Decimal, PricingError> {
    amount
        .checked_mul(rate)
        .ok_or(PricingError::Arithmetic("percentage adjustment"))
}

/// Hour component of an "HH:MM" time, if it parses
fn service_hour(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse().ok()
}

/// True for pickups from 23:00 through 05:59. Unparseable times never are.
pub fn is_after_hours(time: &str) -> bool {
    matches!(service_hour(time), Some(h) if !(AFTER_HOURS_END..AFTER_HOURS_START).contains(&h))
}
