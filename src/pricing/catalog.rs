//! Rate catalog for the TNT fleet.
//!
//! The built-in catalog is embedded at compile time, parsed and validated on
//! first use, and shared read-only for the rest of the process.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../data/rate_catalog.json");

static CATALOG: OnceLock<Result<RateCatalog, CatalogError>> = OnceLock::new();

/// Catalog loading and validation errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Rate catalog is malformed: {0}")]
    Malformed(String),

    #[error("Vehicle '{vehicle}' {table} total is {stated} but its components sum to {computed}")]
    TotalMismatch {
        vehicle: String,
        table: &'static str,
        stated: Decimal,
        computed: Decimal,
    },

    #[error("Vehicle '{0}' has a zero minimum hour requirement")]
    ZeroMinimumHours(String),
}

/// Airports served by airport transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportCode {
    Richmond,
    Charlottesville,
    National,
    Dulles,
    Bwi,
}

impl AirportCode {
    pub const ALL: [AirportCode; 5] = [
        AirportCode::Richmond,
        AirportCode::Charlottesville,
        AirportCode::National,
        AirportCode::Dulles,
        AirportCode::Bwi,
    ];

    /// Human-readable airport name shown on quotes
    pub fn display_name(self) -> &'static str {
        match self {
            AirportCode::Richmond => "Richmond International (RIC)",
            AirportCode::Charlottesville => "Charlottesville/Williamsburg",
            AirportCode::National => "Reagan National (DCA)",
            AirportCode::Dulles => "Washington Dulles (IAD)",
            AirportCode::Bwi => "Baltimore Washington (BWI)",
        }
    }

    /// Form/URL code for the airport
    pub fn code(self) -> &'static str {
        match self {
            AirportCode::Richmond => "richmond",
            AirportCode::Charlottesville => "charlottesville",
            AirportCode::National => "national",
            AirportCode::Dulles => "dulles",
            AirportCode::Bwi => "bwi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Hourly (round trip) rates, all per hour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripRates {
    pub base_hourly: Decimal,
    pub gratuity: Decimal,
    pub fuel_surcharge: Decimal,
    pub mileage_charge: Decimal,
    /// Bundled hourly rate, equal to the sum of the four components
    pub total_hourly: Decimal,
    pub min_hours: u32,
}

impl RoundTripRates {
    pub fn component_sum(&self) -> Decimal {
        self.base_hourly + self.gratuity + self.fuel_surcharge + self.mileage_charge
    }
}

/// Flat point-to-point rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointToPointRates {
    pub base_rate: Decimal,
    pub gratuity_flat: Decimal,
    pub fuel_surcharge: Decimal,
    pub mileage_charge: Decimal,
    pub total: Decimal,
}

impl PointToPointRates {
    pub fn component_sum(&self) -> Decimal {
        self.base_rate + self.gratuity_flat + self.fuel_surcharge + self.mileage_charge
    }
}

/// Rates for one vehicle in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRates {
    pub name: String,
    #[serde(default)]
    pub unit_no: Option<String>,
    /// Passenger capacity as shown to customers ("3", "12-15")
    pub capacity: String,
    pub round_trip: RoundTripRates,
    pub point_to_point: PointToPointRates,
    #[serde(default)]
    pub airport_rates: Option<BTreeMap<AirportCode, Decimal>>,
}

impl VehicleRates {
    /// Vehicle label with its unit number, e.g. "Sedan (04/05)"
    pub fn display_name(&self) -> String {
        match self.unit_no.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }

    /// One-way rate to the given airport, if this vehicle serves it
    pub fn airport_rate(&self, airport: AirportCode) -> Option<Decimal> {
        self.airport_rates.as_ref()?.get(&airport).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discounts {
    pub six_plus_hour_trip: Decimal,
    pub monday_thursday_service: Decimal,
    /// Published but not applied by the calculator
    pub late_inquiry: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surcharges {
    pub after_hour_pickup_fee: Decimal,
    pub discounts: Discounts,
    pub holiday_surcharge: Decimal,
}

/// Complete rate table: fleet plus global surcharges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCatalog {
    pub vehicles: BTreeMap<String, VehicleRates>,
    pub surcharges: Surcharges,
}

impl RateCatalog {
    /// The catalog compiled into the crate, loaded once per process.
    pub fn builtin() -> Result<&'static RateCatalog, &'static CatalogError> {
        CATALOG
            .get_or_init(|| Self::from_json_str(BUILTIN_CATALOG))
            .as_ref()
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: RateCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a replacement rate file from disk
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading rate catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&json)
            .with_context(|| format!("loading rate catalog {}", path.display()))?;
        Ok(catalog)
    }

    /// Check that every bundled total matches its components.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (id, vehicle) in &self.vehicles {
            let rt = &vehicle.round_trip;
            if rt.min_hours == 0 {
                return Err(CatalogError::ZeroMinimumHours(id.clone()));
            }
            if rt.component_sum() != rt.total_hourly {
                return Err(CatalogError::TotalMismatch {
                    vehicle: id.clone(),
                    table: "round trip hourly",
                    stated: rt.total_hourly,
                    computed: rt.component_sum(),
                });
            }

            let p2p = &vehicle.point_to_point;
            if p2p.component_sum() != p2p.total {
                return Err(CatalogError::TotalMismatch {
                    vehicle: id.clone(),
                    table: "point to point",
                    stated: p2p.total,
                    computed: p2p.component_sum(),
                });
            }
        }
        Ok(())
    }

    pub fn vehicle(&self, vehicle_id: &str) -> Option<&VehicleRates> {
        self.vehicles.get(vehicle_id)
    }

    pub fn airport_rate(&self, vehicle_id: &str, airport: AirportCode) -> Option<Decimal> {
        self.vehicle(vehicle_id)?.airport_rate(airport)
    }
}
