//! Request DTOs for price quotes.

use serde::{Deserialize, Serialize};

use super::catalog::AirportCode;

const DEFAULT_VEHICLE: &str = "sedan";

/// Hours billed when a hourly request gives none
pub const DEFAULT_HOURS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    #[default]
    Hourly,
    PointToPoint,
    Airport,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Hourly => "hourly",
            ServiceType::PointToPoint => "point-to-point",
            ServiceType::Airport => "airport",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "hourly" => Some(ServiceType::Hourly),
            "point-to-point" => Some(ServiceType::PointToPoint),
            "airport" => Some(ServiceType::Airport),
            _ => None,
        }
    }
}

/// Day of service, used for hourly discounts and surcharges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Monday through Thursday
    Weekday,
    #[default]
    Weekend,
    Holiday,
}

impl DayType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "weekday" => Some(DayType::Weekday),
            "weekend" => Some(DayType::Weekend),
            "holiday" => Some(DayType::Holiday),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn as_str(self) -> &'static str {
        match self {
            TripType::OneWay => "one-way",
            TripType::RoundTrip => "round-trip",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "one-way" => Some(TripType::OneWay),
            "round-trip" => Some(TripType::RoundTrip),
            _ => None,
        }
    }
}

/// Validated quote request handed to the calculator.
///
/// Pickup, dropoff and service date are carried for the booking record and
/// never affect the price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub service_type: ServiceType,
    pub vehicle_type: String,
    #[serde(default)]
    pub hours: Option<u32>,
    #[serde(default)]
    pub day_type: DayType,
    #[serde(default)]
    pub airport_code: Option<AirportCode>,
    #[serde(default)]
    pub trip_type: TripType,
    /// 24h clock, "HH:MM"
    #[serde(default)]
    pub service_time: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub service_date: Option<String>,
}

impl PricingRequest {
    pub fn new(service_type: ServiceType, vehicle_type: impl Into<String>) -> Self {
        Self {
            service_type,
            vehicle_type: vehicle_type.into(),
            ..Default::default()
        }
    }

    pub fn hours(mut self, hours: u32) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn day_type(mut self, day_type: DayType) -> Self {
        self.day_type = day_type;
        self
    }

    pub fn airport(mut self, airport: AirportCode, trip_type: TripType) -> Self {
        self.airport_code = Some(airport);
        self.trip_type = trip_type;
        self
    }

    pub fn service_time(mut self, time: impl Into<String>) -> Self {
        self.service_time = Some(time.into());
        self
    }
}

/// Raw fields as posted by the quote form.
///
/// Every field is optional text; `into_request` applies the form defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingForm {
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub day_type: Option<String>,
    #[serde(default)]
    pub airport_code: Option<String>,
    #[serde(default)]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub service_time: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub service_date: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PricingForm {
    /// Build a calculator request, defaulting absent or unrecognised fields.
    ///
    /// An unknown airport code is dropped so the calculator reports the
    /// transfer as unavailable; an unknown vehicle is passed through so the
    /// calculator reports it as invalid.
    pub fn into_request(self) -> PricingRequest {
        let service_type = present(&self.service_type)
            .and_then(ServiceType::parse)
            .unwrap_or_default();
        let vehicle_type = present(&self.vehicle_type)
            .unwrap_or(DEFAULT_VEHICLE)
            .to_string();
        let hours = present(&self.hours).and_then(|h| h.parse::<u32>().ok());
        let day_type = present(&self.day_type)
            .and_then(DayType::parse)
            .unwrap_or(DayType::Weekday);
        let airport_code = match present(&self.airport_code) {
            Some(code) => AirportCode::from_code(code),
            None => Some(AirportCode::Richmond),
        };
        let trip_type = present(&self.trip_type)
            .and_then(TripType::parse)
            .unwrap_or_default();

        PricingRequest {
            service_type,
            vehicle_type,
            hours,
            day_type,
            airport_code,
            trip_type,
            service_time: present(&self.service_time).map(str::to_string),
            pickup_location: present(&self.pickup_location).map(str::to_string),
            dropoff_location: present(&self.dropoff_location).map(str::to_string),
            service_date: present(&self.service_date).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_uses_defaults() {
        let request = PricingForm::default().into_request();

        assert_eq!(request.service_type, ServiceType::Hourly);
        assert_eq!(request.vehicle_type, "sedan");
        assert_eq!(request.hours, None);
        assert_eq!(request.day_type, DayType::Weekday);
        assert_eq!(request.airport_code, Some(AirportCode::Richmond));
        assert_eq!(request.trip_type, TripType::OneWay);
        assert_eq!(request.service_time, None);
    }

    #[test]
    fn test_form_fields_are_parsed() {
        let form = PricingForm {
            service_type: Some("airport".to_string()),
            vehicle_type: Some("limo-bus".to_string()),
            hours: Some("7".to_string()),
            day_type: Some("holiday".to_string()),
            airport_code: Some("dulles".to_string()),
            trip_type: Some("round-trip".to_string()),
            service_time: Some(" 23:15 ".to_string()),
            pickup_location: Some("Hotel".to_string()),
            ..Default::default()
        };
        let request = form.into_request();

        assert_eq!(request.service_type, ServiceType::Airport);
        assert_eq!(request.vehicle_type, "limo-bus");
        assert_eq!(request.hours, Some(7));
        assert_eq!(request.day_type, DayType::Holiday);
        assert_eq!(request.airport_code, Some(AirportCode::Dulles));
        assert_eq!(request.trip_type, TripType::RoundTrip);
        assert_eq!(request.service_time.as_deref(), Some("23:15"));
        assert_eq!(request.pickup_location.as_deref(), Some("Hotel"));
        assert_eq!(request.dropoff_location, None);
    }

    #[test]
    fn test_unparseable_hours_are_dropped() {
        let form = PricingForm {
            hours: Some("ten".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_request().hours, None);
    }

    #[test]
    fn test_unknown_airport_is_dropped() {
        let form = PricingForm {
            airport_code: Some("jfk".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_request().airport_code, None);
    }

    #[test]
    fn test_unknown_vehicle_is_passed_through() {
        let form = PricingForm {
            vehicle_type: Some("hovercraft".to_string()),
            ..Default::default()
        };
        assert_eq!(form.into_request().vehicle_type, "hovercraft");
    }

    #[test]
    fn test_unknown_enums_fall_back() {
        let form = PricingForm {
            service_type: Some("helicopter".to_string()),
            day_type: Some("someday".to_string()),
            trip_type: Some("loop".to_string()),
            ..Default::default()
        };
        let request = form.into_request();
        assert_eq!(request.service_type, ServiceType::Hourly);
        assert_eq!(request.day_type, DayType::Weekday);
        assert_eq!(request.trip_type, TripType::OneWay);
    }

    #[test]
    fn test_request_deserializes_from_camel_case_json() {
        let request: PricingRequest = serde_json::from_str(
            r#"{
                "serviceType": "point-to-point",
                "vehicleType": "transit",
                "serviceTime": "04:45"
            }"#,
        )
        .unwrap();

        assert_eq!(request.service_type, ServiceType::PointToPoint);
        assert_eq!(request.vehicle_type, "transit");
        assert_eq!(request.day_type, DayType::Weekend);
        assert_eq!(request.trip_type, TripType::OneWay);
        assert_eq!(request.service_time.as_deref(), Some("04:45"));
    }
}
