//! Request schema, category whitelists, and validation.
//!
//! The wire format mirrors the payload the pricing frontend sends: six
//! numeric fields and four categorical fields, all required. Validation is
//! an explicit ordered check list rather than anything reflective: numeric
//! non-negativity first, categorical whitelists second.

use serde::{Deserialize, Serialize};

/// Number of numeric features in a pricing request.
pub const NUMERIC_FEATURES: usize = 6;

/// A ride-pricing request.
///
/// Immutable once received; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    #[serde(rename = "Number_of_Riders")]
    pub number_of_riders: f64,
    #[serde(rename = "Number_of_Drivers")]
    pub number_of_drivers: f64,
    #[serde(rename = "Location_Category")]
    pub location_category: String,
    #[serde(rename = "Customer_Loyalty_Status")]
    pub customer_loyalty_status: String,
    #[serde(rename = "Number_of_Past_Rides")]
    pub number_of_past_rides: f64,
    #[serde(rename = "Average_Ratings")]
    pub average_ratings: f64,
    #[serde(rename = "Time_of_Booking")]
    pub time_of_booking: String,
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: String,
    #[serde(rename = "Expected_Ride_Duration")]
    pub expected_ride_duration: f64,
    pub competitor_price: f64,
}

impl PricingRequest {
    /// Numeric fields in canonical feature order: riders, drivers, past
    /// rides, average ratings, expected duration, competitor price.
    ///
    /// Scaling and inference both consume features in this order.
    pub fn numeric_fields(&self) -> [(&'static str, f64); NUMERIC_FEATURES] {
        [
            ("Number_of_Riders", self.number_of_riders),
            ("Number_of_Drivers", self.number_of_drivers),
            ("Number_of_Past_Rides", self.number_of_past_rides),
            ("Average_Ratings", self.average_ratings),
            ("Expected_Ride_Duration", self.expected_ride_duration),
            ("competitor_price", self.competitor_price),
        ]
    }

    /// Numeric feature values in canonical order.
    pub fn numeric_features(&self) -> [f64; NUMERIC_FEATURES] {
        self.numeric_fields().map(|(_, value)| value)
    }

    /// Categorical fields paired with their whitelists, in the fixed
    /// category-table order.
    pub fn categorical_fields(&self) -> [(&'static str, &str, &'static [&'static str]); 4] {
        [
            ("Time_of_Booking", self.time_of_booking.as_str(), TIME_OF_BOOKING),
            (
                "Customer_Loyalty_Status",
                self.customer_loyalty_status.as_str(),
                CUSTOMER_LOYALTY_STATUS,
            ),
            ("Location_Category", self.location_category.as_str(), LOCATION_CATEGORY),
            ("Vehicle_Type", self.vehicle_type.as_str(), VEHICLE_TYPE),
        ]
    }
}

/// Allowed values for `Time_of_Booking`.
pub const TIME_OF_BOOKING: &[&str] = &["Morning", "Afternoon", "Evening", "Night"];
/// Allowed values for `Customer_Loyalty_Status`.
pub const CUSTOMER_LOYALTY_STATUS: &[&str] = &["Gold", "Silver", "Regular"];
/// Allowed values for `Location_Category`.
pub const LOCATION_CATEGORY: &[&str] = &["Urban", "Suburban", "Rural"];
/// Allowed values for `Vehicle_Type`.
pub const VEHICLE_TYPE: &[&str] = &["Economy", "Premium"];

/// The fixed mapping from categorical field names to their allowed values.
///
/// Process-wide constant; serialization order is stable so `/categories`
/// responses are byte-identical across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    #[serde(rename = "Time_of_Booking")]
    pub time_of_booking: &'static [&'static str],
    #[serde(rename = "Customer_Loyalty_Status")]
    pub customer_loyalty_status: &'static [&'static str],
    #[serde(rename = "Location_Category")]
    pub location_category: &'static [&'static str],
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: &'static [&'static str],
}

/// The category table served by this process.
pub const CATEGORIES: CategoryTable = CategoryTable {
    time_of_booking: TIME_OF_BOOKING,
    customer_loyalty_status: CUSTOMER_LOYALTY_STATUS,
    location_category: LOCATION_CATEGORY,
    vehicle_type: VEHICLE_TYPE,
};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, as it appears on the wire.
    pub field: &'static str,
    /// Human-readable diagnostic.
    pub message: String,
}

/// Validate a pricing request against the schema.
///
/// Numeric non-negativity is checked first, then categorical whitelists
/// (case-sensitive exact match), each in a fixed order. All failures are
/// collected so callers can report more than the first one if they choose.
pub fn validate(request: &PricingRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for (field, value) in request.numeric_fields() {
        if value < 0.0 {
            errors.push(FieldError {
                field,
                message: format!("{} must be non-negative", field),
            });
        }
    }

    for (field, value, allowed) in request.categorical_fields() {
        if !allowed.contains(&value) {
            errors.push(FieldError {
                field,
                message: format!("Invalid {}: {}", field, value),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PricingRequest {
        PricingRequest {
            number_of_riders: 50.0,
            number_of_drivers: 25.0,
            location_category: "Urban".to_string(),
            customer_loyalty_status: "Gold".to_string(),
            number_of_past_rides: 12.0,
            average_ratings: 4.2,
            time_of_booking: "Evening".to_string(),
            vehicle_type: "Premium".to_string(),
            expected_ride_duration: 20.0,
            competitor_price: 100.0,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&valid_request()).is_ok());
    }

    #[test]
    fn test_each_numeric_field_checked_independently() {
        let fields = [
            "Number_of_Riders",
            "Number_of_Drivers",
            "Number_of_Past_Rides",
            "Average_Ratings",
            "Expected_Ride_Duration",
            "competitor_price",
        ];

        for field in fields {
            let mut request = valid_request();
            match field {
                "Number_of_Riders" => request.number_of_riders = -1.0,
                "Number_of_Drivers" => request.number_of_drivers = -1.0,
                "Number_of_Past_Rides" => request.number_of_past_rides = -1.0,
                "Average_Ratings" => request.average_ratings = -0.1,
                "Expected_Ride_Duration" => request.expected_ride_duration = -5.0,
                "competitor_price" => request.competitor_price = -100.0,
                _ => unreachable!(),
            }

            let errors = validate(&request).unwrap_err();
            assert_eq!(errors.len(), 1, "one error expected for {}", field);
            assert_eq!(errors[0].field, field);
            assert_eq!(errors[0].message, format!("{} must be non-negative", field));
        }
    }

    #[test]
    fn test_zero_is_allowed() {
        let mut request = valid_request();
        request.number_of_riders = 0.0;
        request.competitor_price = 0.0;
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn test_each_categorical_field_checked() {
        let cases = [
            ("Time_of_Booking", "Midnight"),
            ("Customer_Loyalty_Status", "Platinum"),
            ("Location_Category", "Orbital"),
            ("Vehicle_Type", "Helicopter"),
        ];

        for (field, bad_value) in cases {
            let mut request = valid_request();
            match field {
                "Time_of_Booking" => request.time_of_booking = bad_value.to_string(),
                "Customer_Loyalty_Status" => {
                    request.customer_loyalty_status = bad_value.to_string()
                }
                "Location_Category" => request.location_category = bad_value.to_string(),
                "Vehicle_Type" => request.vehicle_type = bad_value.to_string(),
                _ => unreachable!(),
            }

            let errors = validate(&request).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, field);
            assert_eq!(errors[0].message, format!("Invalid {}: {}", field, bad_value));
        }
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let mut request = valid_request();
        request.vehicle_type = "economy".to_string();

        let errors = validate(&request).unwrap_err();
        assert_eq!(errors[0].message, "Invalid Vehicle_Type: economy");
    }

    #[test]
    fn test_numeric_errors_ordered_before_categorical() {
        let mut request = valid_request();
        request.average_ratings = -1.0;
        request.location_category = "Nowhere".to_string();

        let errors = validate(&request).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "Average_Ratings");
        assert_eq!(errors[1].field, "Location_Category");
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = serde_json::to_value(valid_request()).unwrap();
        for key in [
            "Number_of_Riders",
            "Number_of_Drivers",
            "Location_Category",
            "Customer_Loyalty_Status",
            "Number_of_Past_Rides",
            "Average_Ratings",
            "Time_of_Booking",
            "Vehicle_Type",
            "Expected_Ride_Duration",
            "competitor_price",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {}", key);
        }
    }

    #[test]
    fn test_category_table_serialization_is_stable() {
        let first = serde_json::to_string(&CATEGORIES).unwrap();
        let second = serde_json::to_string(&CATEGORIES).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\"Time_of_Booking\""));
    }
}
