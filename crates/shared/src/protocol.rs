use serde::{Deserialize, Serialize};

use crate::domain::{BookingId, BusId};

/// One scheduled bus as listed by `GET /api/buses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub price: f64,
    pub available: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusListResponse {
    pub buses: Vec<Bus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub bus_id: BusId,
    pub passenger_name: String,
    pub seats: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: BookingId,
    pub passenger_name: String,
    pub seats: i64,
    pub total_price: f64,
}

/// Confirmation returned by `POST /api/book`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    pub booking: BookingSummary,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_request_uses_camel_case_keys() {
        let request = BookingRequest {
            bus_id: BusId(1),
            passenger_name: "Alice".to_string(),
            seats: 2,
        };
        let value = serde_json::to_value(&request).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({"busId": 1, "passengerName": "Alice", "seats": 2})
        );
    }

    #[test]
    fn decodes_confirmation_payload() {
        let confirmation: BookingConfirmation = serde_json::from_str(
            r#"{"booking":{"id":101,"passengerName":"Alice","seats":2,"totalPrice":100},"message":"Confirmed"}"#,
        )
        .expect("decode");
        assert_eq!(confirmation.booking.id, BookingId(101));
        assert_eq!(confirmation.booking.total_price, 100.0);
        assert_eq!(confirmation.message, "Confirmed");
    }

    #[test]
    fn decodes_bus_list_with_integer_prices() {
        let list: BusListResponse = serde_json::from_str(
            r#"{"buses":[{"id":1,"from":"NY","to":"LA","departure":"08:00","arrival":"14:00","price":50,"available":20,"name":"Express1"}]}"#,
        )
        .expect("decode");
        assert_eq!(list.buses.len(), 1);
        assert_eq!(list.buses[0].id, BusId(1));
        assert_eq!(list.buses[0].price, 50.0);
    }
}
