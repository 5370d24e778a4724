use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(BusId);
id_newtype!(BookingId);

/// Smallest seat count a single booking may request.
pub const MIN_SEATS_PER_BOOKING: i64 = 1;
/// Largest seat count a single booking may request.
pub const MAX_SEATS_PER_BOOKING: i64 = 10;

pub fn seats_within_limits(seats: i64) -> bool {
    (MIN_SEATS_PER_BOOKING..=MAX_SEATS_PER_BOOKING).contains(&seats)
}

/// Formats a fare the way the booking page shows it: no trailing `.0` for
/// whole amounts, prefixed with a dollar sign.
pub fn format_fare(amount: f64) -> String {
    format!("${amount}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_limits_are_inclusive() {
        assert!(!seats_within_limits(0));
        assert!(seats_within_limits(1));
        assert!(seats_within_limits(10));
        assert!(!seats_within_limits(11));
        assert!(!seats_within_limits(-3));
    }

    #[test]
    fn fares_render_without_trailing_zero_fraction() {
        assert_eq!(format_fare(50.0), "$50");
        assert_eq!(format_fare(12.5), "$12.5");
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&BusId(7)).expect("encode"), "7");
        let id: BookingId = serde_json::from_str("101").expect("decode");
        assert_eq!(id, BookingId(101));
    }
}
