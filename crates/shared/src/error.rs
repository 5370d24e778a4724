use serde::{Deserialize, Serialize};

/// Error payload the booking API attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Pulls the server-provided message out of a raw response body, if any.
    ///
    /// Bodies that are not JSON, lack an `error` field, or carry an empty
    /// string all yield `None` so callers can substitute their own fallback.
    pub fn message_from_bytes(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorBody;

    #[test]
    fn extracts_server_message() {
        assert_eq!(
            ErrorBody::message_from_bytes(br#"{"error":"Not enough seats"}"#).as_deref(),
            Some("Not enough seats")
        );
    }

    #[test]
    fn missing_or_unparseable_message_yields_none() {
        assert_eq!(ErrorBody::message_from_bytes(b"{}"), None);
        assert_eq!(ErrorBody::message_from_bytes(br#"{"error":""}"#), None);
        assert_eq!(ErrorBody::message_from_bytes(b"<html>502</html>"), None);
        assert_eq!(ErrorBody::message_from_bytes(br#"{"error":42}"#), None);
    }
}
