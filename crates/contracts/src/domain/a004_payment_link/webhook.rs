//! Notes attached to a payment by the gateway webhook.
//!
//! The backend stores the webhook body verbatim, sometimes as an object and
//! sometimes as a (possibly truncated) JSON string. Extraction never fails:
//! if the payload does not parse, the note values are scanned out of the raw
//! text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const NOTES_POINTERS: [&str; 3] = [
    "/payload/payment_link/entity/notes",
    "/payload/payment/entity/notes",
    "/notes",
];

const HOTEL_KEYS: [&str; 2] = ["hotelId", "hotel_id"];
const RESERVATION_KEYS: [&str; 2] = ["reservationId", "reservation_id"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookNotes {
    pub hotel_id: Option<String>,
    pub reservation_id: Option<String>,
}

impl WebhookNotes {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(raw) => Self::from_raw(raw),
            other => Self::from_json(other),
        }
    }

    /// Parses a raw payload, falling back to text scanning when it is not valid JSON.
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(inner)) => Self::from_raw(&inner),
            Ok(value) => {
                let notes = Self::from_json(&value);
                if notes.is_empty() {
                    Self::scan(raw)
                } else {
                    notes
                }
            }
            Err(_) => Self::scan(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hotel_id.is_none() && self.reservation_id.is_none()
    }

    fn from_json(value: &Value) -> Self {
        NOTES_POINTERS
            .iter()
            .filter_map(|pointer| value.pointer(pointer))
            .map(|notes| Self {
                hotel_id: lookup(notes, &HOTEL_KEYS),
                reservation_id: lookup(notes, &RESERVATION_KEYS),
            })
            .find(|notes| !notes.is_empty())
            .unwrap_or_default()
    }

    fn scan(raw: &str) -> Self {
        Self {
            hotel_id: HOTEL_KEYS.iter().find_map(|key| scan_key(raw, key)),
            reservation_id: RESERVATION_KEYS.iter().find_map(|key| scan_key(raw, key)),
        }
    }
}

fn lookup(notes: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match notes.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Finds `"key" : value` in arbitrary text and returns the value.
fn scan_key(raw: &str, key: &str) -> Option<String> {
    let needle = format!("\"{}\"", key);
    let mut rest = raw;
    while let Some(pos) = rest.find(&needle) {
        let after = rest[pos + needle.len()..].trim_start();
        rest = &rest[pos + needle.len()..];
        let Some(after_colon) = after.strip_prefix(':') else {
            continue;
        };
        let value = after_colon.trim_start();
        let found = if let Some(quoted) = value.strip_prefix('"') {
            quoted.split('"').next().unwrap_or_default().to_string()
        } else {
            value
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect()
        };
        if !found.trim().is_empty() {
            return Some(found.trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_payment_link_notes() {
        let value = serde_json::json!({
            "event": "payment_link.paid",
            "payload": {"payment_link": {"entity": {
                "notes": {"hotelId": "EVOLVE01", "reservationId": 771203}
            }}}
        });
        let notes = WebhookNotes::from_value(&value);
        assert_eq!(notes.hotel_id.as_deref(), Some("EVOLVE01"));
        assert_eq!(notes.reservation_id.as_deref(), Some("771203"));
    }

    #[test]
    fn test_payload_stored_as_string() {
        let raw = r#"{"notes": {"hotel_id": "H2", "reservation_id": "R2"}}"#;
        let notes = WebhookNotes::from_value(&Value::String(raw.to_string()));
        assert_eq!(notes.hotel_id.as_deref(), Some("H2"));
        assert_eq!(notes.reservation_id.as_deref(), Some("R2"));
    }

    #[test]
    fn test_truncated_payload_falls_back_to_scan() {
        let raw = r#"{"payload": {"payment": {"entity": {"notes": {"hotelId": "H3", "reservationId" : 4411, "gu"#;
        let notes = WebhookNotes::from_raw(raw);
        assert_eq!(notes.hotel_id.as_deref(), Some("H3"));
        assert_eq!(notes.reservation_id.as_deref(), Some("4411"));
    }

    #[test]
    fn test_garbage_gives_empty_notes() {
        let notes = WebhookNotes::from_raw("not json at all");
        assert!(notes.is_empty());
    }
}
