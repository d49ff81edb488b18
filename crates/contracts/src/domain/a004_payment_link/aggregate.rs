use serde::{Deserialize, Serialize};

use super::webhook::WebhookNotes;
use crate::shared::envelope::amount_from_any;

/// Deposit link request; `policy_ids` is a comma-joined list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPaymentRequest {
    pub hotel_id: String,
    pub reservation_id: String,
    pub amount: f64,
    pub policy_ids: String,
    #[serde(rename = "type")]
    pub payment_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocPaymentRequest {
    pub hotel_id: String,
    pub reservation_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Folio link request; `folio_ids` is a comma-joined list of window numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioPaymentRequest {
    pub hotel_id: String,
    pub reservation_id: String,
    pub amount: f64,
    pub folio_ids: String,
}

pub const DEPOSIT_PAYMENT_TYPE: &str = "deposit";
pub const ADHOC_DESCRIPTION: &str = "Adhoc payment";

/// Ссылка на оплату, созданная платёжным шлюзом
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLink {
    #[serde(default)]
    pub payment_link_id: String,
    #[serde(default)]
    pub short_url: String,
    #[serde(default, deserialize_with = "amount_from_any")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

/// Транзакция по ссылке (`/payment/links/{id}/transactions`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLinkTransaction {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub payment_link_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "amount_from_any")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "hotelId")]
    pub hotel_id: Option<String>,
    #[serde(default, rename = "reservationId")]
    pub reservation_id: Option<String>,
    /// Сырой payload webhook-а шлюза: строка JSON или объект
    #[serde(default)]
    pub webhook_payload: Option<serde_json::Value>,
}

/// Hotel and reservation a payment belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRef {
    pub hotel_id: String,
    pub reservation_id: String,
}

impl PaymentLinkTransaction {
    /// Resolves which reservation this payment belongs to.
    ///
    /// Explicit identifiers on the transaction take precedence; missing ones
    /// are filled from the gateway webhook notes.
    pub fn reservation_ref(&self) -> Option<ReservationRef> {
        let explicit = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        let mut hotel_id = explicit(&self.hotel_id);
        let mut reservation_id = explicit(&self.reservation_id);

        if hotel_id.is_none() || reservation_id.is_none() {
            if let Some(payload) = &self.webhook_payload {
                let notes = WebhookNotes::from_value(payload);
                hotel_id = hotel_id.or(notes.hotel_id);
                reservation_id = reservation_id.or(notes.reservation_id);
            }
        }

        Some(ReservationRef {
            hotel_id: hotel_id?,
            reservation_id: reservation_id?,
        })
    }
}

/// Joins selected item identifiers the way the payment API expects them.
pub fn join_ids<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_request_wire_format() {
        let request = DepositPaymentRequest {
            hotel_id: "H1".into(),
            reservation_id: "R1".into(),
            amount: 350.0,
            policy_ids: join_ids(["P1", "P2"]),
            payment_type: DEPOSIT_PAYMENT_TYPE.into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hotelId": "H1",
                "reservationId": "R1",
                "amount": 350.0,
                "policyIds": "P1,P2",
                "type": "deposit"
            })
        );
    }

    #[test]
    fn test_adhoc_request_omits_missing_description() {
        let request = AdhocPaymentRequest {
            hotel_id: "H1".into(),
            reservation_id: "R1".into(),
            amount: 10.0,
            description: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_transaction_with_string_amount() {
        let tx: PaymentLinkTransaction = serde_json::from_str(
            r#"{
                "id": 4,
                "payment_link_id": "plink_1",
                "customer_name": "Asha Rao",
                "customer_email": null,
                "customer_phone": null,
                "amount": "1500.00",
                "currency": "INR",
                "description": null,
                "short_url": "https://rzp.io/i/abc",
                "status": "created",
                "created_at": "2024-03-10T09:00:00Z",
                "updated_at": "2024-03-10T09:00:00Z",
                "hotelId": "H1",
                "reservationId": "R1"
            }"#,
        )
        .unwrap();
        assert_eq!(tx.amount, 1500.0);
        assert_eq!(
            tx.reservation_ref(),
            Some(ReservationRef {
                hotel_id: "H1".into(),
                reservation_id: "R1".into()
            })
        );
    }

    #[test]
    fn test_reservation_ref_from_webhook_notes() {
        let tx: PaymentLinkTransaction = serde_json::from_str(
            r#"{
                "payment_link_id": "plink_2",
                "webhook_payload": {"payload": {"payment_link": {"entity": {
                    "notes": {"hotelId": "H9", "reservationId": "R9"}
                }}}}
            }"#,
        )
        .unwrap();
        assert_eq!(
            tx.reservation_ref(),
            Some(ReservationRef {
                hotel_id: "H9".into(),
                reservation_id: "R9".into()
            })
        );
    }

    #[test]
    fn test_reservation_ref_missing() {
        assert_eq!(PaymentLinkTransaction::default().reservation_ref(), None);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids([1, 3, 4]), "1,3,4");
        assert_eq!(join_ids(Vec::<String>::new()), "");
    }
}
