use contracts::domain::a001_reservation::aggregate::CompleteReservationData;
use contracts::domain::a001_reservation::summary::{ReservationSummary, SummaryError};
use contracts::domain::a004_payment_link::aggregate::{PaymentLinkTransaction, ReservationRef};
use contracts::shared::envelope::ApiEnvelope;
use contracts::shared::format::format_amount_en_in;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::layout::global_context::use_app_context;

pub const LINK_ID_MISSING: &str = "Payment link ID not found";
pub const LINK_NOT_FOUND: &str = "Payment link not found";
pub const LINK_LOAD_FAILED: &str = "Failed to load payment link details";
pub const RESERVATION_NOT_FOUND: &str = "Reservation not found";
pub const RESERVATION_LOAD_FAILED: &str = "Failed to load reservation data";
pub const RESERVATION_CANCELLED: &str =
    "This reservation has been cancelled and cannot accept payments";

/// Transaction behind the link and the reservation it pays for
pub fn transaction_outcome(
    envelope: ApiEnvelope<PaymentLinkTransaction>,
) -> Result<(PaymentLinkTransaction, ReservationRef), &'static str> {
    let transaction = envelope.into_data().ok_or(LINK_NOT_FOUND)?;
    let reservation = transaction
        .reservation_ref()
        .ok_or(RESERVATION_NOT_FOUND)?;
    Ok((transaction, reservation))
}

pub fn reservation_outcome(
    envelope: ApiEnvelope<CompleteReservationData>,
) -> Result<ReservationSummary, &'static str> {
    let data = envelope.into_data().ok_or(RESERVATION_NOT_FOUND)?;
    ReservationSummary::from_data(&data.reservation).map_err(|e| match e {
        SummaryError::NotFound => RESERVATION_NOT_FOUND,
        SummaryError::Cancelled => RESERVATION_CANCELLED,
    })
}

/// A gateway `postMessage` reporting a completed payment
///
/// The frame posts JSON strings; anything else is ignored.
pub fn is_payment_success_message(data: &str) -> bool {
    let Ok(Value::Object(message)) = serde_json::from_str::<Value>(data) else {
        return false;
    };
    let success_event = message.get("event").and_then(Value::as_str) == Some("payment.success");
    let has_payment_id = match message.get("razorpay_payment_id") {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    success_event || has_payment_id
}

#[derive(Clone, Copy)]
pub struct PaymentLinkVm {
    pub payment_link_id: StoredValue<String>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub transaction: RwSignal<Option<PaymentLinkTransaction>>,
    pub summary: RwSignal<Option<ReservationSummary>>,
    pub show_payment_frame: RwSignal<bool>,
    pub payment_completed: RwSignal<bool>,
}

impl PaymentLinkVm {
    pub fn new(payment_link_id: String) -> Self {
        Self {
            payment_link_id: StoredValue::new(payment_link_id),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            transaction: RwSignal::new(None),
            summary: RwSignal::new(None),
            show_payment_frame: RwSignal::new(false),
            payment_completed: RwSignal::new(false),
        }
    }

    /// Amount of the link, en-IN formatted
    pub fn payment_amount(&self) -> String {
        let amount = self.transaction.with(|t| t.as_ref().map(|t| t.amount).unwrap_or(0.0));
        format_amount_en_in(amount)
    }

    pub fn checkout_url(&self) -> Option<String> {
        self.transaction
            .with(|t| t.as_ref().map(|t| t.short_url.clone()))
            .filter(|url| !url.is_empty())
    }

    fn fail(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
        self.loading.set(false);
    }

    pub fn fetch_payment_link_details(&self) {
        let payment_link_id = self.payment_link_id.get_value();
        if payment_link_id.trim().is_empty() {
            self.fail(LINK_ID_MISSING);
            return;
        }

        let context = use_app_context();
        let vm = *self;
        spawn_local(async move {
            let reservation = match context
                .payments
                .get_transaction_by_payment_link(&payment_link_id)
                .await
            {
                Ok(envelope) => match transaction_outcome(envelope) {
                    Ok((transaction, reservation)) => {
                        vm.transaction.set(Some(transaction));
                        reservation
                    }
                    Err(message) => return vm.fail(message),
                },
                Err(e) => {
                    log::error!("Error fetching payment link {}: {}", payment_link_id, e);
                    return vm.fail(LINK_LOAD_FAILED);
                }
            };

            let result = context
                .reservations
                .get_complete_reservation_data(&reservation.hotel_id, &reservation.reservation_id)
                .await;
            match result {
                Ok(envelope) => match reservation_outcome(envelope) {
                    Ok(summary) => {
                        vm.summary.set(Some(summary));
                        vm.loading.set(false);
                        vm.show_payment_frame.set(true);
                    }
                    Err(message) => vm.fail(message),
                },
                Err(e) => {
                    log::error!("Reservation load error: {}", e);
                    vm.fail(e.user_message(RESERVATION_LOAD_FAILED));
                }
            }
        });
    }

    pub fn handle_gateway_message(&self, data: &str) {
        if is_payment_success_message(data) {
            log::info!("Gateway reported a completed payment");
            // the listener outlives the page
            let _ = self.payment_completed.try_set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(json: &str) -> ApiEnvelope<PaymentLinkTransaction> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_messages() {
        assert!(is_payment_success_message(r#"{"event": "payment.success"}"#));
        assert!(is_payment_success_message(r#"{"razorpay_payment_id": "pay_1"}"#));
        assert!(!is_payment_success_message(r#"{"event": "payment.failed"}"#));
        assert!(!is_payment_success_message(r#"{"razorpay_payment_id": ""}"#));
        assert!(!is_payment_success_message("resize:420"));
        assert!(!is_payment_success_message(r#""payment.success""#));
    }

    #[test]
    fn test_transaction_resolves_reservation_from_webhook() {
        let envelope = transaction(
            r#"{"success": true, "data": {
                "payment_link_id": "plink_1",
                "amount": "1500.00",
                "webhook_payload": "{\"payload\":{\"payment_link\":{\"entity\":{\"notes\":{\"hotelId\":\"EVOLVE\",\"reservationId\":\"771203\"}}}}}"
            }}"#,
        );
        let (tx, reservation) = transaction_outcome(envelope).unwrap();
        assert_eq!(tx.amount, 1500.0);
        assert_eq!(reservation.hotel_id, "EVOLVE");
        assert_eq!(reservation.reservation_id, "771203");
    }

    #[test]
    fn test_transaction_failures() {
        assert_eq!(
            transaction_outcome(transaction(r#"{"success": false}"#)),
            Err(LINK_NOT_FOUND)
        );
        assert_eq!(
            transaction_outcome(transaction(r#"{"success": true, "data": {"payment_link_id": "plink_1"}}"#)),
            Err(RESERVATION_NOT_FOUND)
        );
    }

    #[test]
    fn test_cancelled_reservation_cannot_be_paid() {
        let envelope: ApiEnvelope<CompleteReservationData> = serde_json::from_str(
            r#"{"success": true, "data": {"reservation": {"reservations": {"reservation": [
                {"reservationStatus": "Cancelled"}
            ]}}}}"#,
        )
        .unwrap();
        assert_eq!(reservation_outcome(envelope), Err(RESERVATION_CANCELLED));
    }
}
