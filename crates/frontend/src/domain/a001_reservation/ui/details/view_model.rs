use contracts::domain::a001_reservation::aggregate::CompleteReservationData;
use contracts::domain::a001_reservation::summary::{ReservationSummary, SummaryError};
use contracts::domain::a003_folio::aggregate::FolioWindow;
use contracts::domain::a004_payment_link::aggregate::{AdhocPaymentRequest, ADHOC_DESCRIPTION};
use contracts::shared::envelope::ApiEnvelope;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a003_folio::ui::details::FolioPanelVm;
use crate::domain::a004_payment_link::api::generated_link;
use crate::layout::global_context::use_app_context;
use crate::shared::qr::GeneratedLink;

pub const INVALID_LINK: &str = "Invalid Link: Missing hotel ID or reservation ID";
pub const NOT_FOUND: &str = "Reservation not found";
pub const CANCELLED: &str = "Invalid Reservation: This reservation has been cancelled";
pub const LOAD_FAILED: &str = "Failed to load reservation data";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTab {
    Deposit,
    Adhoc,
    Folio,
}

impl PaymentTab {
    pub const ALL: [PaymentTab; 3] = [PaymentTab::Deposit, PaymentTab::Adhoc, PaymentTab::Folio];

    pub fn label(self) -> &'static str {
        match self {
            PaymentTab::Deposit => "Deposit",
            PaymentTab::Adhoc => "Ad-hoc Payment",
            PaymentTab::Folio => "Folio",
        }
    }
}

pub fn check_link(hotel_id: &str, reservation_id: &str) -> Result<(), &'static str> {
    if hotel_id.trim().is_empty() || reservation_id.trim().is_empty() {
        Err(INVALID_LINK)
    } else {
        Ok(())
    }
}

/// Summary and folios of a payable reservation, or the message to show
pub fn reservation_outcome(
    envelope: ApiEnvelope<CompleteReservationData>,
) -> Result<(ReservationSummary, Vec<FolioWindow>), &'static str> {
    let data = envelope.into_data().ok_or(NOT_FOUND)?;
    match ReservationSummary::from_data(&data.reservation) {
        Ok(summary) => Ok((summary, data.folios.unwrap_or_default())),
        Err(SummaryError::NotFound) => Err(NOT_FOUND),
        Err(SummaryError::Cancelled) => Err(CANCELLED),
    }
}

pub fn parse_adhoc_amount(input: &str) -> Result<f64, &'static str> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(INVALID_AMOUNT),
    }
}

pub fn build_adhoc_request(hotel_id: &str, reservation_id: &str, amount: f64) -> AdhocPaymentRequest {
    AdhocPaymentRequest {
        hotel_id: hotel_id.to_string(),
        reservation_id: reservation_id.to_string(),
        amount,
        description: Some(ADHOC_DESCRIPTION.to_string()),
    }
}

/// ViewModel страницы бронирования
#[derive(Clone, Copy)]
pub struct ReservationDetailsVm {
    pub hotel_id: StoredValue<String>,
    pub reservation_id: StoredValue<String>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// Set only for a payable (found, not cancelled) reservation
    pub summary: RwSignal<Option<ReservationSummary>>,
    pub active_tab: RwSignal<PaymentTab>,
    pub folio: FolioPanelVm,
    pub show_adhoc_input: RwSignal<bool>,
    pub adhoc_amount: RwSignal<String>,
    pub adhoc_error: RwSignal<Option<String>>,
    pub adhoc_generating: RwSignal<bool>,
    pub show_payment_modal: RwSignal<bool>,
    pub generated: RwSignal<Option<GeneratedLink>>,
}

impl ReservationDetailsVm {
    pub fn new(hotel_id: String, reservation_id: String) -> Self {
        let folio = FolioPanelVm::new();
        folio.set_reservation(&hotel_id, &reservation_id);
        Self {
            hotel_id: StoredValue::new(hotel_id),
            reservation_id: StoredValue::new(reservation_id),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            summary: RwSignal::new(None),
            active_tab: RwSignal::new(PaymentTab::Deposit),
            folio,
            show_adhoc_input: RwSignal::new(false),
            adhoc_amount: RwSignal::new(String::new()),
            adhoc_error: RwSignal::new(None),
            adhoc_generating: RwSignal::new(false),
            show_payment_modal: RwSignal::new(false),
            generated: RwSignal::new(None),
        }
    }

    pub fn is_valid_reservation(&self) -> bool {
        self.summary.with(|s| s.is_some())
    }

    /// Load the reservation, its folios and the deposit folio cache
    pub fn load(&self) {
        let hotel_id = self.hotel_id.get_value();
        let reservation_id = self.reservation_id.get_value();
        if let Err(message) = check_link(&hotel_id, &reservation_id) {
            self.error.set(Some(message.to_string()));
            self.loading.set(false);
            return;
        }

        let reservations = use_app_context().reservations;
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            let result = reservations
                .get_complete_reservation_data(&hotel_id, &reservation_id)
                .await;
            let outcome = match result {
                Ok(envelope) => reservation_outcome(envelope).map_err(str::to_string),
                Err(e) => {
                    log::error!("Reservation load error: {}", e);
                    Err(e.user_message(LOAD_FAILED))
                }
            };

            match outcome {
                Ok((summary, folios)) => {
                    if !folios.is_empty() {
                        vm.folio.seed(&folios);
                    }
                    // deposit panel reads the shared cache
                    if let Err(e) = reservations.get_deposit_folio(&hotel_id, &reservation_id).await {
                        log::warn!("Deposit folio load error: {}", e);
                    }
                    vm.summary.set(Some(summary));
                }
                Err(message) => vm.error.set(Some(message)),
            }
            vm.loading.set(false);
        });
    }

    pub fn set_tab(&self, tab: PaymentTab) {
        self.active_tab.set(tab);
        if tab == PaymentTab::Folio {
            self.folio.load_if_empty();
        }
    }

    pub fn show_enter_amount(&self) {
        self.show_adhoc_input.set(true);
    }

    pub fn generate_adhoc_command(&self) {
        let amount = match parse_adhoc_amount(&self.adhoc_amount.get_untracked()) {
            Ok(amount) => amount,
            Err(message) => {
                self.adhoc_error.set(Some(message.to_string()));
                return;
            }
        };
        let request = build_adhoc_request(
            &self.hotel_id.get_value(),
            &self.reservation_id.get_value(),
            amount,
        );

        let context = use_app_context();
        let vm = *self;
        vm.adhoc_error.set(None);
        vm.adhoc_generating.set(true);
        spawn_local(async move {
            let result = context.payments.generate_adhoc_payment_link(&request).await;
            match generated_link(result, &context.config.qr) {
                Ok(link) => {
                    vm.generated.set(Some(link));
                    vm.show_payment_modal.set(true);
                }
                Err(message) => vm.adhoc_error.set(Some(message)),
            }
            vm.adhoc_generating.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: &str, folios: &str) -> ApiEnvelope<CompleteReservationData> {
        serde_json::from_str(&format!(
            r#"{{"success": true, "data": {{
                "reservation": {{"reservations": {{"reservation": [{{
                    "reservationIdList": [{{"id": "771203", "type": "Reservation"}}],
                    "reservationStatus": "{status}"
                }}]}}}},
                "folios": {folios}
            }}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_missing_identifiers() {
        assert_eq!(check_link("", "771203"), Err(INVALID_LINK));
        assert_eq!(check_link("EVOLVE", " "), Err(INVALID_LINK));
        assert_eq!(check_link("EVOLVE", "771203"), Ok(()));
    }

    #[test]
    fn test_payable_reservation() {
        let (summary, folios) =
            reservation_outcome(envelope("Reserved", r#"[{"folioWindowNo": 1}]"#)).unwrap();
        assert_eq!(summary.res_no, "771203");
        assert_eq!(folios.len(), 1);
    }

    #[test]
    fn test_cancelled_reservation_is_blocked() {
        assert_eq!(
            reservation_outcome(envelope("Cancelled", "null")),
            Err(CANCELLED)
        );
        assert_eq!(reservation_outcome(envelope("Cancel", "null")), Err(CANCELLED));
    }

    #[test]
    fn test_unsuccessful_or_empty_envelope_is_not_found() {
        let failed: ApiEnvelope<CompleteReservationData> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert_eq!(reservation_outcome(failed), Err(NOT_FOUND));

        let empty: ApiEnvelope<CompleteReservationData> = serde_json::from_str(
            r#"{"success": true, "data": {"reservation": {"reservations": {"reservation": []}}}}"#,
        )
        .unwrap();
        assert_eq!(reservation_outcome(empty), Err(NOT_FOUND));
    }

    #[test]
    fn test_adhoc_amount_validation() {
        assert_eq!(parse_adhoc_amount("1500"), Ok(1500.0));
        assert_eq!(parse_adhoc_amount(" 99.50 "), Ok(99.5));
        assert_eq!(parse_adhoc_amount(""), Err(INVALID_AMOUNT));
        assert_eq!(parse_adhoc_amount("0"), Err(INVALID_AMOUNT));
        assert_eq!(parse_adhoc_amount("-10"), Err(INVALID_AMOUNT));
        assert_eq!(parse_adhoc_amount("abc"), Err(INVALID_AMOUNT));
        assert_eq!(parse_adhoc_amount("NaN"), Err(INVALID_AMOUNT));
    }

    #[test]
    fn test_adhoc_request() {
        let request = build_adhoc_request("EVOLVE", "771203", 1500.0);
        assert_eq!(request.amount, 1500.0);
        assert_eq!(request.description.as_deref(), Some("Adhoc payment"));
    }
}
