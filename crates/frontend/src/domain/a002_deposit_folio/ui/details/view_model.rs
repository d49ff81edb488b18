use contracts::domain::a002_deposit_folio::aggregate::{DepositFolioData, DepositPolicyLine};
use contracts::domain::a004_payment_link::aggregate::{
    join_ids, DepositPaymentRequest, DEPOSIT_PAYMENT_TYPE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_payment_link::api::generated_link;
use crate::layout::global_context::use_app_context;
use crate::shared::qr::GeneratedLink;
use crate::shared::selection::SelectionList;

pub const NO_POLICY_SELECTED: &str = "Please select at least one deposit policy with amount due";
const LOAD_FAILED: &str = "Failed to load deposit details";

/// Deposit request for the selected policies
///
/// Requires at least one selected policy and a positive total.
pub fn build_deposit_request(
    hotel_id: &str,
    reservation_id: &str,
    policies: &SelectionList<DepositPolicyLine>,
) -> Result<DepositPaymentRequest, &'static str> {
    let amount = policies.total();
    if !policies.has_selection() || amount <= 0.0 {
        return Err(NO_POLICY_SELECTED);
    }
    Ok(DepositPaymentRequest {
        hotel_id: hotel_id.to_string(),
        reservation_id: reservation_id.to_string(),
        amount,
        policy_ids: join_ids(policies.selected_ids()),
        payment_type: DEPOSIT_PAYMENT_TYPE.to_string(),
    })
}

/// ViewModel панели депозитов
#[derive(Clone, Copy)]
pub struct DepositPanelVm {
    pub hotel_id: StoredValue<String>,
    pub reservation_id: StoredValue<String>,
    pub policies: RwSignal<SelectionList<DepositPolicyLine>>,
    pub loading: RwSignal<bool>,
    pub generating: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub show_payment_modal: RwSignal<bool>,
    pub generated: RwSignal<Option<GeneratedLink>>,
}

impl DepositPanelVm {
    pub fn new(hotel_id: String, reservation_id: String) -> Self {
        Self {
            hotel_id: StoredValue::new(hotel_id),
            reservation_id: StoredValue::new(reservation_id),
            policies: RwSignal::new(SelectionList::default()),
            loading: RwSignal::new(false),
            generating: RwSignal::new(false),
            error: RwSignal::new(None),
            show_payment_modal: RwSignal::new(false),
            generated: RwSignal::new(None),
        }
    }

    /// Follow the shared deposit folio cache; every new folio for this
    /// reservation resets the selection.
    pub fn bind_to_cache(&self) {
        let reservations = use_app_context().reservations;
        let cache = reservations.deposit_folio_data();
        let vm = *self;
        Effect::new(move |_| {
            if let Some(data) = cache.get() {
                if reservations
                    .has_deposit_folio_for(&vm.hotel_id.get_value(), &vm.reservation_id.get_value())
                {
                    vm.policies.set(Self::selection_from(&data));
                }
            }
        });
    }

    pub fn selection_from(data: &DepositFolioData) -> SelectionList<DepositPolicyLine> {
        SelectionList::new(data.policy_lines())
    }

    /// Fetch the deposit folio unless this reservation's one is cached
    pub fn load_if_needed(&self) {
        let hotel_id = self.hotel_id.get_value();
        let reservation_id = self.reservation_id.get_value();
        if hotel_id.is_empty() || reservation_id.is_empty() {
            return;
        }
        let reservations = use_app_context().reservations;
        if reservations.has_deposit_folio_for(&hotel_id, &reservation_id) {
            return;
        }

        let loading = self.loading;
        let error = self.error;
        loading.set(true);
        spawn_local(async move {
            if let Err(e) = reservations.get_deposit_folio(&hotel_id, &reservation_id).await {
                log::error!("Deposit folio load error: {}", e);
                error.set(Some(e.user_message(LOAD_FAILED)));
            }
            loading.set(false);
        });
    }

    pub fn total(&self) -> f64 {
        self.policies.with(|p| p.total())
    }

    pub fn all_selected(&self) -> bool {
        self.policies.with(|p| p.all_selected())
    }

    pub fn toggle_all(&self, selected: bool) {
        self.policies.update(|p| p.set_all(selected));
    }

    pub fn toggle(&self, index: usize, selected: bool) {
        self.policies.update(|p| p.set_selected(index, selected));
    }

    pub fn generate_command(&self) {
        let request = self.policies.with_untracked(|policies| {
            build_deposit_request(
                &self.hotel_id.get_value(),
                &self.reservation_id.get_value(),
                policies,
            )
        });
        let request = match request {
            Ok(request) => request,
            Err(message) => {
                self.error.set(Some(message.to_string()));
                return;
            }
        };

        let context = use_app_context();
        let vm = *self;
        vm.error.set(None);
        vm.generating.set(true);
        spawn_local(async move {
            let result = context.payments.generate_deposit_payment_link(&request).await;
            match generated_link(result, &context.config.qr) {
                Ok(link) => {
                    vm.generated.set(Some(link));
                    vm.show_payment_modal.set(true);
                }
                Err(message) => vm.error.set(Some(message)),
            }
            vm.generating.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, amount: f64) -> DepositPolicyLine {
        DepositPolicyLine {
            policy_id: id.into(),
            revenue_type: "Room".into(),
            deadline: "1st Mar, 24".into(),
            amount_due: amount,
        }
    }

    #[test]
    fn test_request_for_selected_policies() {
        let mut policies =
            SelectionList::new(vec![line("P0", 0.0), line("P1", 100.0), line("P2", 250.0)]);
        let request = build_deposit_request("EVOLVE", "771203", &policies).unwrap();
        assert_eq!(request.amount, 350.0);
        assert_eq!(request.policy_ids, "P1,P2");
        assert_eq!(request.payment_type, "deposit");

        policies.set_selected(1, false);
        let request = build_deposit_request("EVOLVE", "771203", &policies).unwrap();
        assert_eq!(request.amount, 250.0);
        assert_eq!(request.policy_ids, "P2");
    }

    #[test]
    fn test_nothing_selected_is_rejected() {
        let mut policies = SelectionList::new(vec![line("P1", 100.0)]);
        policies.set_all(false);
        assert_eq!(
            build_deposit_request("EVOLVE", "771203", &policies),
            Err(NO_POLICY_SELECTED)
        );

        let nothing_due = SelectionList::new(vec![line("P0", 0.0)]);
        assert_eq!(
            build_deposit_request("EVOLVE", "771203", &nothing_due),
            Err(NO_POLICY_SELECTED)
        );
    }

    #[test]
    fn test_selection_from_folio() {
        let data: DepositFolioData = serde_json::from_str(
            r#"{"reservationDepositFoliosInfo": [{"policySummaryInfo": {"depositPolicies": [
                {"revenueType": "Room", "amountDue": {"amount": 0}, "policyId": {"id": "P0"}},
                {"revenueType": "Room", "amountDue": {"amount": 4500}, "policyId": {"id": "P1"}}
            ]}}]}"#,
        )
        .unwrap();
        let selection = DepositPanelVm::selection_from(&data);
        assert!(selection.lines()[0].disabled);
        assert!(selection.all_selected());
        assert_eq!(selection.total(), 4500.0);
    }
}
