use contracts::domain::a003_folio::aggregate::{
    folio_lines, CheckoutFolioResponse, FolioLine, FolioWindow,
};
use contracts::domain::a004_payment_link::aggregate::{join_ids, FolioPaymentRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_payment_link::api::generated_link;
use crate::layout::global_context::use_app_context;
use crate::shared::http::ApiError;
use crate::shared::qr::GeneratedLink;
use crate::shared::selection::SelectionList;

pub const NO_FOLIO_SELECTED: &str = "Please select at least one folio";
pub const FOLIO_LOAD_FAILED: &str = "Failed to load folio details";

/// Folio windows from a checkout folio response, or the message to show
pub fn checkout_folio_outcome(
    result: Result<CheckoutFolioResponse, ApiError>,
) -> Result<Vec<FolioWindow>, String> {
    result
        .map(|response| response.folio_windows().to_vec())
        .map_err(|e| e.user_message(FOLIO_LOAD_FAILED))
}

pub fn build_folio_request(
    hotel_id: &str,
    reservation_id: &str,
    folios: &SelectionList<FolioLine>,
) -> Result<FolioPaymentRequest, &'static str> {
    if !folios.has_selection() {
        return Err(NO_FOLIO_SELECTED);
    }
    Ok(FolioPaymentRequest {
        hotel_id: hotel_id.to_string(),
        reservation_id: reservation_id.to_string(),
        amount: folios.total(),
        folio_ids: join_ids(folios.selected_ids()),
    })
}

#[derive(Clone, Copy)]
pub struct FolioPanelVm {
    pub hotel_id: StoredValue<String>,
    pub reservation_id: StoredValue<String>,
    pub folios: RwSignal<SelectionList<FolioLine>>,
    /// Checkout folio is loading or already loaded
    pub requested: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub generating: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub show_payment_modal: RwSignal<bool>,
    pub generated: RwSignal<Option<GeneratedLink>>,
}

impl FolioPanelVm {
    pub fn new() -> Self {
        Self {
            hotel_id: StoredValue::new(String::new()),
            reservation_id: StoredValue::new(String::new()),
            folios: RwSignal::new(SelectionList::default()),
            requested: RwSignal::new(false),
            loading: RwSignal::new(false),
            generating: RwSignal::new(false),
            error: RwSignal::new(None),
            show_payment_modal: RwSignal::new(false),
            generated: RwSignal::new(None),
        }
    }

    pub fn set_reservation(&self, hotel_id: &str, reservation_id: &str) {
        self.hotel_id.set_value(hotel_id.to_string());
        self.reservation_id.set_value(reservation_id.to_string());
    }

    /// Folio windows delivered together with the reservation
    pub fn seed(&self, windows: &[FolioWindow]) {
        self.folios.set(SelectionList::new(folio_lines(windows)));
    }

    /// Fetch the checkout folio when the tab opens with no folios
    ///
    /// A failed load is retried on the next call.
    pub fn load_if_empty(&self) {
        if !self.folios.with_untracked(|f| f.is_empty()) || self.requested.get_untracked() {
            return;
        }
        let hotel_id = self.hotel_id.get_value();
        let reservation_id = self.reservation_id.get_value();
        if hotel_id.is_empty() || reservation_id.is_empty() {
            return;
        }

        let payments = use_app_context().payments;
        let vm = *self;
        vm.requested.set(true);
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = payments.get_checkout_folio(&hotel_id, &reservation_id).await;
            if let Err(e) = &result {
                log::error!("Folio load error: {}", e);
            }
            match checkout_folio_outcome(result) {
                Ok(windows) => vm.seed(&windows),
                Err(message) => {
                    vm.requested.set(false);
                    vm.error.set(Some(message));
                }
            }
            vm.loading.set(false);
        });
    }

    pub fn total(&self) -> f64 {
        self.folios.with(|f| f.total())
    }

    pub fn all_selected(&self) -> bool {
        self.folios.with(|f| f.all_selected())
    }

    pub fn toggle_all(&self, selected: bool) {
        self.folios.update(|f| f.set_all(selected));
    }

    pub fn toggle(&self, index: usize, selected: bool) {
        self.folios.update(|f| f.set_selected(index, selected));
    }

    pub fn generate_command(&self) {
        let request = self.folios.with_untracked(|folios| {
            build_folio_request(
                &self.hotel_id.get_value(),
                &self.reservation_id.get_value(),
                folios,
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
            let result = context.payments.generate_folio_payment_link(&request).await;
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
