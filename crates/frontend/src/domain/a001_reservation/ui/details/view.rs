use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use thaw::*;

use super::view_model::{PaymentTab, ReservationDetailsVm};
use crate::domain::a002_deposit_folio::ui::details::DepositPanel;
use crate::domain::a003_folio::ui::details::FolioPanel;
use crate::shared::components::payment_link_dialog::PaymentLinkDialog;
use crate::shared::components::reservation_card::ReservationCard;

/// Страница `/reservation?hotelID=..&reservationID=..`
#[component]
pub fn ReservationPage() -> impl IntoView {
    let query = use_query_map();
    let (hotel_id, reservation_id) = query.with_untracked(|params| {
        (
            params.get("hotelID").unwrap_or_default(),
            params.get("reservationID").unwrap_or_default(),
        )
    });

    let vm = ReservationDetailsVm::new(hotel_id, reservation_id);
    vm.load();

    view! {
        <div class="page reservation-page">
            <Show when=move || vm.loading.get()>
                <div class="page__loading">
                    <Spinner />
                    <span>"Loading reservation..."</span>
                </div>
            </Show>

            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div>{e}</div>
                </MessageBar>
            })}

            <Show when=move || vm.is_valid_reservation()>
                <ReservationCard summary=Signal::derive(move || vm.summary.get().unwrap_or_default()) />
                <TabBar vm=vm />
                <TabContent vm=vm />
            </Show>

            <PaymentLinkDialog open=vm.show_payment_modal link=vm.generated />
        </div>
    }
}

/// Переключатель вкладок оплаты
#[component]
fn TabBar(vm: ReservationDetailsVm) -> impl IntoView {
    let active_tab = vm.active_tab;

    view! {
        <div class="payment-tabs">
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            {PaymentTab::ALL
                .into_iter()
                .map(|tab| view! {
                    <Button
                        appearance=Signal::derive(move || if active_tab.get() == tab {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Subtle
                        })
                        on_click=move |_| vm.set_tab(tab)
                    >
                        {tab.label()}
                    </Button>
                })
                .collect_view()}
        </Flex>
        </div>
    }
}

/// All panels stay mounted so selections survive tab switches
#[component]
fn TabContent(vm: ReservationDetailsVm) -> impl IntoView {
    let display = move |tab: PaymentTab| move || {
        if vm.active_tab.get() == tab { "block" } else { "none" }
    };

    view! {
        <div class="tab-content">
            <div style:display=display(PaymentTab::Deposit)>
                <DepositPanel
                    hotel_id=vm.hotel_id.get_value()
                    reservation_id=vm.reservation_id.get_value()
                />
            </div>
            <div style:display=display(PaymentTab::Adhoc)>
                <AdhocPanel vm=vm />
            </div>
            <div style:display=display(PaymentTab::Folio)>
                <FolioPanel vm=vm.folio />
            </div>
        </div>
    }
}

#[component]
fn AdhocPanel(vm: ReservationDetailsVm) -> impl IntoView {
    view! {
        <div class="adhoc-panel">
            <p>"Generate a payment link for any amount."</p>

            {move || vm.adhoc_error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div>{e}</div>
                </MessageBar>
            })}

            <Show
                when=move || vm.show_adhoc_input.get()
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.show_enter_amount()
                    >
                        "Enter Amount"
                    </Button>
                }
            >
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <span class="adhoc-panel__currency">"₹"</span>
                    <Input
                        input_type=InputType::Number
                        value=vm.adhoc_amount
                        placeholder="Amount"
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        loading=vm.adhoc_generating
                        disabled=vm.adhoc_generating
                        on_click=move |_| vm.generate_adhoc_command()
                    >
                        "Generate Payment Link"
                    </Button>
                </Flex>
            </Show>
        </div>
    }
}
