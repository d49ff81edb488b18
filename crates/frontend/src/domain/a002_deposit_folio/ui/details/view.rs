use contracts::shared::format::format_amount_en_in;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use thaw::*;

use super::view_model::DepositPanelVm;
use crate::shared::components::payment_link_dialog::PaymentLinkDialog;
use crate::shared::components::table_checkbox::{HeaderCheckbox, TableCheckbox};

/// Панель депозитов: таблица политик, итог, генерация ссылки
#[component]
pub fn DepositPanel(hotel_id: String, reservation_id: String) -> impl IntoView {
    let vm = DepositPanelVm::new(hotel_id, reservation_id);
    vm.bind_to_cache();
    vm.load_if_needed();

    let has_payable = Signal::derive(move || vm.policies.with(|p| p.has_payable()));

    view! {
        <div class="deposit-panel">
            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div>{e}</div>
                </MessageBar>
            })}

            <Show when=move || vm.loading.get()>
                <Spinner />
            </Show>

            <Show
                when=move || !vm.policies.with(|p| p.is_empty())
                fallback=move || view! {
                    <Show when=move || !vm.loading.get()>
                        <p class="empty-state">"No deposit policies for this reservation"</p>
                    </Show>
                }
            >
                <table class="table deposit-table">
                    <thead>
                        <tr>
                            <HeaderCheckbox
                                checked=Signal::derive(move || vm.all_selected())
                                on_change=Callback::new(move |checked| vm.toggle_all(checked))
                                disabled=Signal::derive(move || !has_payable.get())
                            />
                            <th>"Revenue Type"</th>
                            <th>"Deadline"</th>
                            <th class="table__cell--amount">"Amount Due"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || vm.policies.with(|policies| {
                            policies
                                .lines()
                                .iter()
                                .enumerate()
                                .map(|(index, line)| {
                                    let row_class = if line.disabled { "table__row table__row--disabled" } else { "table__row" };
                                    view! {
                                        <tr class=row_class>
                                            <TableCheckbox
                                                checked=line.selected
                                                on_change=Callback::new(move |checked| vm.toggle(index, checked))
                                                disabled=line.disabled
                                            />
                                            <td>{line.item.revenue_type.clone()}</td>
                                            <td>{line.item.deadline.clone()}</td>
                                            <td class="table__cell--amount">
                                                {format!("₹ {}", format_amount_en_in(line.item.amount_due))}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })}
                    </tbody>
                    <tfoot>
                        <tr class="table__totals">
                            <td colspan="3">"Total"</td>
                            <td class="table__cell--amount">
                                {move || format!("₹ {}", format_amount_en_in(vm.total()))}
                            </td>
                        </tr>
                    </tfoot>
                </table>

                <div class="panel-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        loading=vm.generating
                        disabled=Signal::derive(move || vm.generating.get() || vm.total() <= 0.0)
                        on_click=move |_| vm.generate_command()
                    >
                        "Generate Payment Link"
                    </Button>
                </div>
            </Show>

            <PaymentLinkDialog open=vm.show_payment_modal link=vm.generated />
        </div>
    }
}

/// Отдельная страница `/deposit`
#[component]
pub fn DepositPage() -> impl IntoView {
    let query = use_query_map();
    let (hotel_id, reservation_id) = query.with_untracked(|params| {
        (
            params.get("hotelID").unwrap_or_default(),
            params.get("reservationID").unwrap_or_default(),
        )
    });

    view! {
        <div class="page deposit-page">
            <h1 class="page__title">"Deposit Payment"</h1>
            <DepositPanel hotel_id=hotel_id reservation_id=reservation_id />
        </div>
    }
}
