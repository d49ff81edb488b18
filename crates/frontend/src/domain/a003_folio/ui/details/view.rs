use contracts::shared::format::format_amount_en_in;
use leptos::prelude::*;
use thaw::*;

use super::view_model::FolioPanelVm;
use crate::shared::components::payment_link_dialog::PaymentLinkDialog;
use crate::shared::components::table_checkbox::{HeaderCheckbox, TableCheckbox};

#[component]
pub fn FolioPanel(vm: FolioPanelVm) -> impl IntoView {
    let has_payable = Signal::derive(move || vm.folios.with(|f| f.has_payable()));

    view! {
        <div class="folio-panel">
            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div>{e}</div>
                </MessageBar>
            })}

            <Show when=move || vm.loading.get()>
                <Spinner />
            </Show>

            <Show
                when=move || !vm.folios.with(|f| f.is_empty())
                fallback=move || view! {
                    <Show when=move || !vm.loading.get()>
                        <p class="empty-state">"No folios available"</p>
                    </Show>
                }
            >
                <table class="table folio-table">
                    <thead>
                        <tr>
                            <HeaderCheckbox
                                checked=Signal::derive(move || vm.all_selected())
                                on_change=Callback::new(move |checked| vm.toggle_all(checked))
                                disabled=Signal::derive(move || !has_payable.get())
                            />
                            <th>"#"</th>
                            <th>"Window"</th>
                            <th>"Reference"</th>
                            <th class="table__cell--amount">"Paid"</th>
                            <th class="table__cell--amount">"Balance"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || vm.folios.with(|folios| {
                            folios
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
                                            <td>{line.item.row_id}</td>
                                            <td>{line.item.folio_window_no}</td>
                                            <td>{line.item.reference.clone()}</td>
                                            <td class="table__cell--amount">
                                                {format_amount_en_in(line.item.payment_amount)}
                                            </td>
                                            <td class="table__cell--amount">
                                                {format_amount_en_in(line.item.balance_amount)}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })}
                    </tbody>
                    <tfoot>
                        <tr class="table__totals">
                            <td colspan="5">"Total"</td>
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
                        disabled=Signal::derive(move || vm.generating.get() || !vm.folios.with(|f| f.has_selection()))
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
