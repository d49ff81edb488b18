use contracts::shared::format::format_long_date;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use thaw::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

use super::view_model::PaymentLinkVm;

/// Страница `/payment-link?paymentLinkId=..`
#[component]
pub fn PaymentLinkPage() -> impl IntoView {
    let query = use_query_map();
    let payment_link_id = query.with_untracked(|params| params.get("paymentLinkId").unwrap_or_default());

    let vm = PaymentLinkVm::new(payment_link_id);
    vm.fetch_payment_link_details();
    listen_for_gateway_messages(vm);

    view! {
        <div class="page payment-link-page">
            <Show when=move || vm.loading.get()>
                <div class="page__loading">
                    <Spinner />
                    <span>"Loading payment details..."</span>
                </div>
            </Show>

            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <div>{e}</div>
                </MessageBar>
            })}

            {move || vm.summary.get().map(|s| {
                let nights = s.nights.map(|n| format!("{} night(s)", n)).unwrap_or_default();
                view! {
                    <div class="stay-summary">
                        <h2>{s.guest.clone()}</h2>
                        <div class="stay-summary__contacts">
                            <span>{s.email.clone()}</span>
                            <span>{s.mobile.clone()}</span>
                        </div>
                        <div class="stay-summary__row">
                            <span>"Reservation No"</span>
                            <span>{s.res_no.clone()}</span>
                        </div>
                        <div class="stay-summary__row">
                            <span>"Room"</span>
                            <span>{s.room_type.clone()}</span>
                        </div>
                        <div class="stay-summary__row">
                            <span>"Check-in"</span>
                            <span>{format_long_date(Some(&s.arrival_date))}</span>
                        </div>
                        <div class="stay-summary__row">
                            <span>"Check-out"</span>
                            <span>{format_long_date(Some(&s.departure_date))}</span>
                        </div>
                        <div class="stay-summary__row">
                            <span>"Stay"</span>
                            <span>{nights}</span>
                        </div>
                        <div class="stay-summary__row stay-summary__row--amount">
                            <span>"Amount to Pay"</span>
                            <span>{move || format!("₹ {}", vm.payment_amount())}</span>
                        </div>
                    </div>
                }
            })}

            <Show when=move || vm.payment_completed.get()>
                <div class="payment-result payment-success">
                    <h2>"Payment Completed"</h2>
                    <p>"Thank you! Your payment has been received."</p>
                </div>
            </Show>

            <Show when=move || vm.show_payment_frame.get() && !vm.payment_completed.get()>
                {move || vm.checkout_url().map(|url| view! {
                    <iframe
                        class="payment-frame"
                        src=url
                        title="Secure payment"
                        allow="payment"
                    ></iframe>
                })}
            </Show>

            <div class="page__actions">
                <A href="/">"Home"</A>
            </div>
        </div>
    }
}

/// Подписка на `message` от фрейма платёжного шлюза
fn listen_for_gateway_messages(vm: PaymentLinkVm) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(message) = event.dyn_ref::<web_sys::MessageEvent>() {
            if let Some(data) = message.data().as_string() {
                vm.handle_gateway_message(&data);
            }
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web_sys::window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            log::warn!("Cannot listen for gateway messages: {:?}", e);
        }
        // listener stays registered for the rest of the session
        closure.forget();
    }
}
