use contracts::domain::a001_reservation::summary::ReservationSummary;
use leptos::prelude::*;

/// Карточка бронирования в шапке страницы оплаты
#[component]
pub fn ReservationCard(#[prop(into)] summary: Signal<ReservationSummary>) -> impl IntoView {
    let row = move |label: &'static str, value: Signal<String>| {
        view! {
            <div class="reservation-card__row">
                <span class="reservation-card__label">{label}</span>
                <span class="reservation-card__value">{move || value.get()}</span>
            </div>
        }
    };
    let field = move |f: fn(&ReservationSummary) -> String| {
        Signal::derive(move || summary.with(f))
    };

    view! {
        <div class="reservation-card">
            <h2 class="reservation-card__guest">{move || summary.with(|s| s.guest.clone())}</h2>
            {row("Reservation No", field(|s| s.res_no.clone()))}
            {row("Confirmation No", field(|s| s.confirmation_no.clone()))}
            {row("Check-in", field(|s| s.check_in.clone()))}
            {row("Check-out", field(|s| s.check_out.clone()))}
            {row("Total Amount", field(|s| format!("₹ {}", s.amount)))}
            {row("Status", field(|s| s.status.clone()))}
        </div>
    }
}
