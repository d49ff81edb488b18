use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_reservation::ui::details::ReservationPage;
use crate::domain::a002_deposit_folio::ui::details::DepositPage;
use crate::domain::a004_payment_link::ui::details::PaymentLinkPage;
use crate::layout::Shell;
use crate::shared::api_utils::current_search;
use crate::system::pages::payment_failure::PaymentFailurePage;
use crate::system::pages::payment_success::PaymentSuccessPage;

/// Маршруты приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    Reservation,
    Deposit,
    PaymentLink,
    PaymentSuccess,
    PaymentFailure,
}

impl AppRoute {
    pub const ALL: [AppRoute; 5] = [
        AppRoute::Reservation,
        AppRoute::Deposit,
        AppRoute::PaymentLink,
        AppRoute::PaymentSuccess,
        AppRoute::PaymentFailure,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AppRoute::Reservation => "/reservation",
            AppRoute::Deposit => "/deposit",
            AppRoute::PaymentLink => "/payment-link",
            AppRoute::PaymentSuccess => "/payment-success",
            AppRoute::PaymentFailure => "/payment-failure",
        }
    }

    /// Route for a location path; `""`, `/` and unknown paths fall back to the reservation page
    pub fn from_path(path: &str) -> AppRoute {
        let path = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(AppRoute::Reservation)
    }
}

/// Redirect to the reservation page keeping the query (hotelID, reservationID)
#[component]
fn ToReservation() -> impl IntoView {
    let target = format!("{}{}", AppRoute::Reservation.path(), current_search());
    view! { <Redirect path=target /> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <ToReservation /> }>
                    <Route path=path!("/") view=ToReservation />
                    <Route path=path!("/reservation") view=ReservationPage />
                    <Route path=path!("/deposit") view=DepositPage />
                    <Route path=path!("/payment-link") view=PaymentLinkPage />
                    <Route path=path!("/payment-success") view=PaymentSuccessPage />
                    <Route path=path!("/payment-failure") view=PaymentFailurePage />
                </Routes>
            </Shell>
        </Router>
    }
}
