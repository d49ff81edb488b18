//! Страница неудачной оплаты: модальное окно с типичными причинами

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::routes::routes::AppRoute;
use crate::shared::api_utils::current_search;

/// Задержка перед переходом, чтобы успела отыграть анимация закрытия
const CLOSE_DELAY_MS: u32 = 300;

pub const FAILURE_REASONS: [&str; 4] = [
    "Insufficient funds",
    "Incorrect card details",
    "Card expired or blocked",
    "Network connection issue",
];

/// Where "Try Again" leads: the reservation page with the current query kept
pub fn retry_target(search: &str) -> String {
    format!("{}{}", AppRoute::Reservation.path(), search)
}

pub fn support_mailto(email: &str) -> Option<String> {
    let email = email.trim();
    (!email.is_empty()).then(|| format!("mailto:{}?subject=Payment%20failed", email))
}

#[component]
pub fn PaymentFailurePage() -> impl IntoView {
    let open = RwSignal::new(true);
    let leave_to = RwSignal::new(None::<String>);
    let support = support_mailto(&use_app_context().config.support.email);

    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(target) = leave_to.get() {
            let navigate = navigate.clone();
            spawn_local(async move {
                TimeoutFuture::new(CLOSE_DELAY_MS).await;
                navigate(&target, NavigateOptions::default());
            });
        }
    });

    let leave = move |target: String| {
        open.set(false);
        leave_to.set(Some(target));
    };
    let on_close = move |_| leave("/".to_string());
    let on_retry = move |_| leave(retry_target(&current_search()));

    view! {
        <div class="payment-result payment-failure">
            <Dialog open=open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Payment Failed"</DialogTitle>
                        <DialogContent>
                            <p>"We couldn't process your payment. Common reasons include:"</p>
                            <ul class="payment-failure__reasons">
                                {FAILURE_REASONS
                                    .iter()
                                    .map(|reason| view! { <li>{*reason}</li> })
                                    .collect_view()}
                            </ul>
                            <p>"No amount has been deducted. If it was, it will be refunded automatically."</p>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Primary on_click=on_retry>
                                "Try Again"
                            </Button>
                            {support.map(|href| view! {
                                <a class="payment-failure__support" href=href>
                                    "Contact Support"
                                </a>
                            })}
                            <Button appearance=ButtonAppearance::Subtle on_click=on_close>
                                "Close"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_keeps_reservation_context() {
        assert_eq!(
            retry_target("?hotelID=EVOLVE&reservationID=771203"),
            "/reservation?hotelID=EVOLVE&reservationID=771203"
        );
        assert_eq!(retry_target(""), "/reservation");
    }

    #[test]
    fn test_support_mailto_hidden_without_address() {
        assert_eq!(support_mailto("  "), None);
        assert_eq!(
            support_mailto("help@hotel.example"),
            Some("mailto:help@hotel.example?subject=Payment%20failed".into())
        );
    }
}
