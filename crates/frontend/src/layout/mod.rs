pub mod global_context;

use leptos::prelude::*;

/// Рамка страницы оплаты: шапка, содержимое, подвал
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="app-header">
                <span class="app-header__title">"Guest Payments"</span>
            </header>
            <main class="app-content">{children()}</main>
            <footer class="app-footer">
                "Payments are processed securely by our payment partner."
            </footer>
        </div>
    }
}
