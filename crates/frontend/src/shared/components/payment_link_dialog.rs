//! Диалог с готовой ссылкой на оплату: короткая ссылка, QR-код, копирование

use leptos::prelude::*;
use thaw::*;

use crate::shared::clipboard::copy_text;
use crate::shared::qr::GeneratedLink;

#[component]
pub fn PaymentLinkDialog(
    open: RwSignal<bool>,
    #[prop(into)] link: Signal<Option<GeneratedLink>>,
) -> impl IntoView {
    let copied = RwSignal::new(false);

    // сбрасываем отметку "скопировано" при каждом открытии
    Effect::new(move |_| {
        if open.get() {
            copied.set(false);
        }
    });

    let on_copy = move |_| {
        if let Some(generated) = link.get_untracked() {
            copy_text(&generated.url, move || copied.set(true));
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Payment Link Generated"</DialogTitle>
                    <DialogContent>
                        {move || link.get().map(|generated| view! {
                            <div class="payment-link">
                                <img
                                    class="payment-link__qr"
                                    src=generated.qr_code.clone()
                                    alt="Payment QR code"
                                    width="200"
                                    height="200"
                                />
                                <p class="payment-link__hint">
                                    "Scan the QR code or share the link below"
                                </p>
                                <a
                                    class="payment-link__url"
                                    href=generated.url.clone()
                                    target="_blank"
                                    rel="noopener"
                                >
                                    {generated.url.clone()}
                                </a>
                            </div>
                        })}
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Primary on_click=on_copy>
                            {move || if copied.get() { "Copied!" } else { "Copy Link" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| open.set(false)
                        >
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
