//! Страница подтверждения оплаты (редирект со шлюза)

use chrono::Local;
use contracts::shared::format::{format_receipt_time, NOT_AVAILABLE};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use thaw::*;

use crate::shared::clipboard::copy_text;

const PAID_STATUS: &str = "paid";
const DEFAULT_STATUS: &str = "completed";

/// Платёж по данным callback-параметров шлюза
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub payment_link_id: String,
    pub reference_id: String,
    pub status: String,
    pub signature: String,
}

impl PaymentReceipt {
    /// `query` looks up a callback parameter; `fallback_id` is used when the
    /// gateway did not send a payment id.
    pub fn from_query<Q, F>(query: Q, fallback_id: F) -> Self
    where
        Q: Fn(&str) -> Option<String>,
        F: FnOnce() -> String,
    {
        let param = |key: &str| query(key).filter(|v| !v.is_empty());
        Self {
            payment_id: param("razorpay_payment_id").unwrap_or_else(fallback_id),
            payment_link_id: param("razorpay_payment_link_id").unwrap_or_default(),
            reference_id: param("razorpay_payment_link_reference_id")
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: param("razorpay_payment_link_status")
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            signature: param("razorpay_signature").unwrap_or_default(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == PAID_STATUS
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_paid() {
            "Completed"
        } else {
            "Pending"
        }
    }

    pub fn status_class(&self) -> &'static str {
        if self.is_paid() {
            "status-completed"
        } else {
            "status-pending"
        }
    }
}

const TXN_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// "TXN" + one base-36 character per byte, at most 9
pub fn transaction_id_from(random: &[u8]) -> String {
    let suffix: String = random
        .iter()
        .take(9)
        .map(|b| TXN_ALPHABET[(*b % 36) as usize] as char)
        .collect();
    format!("TXN{}", suffix)
}

/// "TXN" + 9 uppercase alphanumerics
pub fn generate_transaction_id() -> String {
    let bytes = uuid::Uuid::new_v4().into_bytes();
    // bytes 6 and 8 carry the uuid version and variant bits
    let random: Vec<u8> = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 6 && *i != 8)
        .map(|(_, b)| *b)
        .collect();
    transaction_id_from(&random)
}

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let query = use_query_map();
    let receipt = query.with_untracked(|params| {
        PaymentReceipt::from_query(|key| params.get(key), generate_transaction_id)
    });
    let paid_at = format_receipt_time(&Local::now().naive_local());
    let copied = RwSignal::new(None::<&'static str>);

    let copy_row = move |label: &'static str, value: String| {
        let text = value.clone();
        view! {
            <div class="receipt__row">
                <span class="receipt__label">{label}</span>
                <span class="receipt__value">{value}</span>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| copy_text(&text, move || copied.set(Some(label)))
                >
                    {move || if copied.get() == Some(label) { "Copied!" } else { "Copy" }}
                </Button>
            </div>
        }
    };

    view! {
        <div class="payment-result payment-success">
            <div class="payment-result__icon">"✓"</div>
            <h1>"Payment Successful"</h1>
            <p class="payment-result__subtitle">
                "Thank you! Your payment has been received."
            </p>

            <div class="receipt">
                {copy_row("Transaction ID", receipt.payment_id.clone())}
                {(!receipt.payment_link_id.is_empty())
                    .then(|| copy_row("Payment Link ID", receipt.payment_link_id.clone()))}
                <div class="receipt__row">
                    <span class="receipt__label">"Reference"</span>
                    <span class="receipt__value">{receipt.reference_id.clone()}</span>
                </div>
                <div class="receipt__row">
                    <span class="receipt__label">"Status"</span>
                    <span class=format!("receipt__value {}", receipt.status_class())>
                        {receipt.status_text()}
                    </span>
                </div>
                <div class="receipt__row">
                    <span class="receipt__label">"Date & Time"</span>
                    <span class="receipt__value">{paid_at}</span>
                </div>
            </div>
        </div>
    }
}
