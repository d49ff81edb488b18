use serde::{Deserialize, Serialize};

use crate::domain::a002_deposit_folio::aggregate::Money;

/// Ответ `/reservation/{hotelId}/{reservationId}/checkout-folio`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutFolioResponse {
    #[serde(default)]
    pub data: Option<CheckoutFolioData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFolioData {
    #[serde(default)]
    pub reservation_folio_information: Option<ReservationFolioInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFolioInformation {
    #[serde(default)]
    pub folio_windows: Vec<FolioWindow>,
}

/// Окно фолио: баланс, выручка и оплаты по одному плательщику
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioWindow {
    #[serde(default)]
    pub folio_window_no: i64,
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub revenue: Option<Money>,
    #[serde(default)]
    pub payment: Option<Money>,
    #[serde(default)]
    pub folios: Vec<Folio>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Folio {
    #[serde(default)]
    pub postings: Vec<Posting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(default)]
    pub reference: Option<String>,
}

/// Строка окна фолио для таблицы выбора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolioLine {
    pub row_id: usize,
    pub folio_window_no: i64,
    pub balance_amount: f64,
    pub payment_amount: f64,
    pub reference: String,
}

impl CheckoutFolioResponse {
    pub fn folio_windows(&self) -> &[FolioWindow] {
        self.data
            .as_ref()
            .and_then(|d| d.reservation_folio_information.as_ref())
            .map(|info| info.folio_windows.as_slice())
            .unwrap_or_default()
    }
}

/// Shapes folio windows into numbered display lines.
pub fn folio_lines(windows: &[FolioWindow]) -> Vec<FolioLine> {
    windows
        .iter()
        .enumerate()
        .map(|(index, window)| FolioLine {
            row_id: index + 1,
            folio_window_no: window.folio_window_no,
            balance_amount: window.balance.as_ref().map(|m| m.amount).unwrap_or(0.0),
            payment_amount: window.payment.as_ref().map(|m| m.amount).unwrap_or(0.0),
            reference: window
                .folios
                .first()
                .and_then(|f| f.postings.first())
                .and_then(|p| p.reference.clone())
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
