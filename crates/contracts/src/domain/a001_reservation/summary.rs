//! Reservation summary shown in the header of every payment page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::aggregate::{ReservationData, ReservationRecord};
use crate::shared::format::{format_amount_en_in, format_stay_date, nights_between};

const DEFAULT_ROOM_TYPE: &str = "Standard Room";

/// Статус бронирования (открытое множество строк)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStatus(pub String);

impl ReservationStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.0.as_str(), "Cancel" | "Cancelled")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("Reservation not found")]
    NotFound,
    #[error("Reservation has been cancelled")]
    Cancelled,
}

/// Данные бронирования, готовые к отображению
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub res_no: String,
    pub confirmation_no: String,
    pub guest: String,
    pub email: String,
    pub mobile: String,
    pub check_in: String,
    pub check_out: String,
    /// Raw arrival date as sent by the PMS
    pub arrival_date: String,
    pub departure_date: String,
    pub amount: String,
    pub status: String,
    pub room_type: String,
    pub nights: Option<i64>,
}

impl ReservationSummary {
    /// Builds the summary of the first reservation record.
    ///
    /// A cancelled reservation is rejected here, so nothing downstream can
    /// offer it for payment.
    pub fn from_data(data: &ReservationData) -> Result<Self, SummaryError> {
        let record = data.first_record().ok_or(SummaryError::NotFound)?;
        let status = ReservationStatus(record.reservation_status.clone());
        if status.is_cancelled() {
            return Err(SummaryError::Cancelled);
        }
        Ok(Self::from_record(record))
    }

    fn from_record(record: &ReservationRecord) -> Self {
        let customer = record.customer();
        let guest = customer
            .and_then(|c| c.person_name.first())
            .map(|name| {
                format!(
                    "{} {}",
                    name.given_name.as_deref().unwrap_or_default(),
                    name.surname.as_deref().unwrap_or_default()
                )
                .trim()
                .to_string()
            })
            .unwrap_or_default();
        let email = customer
            .and_then(|c| c.email.first())
            .and_then(|e| e.value.clone())
            .unwrap_or_default();
        let mobile = customer
            .and_then(|c| c.telephone.first())
            .and_then(|t| t.phone_number.clone())
            .unwrap_or_default();

        let stay = record.room_stay.clone().unwrap_or_default();
        let arrival = stay.arrival_date.unwrap_or_default();
        let departure = stay.departure_date.unwrap_or_default();
        let total = stay.total.map(|t| t.amount_before_tax).unwrap_or(0.0);
        let room_type = stay
            .room_types
            .first()
            .and_then(|r| r.room_type.clone())
            .unwrap_or_else(|| DEFAULT_ROOM_TYPE.to_string());

        Self {
            res_no: record.id_of_type("Reservation").unwrap_or_default().to_string(),
            confirmation_no: record
                .id_of_type("Confirmation")
                .unwrap_or_default()
                .to_string(),
            guest,
            email,
            mobile,
            check_in: format_stay_date(&arrival),
            check_out: format_stay_date(&departure),
            nights: nights_between(&arrival, &departure),
            arrival_date: arrival,
            departure_date: departure,
            amount: format_amount_en_in(total),
            status: record.reservation_status.clone(),
            room_type,
        }
    }
}
