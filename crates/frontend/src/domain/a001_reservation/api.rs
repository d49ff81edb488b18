//! Reservation backend calls
//!
//! The last reservation and deposit folio responses are kept in reactive
//! caches so other pages (the deposit page) can read them without a refetch.

use contracts::domain::a001_reservation::aggregate::{CompleteReservationData, ReservationData};
use contracts::domain::a002_deposit_folio::aggregate::DepositFolioData;
use contracts::shared::envelope::ApiEnvelope;
use leptos::prelude::*;

use crate::shared::api_utils::segment;
use crate::shared::http::{ApiError, ApiRequest};
use crate::system::auth::interceptor::ApiClient;

#[derive(Clone)]
pub struct ReservationService {
    client: ApiClient,
    reservation_data: RwSignal<Option<ReservationData>>,
    deposit_folio_data: RwSignal<Option<DepositFolioData>>,
    /// (hotel, reservation) the cached deposit folio belongs to
    deposit_folio_key: RwSignal<Option<(String, String)>>,
}

impl ReservationService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            reservation_data: RwSignal::new(None),
            deposit_folio_data: RwSignal::new(None),
            deposit_folio_key: RwSignal::new(None),
        }
    }

    /// PMS request scoped to a hotel
    fn hotel_request(&self, hotel_id: &str, path: &str) -> ApiRequest {
        let config = self.client.config();
        ApiRequest::get(config.url(path))
            .header("Content-Type", "application/json")
            .header("x-hotelid", hotel_id)
            .header("x-app-key", &config.app_key)
    }

    pub async fn get_reservation(
        &self,
        hotel_id: &str,
        reservation_id: &str,
    ) -> Result<ReservationData, ApiError> {
        let path = format!(
            "/rsv/v1/hotels/{}/reservations/{}?fetchInstructions=Reservation",
            segment(hotel_id),
            segment(reservation_id)
        );
        let data: ReservationData = self
            .client
            .get_json(self.hotel_request(hotel_id, &path))
            .await?;
        self.reservation_data.set(Some(data.clone()));
        Ok(data)
    }

    pub async fn get_deposit_folio(
        &self,
        hotel_id: &str,
        reservation_id: &str,
    ) -> Result<DepositFolioData, ApiError> {
        let path = format!(
            "/csh/v1/hotels/{}/depositFolio?id={}&fetchInstructions=ProjectedRevenue",
            segment(hotel_id),
            segment(reservation_id)
        );
        let data: DepositFolioData = self
            .client
            .get_json(self.hotel_request(hotel_id, &path))
            .await?;
        // key first: cache observers check it when the data changes
        self.deposit_folio_key
            .set(Some((hotel_id.to_string(), reservation_id.to_string())));
        self.deposit_folio_data.set(Some(data.clone()));
        Ok(data)
    }

    /// Reservation plus folios in one call
    pub async fn get_complete_reservation_data(
        &self,
        hotel_id: &str,
        reservation_id: &str,
    ) -> Result<ApiEnvelope<CompleteReservationData>, ApiError> {
        let path = format!(
            "/reservation/{}/{}",
            segment(hotel_id),
            segment(reservation_id)
        );
        let envelope: ApiEnvelope<CompleteReservationData> = self
            .client
            .get_json(ApiRequest::get(self.client.config().url(&path)))
            .await?;
        if let Some(data) = envelope.data.as_ref().filter(|_| envelope.success) {
            self.reservation_data.set(Some(data.reservation.clone()));
        }
        Ok(envelope)
    }

    pub fn reservation_data(&self) -> ReadSignal<Option<ReservationData>> {
        self.reservation_data.read_only()
    }

    pub fn deposit_folio_data(&self) -> ReadSignal<Option<DepositFolioData>> {
        self.deposit_folio_data.read_only()
    }

    pub fn stored_reservation_data(&self) -> Option<ReservationData> {
        self.reservation_data.get_untracked()
    }

    pub fn stored_deposit_folio_data(&self) -> Option<DepositFolioData> {
        self.deposit_folio_data.get_untracked()
    }

    /// Whether the cached deposit folio can serve this reservation.
    ///
    /// Without identifiers any cached folio is accepted.
    pub fn has_deposit_folio_for(&self, hotel_id: &str, reservation_id: &str) -> bool {
        if self.deposit_folio_data.with_untracked(Option::is_none) {
            return false;
        }
        if hotel_id.is_empty() || reservation_id.is_empty() {
            return true;
        }
        self.deposit_folio_key.with_untracked(|key| {
            key.as_ref()
                .is_some_and(|(h, r)| h == hotel_id && r == reservation_id)
        })
    }
}
