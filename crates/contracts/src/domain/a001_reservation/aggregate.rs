use serde::{Deserialize, Serialize};

use crate::domain::a003_folio::aggregate::FolioWindow;

/// Ответ reservation API (`/rsv/v1/hotels/{hotelId}/reservations/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationData {
    #[serde(default)]
    pub reservations: Option<ReservationList>,
    #[serde(default)]
    pub master_info_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationList {
    #[serde(default)]
    pub reservation: Vec<ReservationRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default)]
    pub reservation_id_list: Vec<TypedId>,
    #[serde(default)]
    pub reservation_status: String,
    #[serde(default)]
    pub room_stay: Option<RoomStay>,
    #[serde(default)]
    pub reservation_guests: Vec<ReservationGuest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedId {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub id_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStay {
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub total: Option<StayTotal>,
    #[serde(default)]
    pub room_types: Vec<RoomTypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayTotal {
    #[serde(default)]
    pub amount_before_tax: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeInfo {
    #[serde(default)]
    pub room_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationGuest {
    #[serde(default)]
    pub profile_info: Option<ProfileInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub person_name: Vec<PersonName>,
    #[serde(default)]
    pub email: Vec<EmailInfo>,
    #[serde(default)]
    pub telephone: Vec<TelephoneInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailInfo {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephoneInfo {
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Payload of the combined endpoint (`/reservation/{hotelId}/{reservationId}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompleteReservationData {
    #[serde(default)]
    pub reservation: ReservationData,
    #[serde(default)]
    pub folios: Option<Vec<FolioWindow>>,
}

impl ReservationData {
    /// First reservation record, the only one the guest pages show.
    pub fn first_record(&self) -> Option<&ReservationRecord> {
        self.reservations.as_ref()?.reservation.first()
    }
}

impl ReservationRecord {
    pub fn id_of_type(&self, id_type: &str) -> Option<&str> {
        self.reservation_id_list
            .iter()
            .find(|id| id.id_type == id_type)
            .map(|id| id.id.as_str())
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.reservation_guests
            .first()?
            .profile_info
            .as_ref()?
            .profile
            .as_ref()?
            .customer
            .as_ref()
    }
}
