//! Reservation payment page (MVVM):
//! - view_model.rs: loading, validation, tab switching, ad-hoc payments
//! - view.rs: page with summary card and deposit / ad-hoc / folio tabs

mod view;
mod view_model;

pub use view::ReservationPage;
pub use view_model::{PaymentTab, ReservationDetailsVm};
