//! Payment link page: resolves the reservation behind a link and hosts the
//! gateway checkout frame.

mod view;
mod view_model;

pub use view::PaymentLinkPage;
pub use view_model::{is_payment_success_message, PaymentLinkVm};
