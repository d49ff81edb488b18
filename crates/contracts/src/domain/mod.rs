pub mod a001_reservation;
pub mod a002_deposit_folio;
pub mod a003_folio;
pub mod a004_payment_link;
