pub mod payment_failure;
pub mod payment_success;
