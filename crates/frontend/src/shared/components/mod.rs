pub mod payment_link_dialog;
pub mod reservation_card;
pub mod table_checkbox;
