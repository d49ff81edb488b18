//! Deposit policies: selectable list, total and payment link generation
//!
//! - view_model.rs: selection state, cache binding, generate command
//! - view.rs: the panel (embedded in the reservation page) and `/deposit` page

mod view;
mod view_model;

pub use view::{DepositPage, DepositPanel};
pub use view_model::{build_deposit_request, DepositPanelVm, NO_POLICY_SELECTED};
