//! Checkout folio windows: selection and payment link generation

mod view;
mod view_model;

pub use view::FolioPanel;
pub use view_model::{build_folio_request, FolioPanelVm, NO_FOLIO_SELECTED};
