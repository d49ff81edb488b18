pub mod envelope;
pub mod format;
