pub mod aggregate;
pub mod webhook;
