pub mod api;
pub mod interceptor;
pub mod storage;
