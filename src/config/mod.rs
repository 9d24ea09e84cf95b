pub mod app;
pub mod cors;
