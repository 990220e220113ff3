//! Application service layer - configuration, client selection and the upload pipeline

pub mod app;
pub mod client;
pub mod config;
