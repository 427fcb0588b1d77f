// Library exports for the binary and integration tests

pub mod api;
pub mod app_data;
pub mod audit;
pub mod config;
pub mod errors;
pub mod providers;
pub mod realtime;
pub mod services;
pub mod stores;
pub mod types;
