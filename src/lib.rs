pub mod availability;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod map;
pub mod model;
pub mod output;
pub mod panel;
pub mod services;
pub mod zones;
