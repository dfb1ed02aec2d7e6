//! HTTP implementation of [`PredictionApi`](crate::services::prediction_api::PredictionApi).

mod client;

pub use client::BackendClient;
