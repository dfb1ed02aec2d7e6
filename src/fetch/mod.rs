//! HTTP plumbing for the prediction backend.
//!
//! [`HttpClient`] is the request seam, [`BasicClient`] the reqwest-backed
//! implementation and [`Bearer`] an optional auth decorator.

mod basic;
mod bearer;
mod client;

pub use basic::BasicClient;
pub use bearer::Bearer;
pub use client::HttpClient;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Builds a bodiless request.
pub fn build_request(method: Method, url: &str) -> Result<Request, ApiError> {
    let url = Url::parse(url).map_err(|e| ApiError::Network(format!("bad url '{url}': {e}")))?;
    Ok(Request::new(method, url))
}

/// Builds a request carrying `body` as JSON.
pub fn build_json_request<B: Serialize>(
    method: Method,
    url: &str,
    body: &B,
) -> Result<Request, ApiError> {
    let mut req = build_request(method, url)?;
    let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Validation(e.to_string()))?;
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *req.body_mut() = Some(bytes.into());
    Ok(req)
}

pub async fn send<C: HttpClient + ?Sized>(client: &C, req: Request) -> Result<Response, ApiError> {
    Ok(client.execute(req).await?)
}

/// Reads the whole body and decodes it as JSON. Decode failures are
/// [`ApiError::Validation`].
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
