use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};

/// An [`HttpClient`] wrapper that sends `Authorization: Bearer <token>` on
/// every request.
pub struct Bearer<C> {
    inner: C,
    value: HeaderValue,
}

impl<C> Bearer<C> {
    /// Fails if the token contains bytes not allowed in a header value.
    pub fn new(inner: C, token: &str) -> Result<Self, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        Ok(Self { inner, value })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Bearer<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Capture(Mutex<Option<String>>);

    #[async_trait]
    impl HttpClient for Capture {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let auth = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            *self.0.lock().unwrap() = auth;
            Ok(http::Response::new("{}").into())
        }
    }

    #[tokio::test]
    async fn test_bearer_sets_authorization_header() {
        let client = Bearer::new(Capture(Mutex::new(None)), "s3cret").unwrap();
        let req = reqwest::Request::new(
            reqwest::Method::GET,
            "http://localhost/zones".parse().unwrap(),
        );
        client.execute(req).await.unwrap();

        let seen = client.inner.0.lock().unwrap().clone();
        assert_eq!(seen.as_deref(), Some("Bearer s3cret"));
    }

    #[test]
    fn test_bearer_rejects_control_characters() {
        assert!(Bearer::new(Capture(Mutex::new(None)), "bad\ntoken").is_err());
    }
}
