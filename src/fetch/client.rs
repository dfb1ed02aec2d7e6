use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a fully built request. The seam every backend call goes through,
/// so wrappers can decorate requests and tests can answer them in-process.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
