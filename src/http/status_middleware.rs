use http::Extensions;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Error, Middleware, Next, Result};
use url::Url;

/// Turns any non-success catalog response into an error.
pub struct StatusMiddleware;

pub fn check_status(url: &Url, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(Error::Middleware(anyhow::anyhow!("{} returned {}", url, status)))
}

#[async_trait::async_trait]
impl Middleware for StatusMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let response = next.run(req, extensions).await?;
        check_status(response.url(), response.status())?;
        Ok(response)
    }
}
