use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Logs every catalog request with its outcome.
pub struct RequestLogMiddleware;

#[async_trait::async_trait]
impl Middleware for RequestLogMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        log::debug!("--> {} {}", method, url);

        let result = next.run(req, extensions).await;
        match &result {
            Ok(response) => log::debug!("<-- {} {} {}", response.status(), method, url),
            Err(err) => log::warn!("<-- {} {} failed: {}", method, url, err),
        }
        result
    }
}
