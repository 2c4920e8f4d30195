use std::sync::LazyLock;
use std::time::Instant;

use http::Extensions;
use log::{debug, warn};
use regex::Regex;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

static BOT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/bot[^/]+/").unwrap());

/// Hides the Bot API token that Telegram puts in the request path.
pub fn redact_bot_token(url: &str) -> String {
    BOT_TOKEN.replace_all(url, "/bot***/").into_owned()
}

/// Logs every outgoing request without leaking credentials.
pub struct RedactingLogMiddleware;

#[async_trait::async_trait]
impl Middleware for RedactingLogMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = redact_bot_token(req.url().as_str());
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        match &result {
            Ok(response) => debug!(
                "{} {} -> {} in {:?}",
                method,
                url,
                response.status(),
                started.elapsed()
            ),
            Err(e) => warn!(
                "{} {} failed after {:?}: {}",
                method,
                url,
                started.elapsed(),
                redact_bot_token(&e.to_string())
            ),
        }
        result
    }
}
