//! HTTP plumbing for the remote record store.

mod auth;
mod client;

pub use auth::ApiKey;
pub use client::{BasicClient, HttpClient};

use anyhow::{Result, anyhow};
use reqwest::{Method, Request, StatusCode, header};
use serde_json::Value;

/// Builds a request, attaching `body` as a JSON payload when present.
pub fn json_request(method: Method, url: &str, body: Option<&Value>) -> Result<Request> {
    let mut req = Request::new(method, url.parse()?);
    req.headers_mut()
        .insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    if let Some(body) = body {
        req.headers_mut()
            .insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        *req.body_mut() = Some(serde_json::to_vec(body)?.into());
    }

    Ok(req)
}

/// Executes `req` and decodes the JSON body.
///
/// Returns `Ok(None)` on 404, `Value::Null` for an empty body, and an error
/// for any other non-success status.
pub async fn send_json(client: &dyn HttpClient, req: Request) -> Result<Option<Value>> {
    let method = req.method().clone();
    let url = req.url().to_string();

    let response = client
        .execute(req)
        .await
        .map_err(|e| anyhow!("Failed to send {} {}: {}", method, url, e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("{} {} returned status {}: {}", method, url, status, body));
    }

    let text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response from {}: {}", url, e))?;

    if text.trim().is_empty() {
        return Ok(Some(Value::Null));
    }

    let json = serde_json::from_str(&text)
        .map_err(|e| anyhow!("Failed to parse response from {}: {}", url, e))?;
    Ok(Some(json))
}
