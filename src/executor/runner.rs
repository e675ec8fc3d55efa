use std::time::Instant;

use anyhow::{bail, Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, Method};
use tracing::{debug, info};

use crate::params::RequestDefinition;

use super::models::{ExecutionResult, RequestSummary, ResponseSummary};

const USER_AGENT: &str = concat!("httpaccess/", env!("CARGO_PKG_VERSION"));

/// Sends the request and buffers the response body. A non-success status is
/// an error.
pub async fn execute_request(request: &RequestDefinition) -> Result<ExecutionResult> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("building HTTP client")?;

    let method = Method::from_bytes(request.method.as_bytes())
        .with_context(|| format!("invalid HTTP method {}", request.method))?;
    let mut request_builder = client.request(method.clone(), request.url.clone());

    for (name, value) in &request.headers {
        request_builder = request_builder.header(name, value);
    }

    if let Some(auth) = &request.auth {
        request_builder = request_builder.basic_auth(&auth.username, Some(&auth.password));
    }

    if let Some(body) = &request.body {
        request_builder = request_builder.body(body.clone());
    }

    info!(method = %method, url = %request.url, "sending request");
    let start = Instant::now();
    let response = request_builder
        .send()
        .await
        .with_context(|| format!("sending {} {}", method, request.url))?;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = response
        .bytes()
        .await
        .with_context(|| format!("reading response body from {}", request.url))?;
    debug!(
        status = status.as_u16(),
        duration_ms,
        bytes = body.len(),
        "received response"
    );

    if !status.is_success() {
        bail!("{} {} returned {}", method, request.url, status);
    }

    Ok(ExecutionResult {
        request: RequestSummary {
            method: method.to_string(),
            url: request.url.to_string(),
            body_bytes: request.body.as_ref().map(|b| b.len()),
        },
        response: ResponseSummary {
            status: status.as_u16(),
            content_type,
            duration_ms,
            body: body.to_vec(),
        },
    })
}
