//! Host header validation
//!
//! Rejects requests whose `Host` header does not name one of the configured
//! hosts. An empty host list accepts every request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::HOST, Request},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Host patterns a request may be addressed to
///
/// A pattern is an exact hostname, `*`, or a leading-dot domain such as
/// `.example.com` that also matches every subdomain.
#[derive(Debug, Clone, Default)]
pub struct AllowedHosts(Arc<Vec<String>>);

impl AllowedHosts {
    pub fn new(hosts: Vec<String>) -> Self {
        Self(Arc::new(
            hosts.into_iter().map(|h| h.to_ascii_lowercase()).collect(),
        ))
    }

    pub fn is_allowed(&self, host: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }

        let host = strip_port(host).to_ascii_lowercase();
        self.0.iter().any(|pattern| {
            if pattern == "*" {
                return true;
            }
            match pattern.strip_prefix('.') {
                Some(domain) => host == domain || host.ends_with(pattern.as_str()),
                None => host == *pattern,
            }
        })
    }
}

/// Drop a trailing `:port`, keeping bracketed IPv6 literals intact
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Host check middleware
pub async fn allowed_hosts_middleware(
    State(allowed): State<AllowedHosts>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or_default();

    if !allowed.is_allowed(host) {
        tracing::warn!(host, "Rejected request for disallowed host");
        return Err(AppError::BadRequest(format!(
            "Invalid Host header: {:?}",
            host
        )));
    }

    Ok(next.run(request).await)
}
