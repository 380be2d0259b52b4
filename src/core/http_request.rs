//! HTTP request metadata attached to log entries
//!
//! This module provides:
//! - `RequestInfo`: the caller's view of an incoming request
//! - `HttpRequest`: request/response metadata carried by an `Entry`
//! - `resolve_remote_ip`: proxy-hop-aware client IP resolution

use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri, Version};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Header carrying the client address as seen by a fronting proxy
pub const X_REAL_IP: &str = "x-real-ip";

/// Header carrying the chain of client and proxy addresses
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// An incoming request as the handler sees it
///
/// Carries the transport-level peer address alongside the request line and
/// headers, since `http::Request` itself has no notion of a peer.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
    /// Peer address, usually `host:port`
    pub remote_addr: String,
}

impl RequestInfo {
    pub fn new(method: Method, uri: Uri, remote_addr: impl Into<String>) -> Self {
        Self {
            method,
            uri,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            remote_addr: remote_addr.into(),
        }
    }

    /// Capture the request line and headers of an `http::Request`
    pub fn from_request<B>(request: &http::Request<B>, remote_addr: impl Into<String>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            version: request.version(),
            headers: request.headers().clone(),
            remote_addr: remote_addr.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// First value of a header, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header(http::header::USER_AGENT.as_str())
    }

    pub fn referer(&self) -> Option<&str> {
        self.header(http::header::REFERER.as_str())
    }

    /// Declared body size from `Content-Length`
    pub fn content_length(&self) -> Option<u64> {
        self.header(http::header::CONTENT_LENGTH.as_str())
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Metadata for the HTTP request associated with an entry
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// The request passed to the handler
    pub request: Option<RequestInfo>,

    /// Size of the request message in bytes, headers and body included
    pub request_size: u64,

    /// Response status code, e.g. 200 or 404
    pub status: u16,

    /// Size of the response message in bytes, headers and body included
    pub response_size: u64,

    /// Processing latency, from the request-start marker until the response was sent
    pub latency: Duration,

    /// Address of the server the request was sent to
    pub local_ip: String,

    /// Address of the client that issued the request
    pub remote_ip: String,

    /// Whether the entity was served from cache
    pub cache_hit: bool,

    /// Whether the cached response was validated with the origin server.
    /// Only meaningful when `cache_hit` is true.
    pub cache_validated_with_origin_server: bool,
}

/// Resolve the client IP for a request behind `proxy_hops` trusted proxies.
///
/// Starts from the host portion of the peer address. `X-Real-Ip` and then
/// `X-Forwarded-For` are split on commas; when a list holds more than
/// `proxy_hops + 1` entries the trailing `proxy_hops` are dropped and the new
/// last entry wins. `X-Forwarded-For` overrides `X-Real-Ip`.
///
/// # Example
///
/// ```
/// use http::HeaderMap;
/// use yall::resolve_remote_ip;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "1.1.1.1,2.2.2.2,3.3.3.3".parse().unwrap());
/// assert_eq!(resolve_remote_ip("10.0.0.1:443", &headers, 1), "2.2.2.2");
/// ```
pub fn resolve_remote_ip(remote_addr: &str, headers: &HeaderMap, proxy_hops: usize) -> String {
    let mut remote_ip = peer_host(remote_addr);

    for name in [X_REAL_IP, X_FORWARDED_FOR] {
        let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if let Some(hop) = trusted_hop(value, proxy_hops) {
            remote_ip = hop.to_string();
        }
    }

    remote_ip.trim().to_string()
}

/// Entry of a comma-separated hop list that sits just before the trusted proxies
fn trusted_hop(list: &str, proxy_hops: usize) -> Option<&str> {
    let hops: Vec<&str> = list.split(',').collect();
    if hops.len() > proxy_hops.saturating_add(1) {
        Some(hops[hops.len() - proxy_hops - 1])
    } else {
        None
    }
}

/// Host portion of a peer address, with the port stripped
fn peer_host(remote_addr: &str) -> String {
    let remote_addr = remote_addr.trim();
    if let Ok(addr) = remote_addr.parse::<SocketAddr>() {
        return addr.ip().to_string();
    }
    let unbracketed = remote_addr
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(remote_addr);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return ip.to_string();
    }
    match remote_addr.rsplit_once(':') {
        Some((host, _port)) => host.trim_start_matches('[').trim_end_matches(']').to_string(),
        None => remote_addr.to_string(),
    }
}
