//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, static file
//! dispatch, extra response headers, and access logging.

use crate::config::{AppState, HeaderPair};
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
///
/// Always returns a response: every per-request failure is mapped to a
/// status code, so nothing a request does can take down the serve loop.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let version = req.version();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let referer = req
        .headers()
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let is_head = method == Method::HEAD;
    let access_log = state.config.logging.access_log;

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let mut response = match method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: &path,
                is_head,
            };
            static_files::serve(&ctx, &state).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    apply_extra_headers(&mut response, &state.config.headers.extra);

    if access_log {
        let mut entry =
            logger::AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = format_version(version);
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.user_agent = user_agent;
        entry.referer = referer;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Append the configured extra headers verbatim, in configuration order.
///
/// Applied to every response, success and error alike. A header that cannot
/// be represented on the wire is skipped with a warning rather than
/// poisoning the response.
pub fn apply_extra_headers(response: &mut Response<Full<Bytes>>, extra: &[HeaderPair]) {
    for pair in extra {
        match (
            HeaderName::try_from(pair.name.as_str()),
            HeaderValue::try_from(pair.value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => logger::log_warning(&format!(
                "Skipping invalid extra header '{}: {}'",
                pair.name, pair.value
            )),
        }
    }
}

fn format_version(version: Version) -> String {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string()
}

fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
