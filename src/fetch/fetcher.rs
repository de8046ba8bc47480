//! HTTP fetcher implementation
//!
//! This module handles the single network fetch of an analysis, including:
//! - Building the shared HTTP client
//! - Per-request headers from identity and locale profiles
//! - Manual redirect following with a hop limit
//! - Body decoding (gzip/deflate) that keeps `Content-Encoding` visible,
//!   then charset decoding per `Content-Type`
//! - Elapsed time measurement and error classification

use crate::analysis::AnalysisOptions;
use crate::config::FetchConfig;
use crate::fetch::error::classify_reqwest_error;
use crate::fetch::{FetchError, ResponseHeaders};
use encoding_rs::{Encoding, UTF_8};
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, LOCATION,
    USER_AGENT,
};
use reqwest::{redirect::Policy, Client};
use std::io::Read;
use std::time::Instant;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Encodings this fetcher can decode itself
const SUPPORTED_ENCODINGS: &str = "gzip, deflate";

/// Result of a successful fetch (any status below 500)
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL of the response that was analyzed, after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Response headers of the final response
    pub headers: ResponseHeaders,
    /// Decoded body text
    pub body: String,
    /// Size of the decoded body in bytes
    pub body_bytes: usize,
    /// Time from the first request to the end of the body, in milliseconds
    pub elapsed_ms: u64,
    /// Every URL visited through a redirect, in order
    pub redirect_chain: Vec<String>,
}

impl FetchResult {
    pub fn redirect_count(&self) -> usize {
        self.redirect_chain.len()
    }
}

/// Builds the shared HTTP client
///
/// Redirects are handled manually so the chain can be recorded, and
/// automatic decompression is left off so `Content-Encoding` survives.
///
/// # Example
///
/// ```no_run
/// use alyze::config::FetchConfig;
/// use alyze::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .use_rustls_tls()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .redirect(Policy::none())
        .build()
}

/// Builds the request headers for the selected identity and locale profiles
pub fn build_request_headers(options: &AnalysisOptions) -> HeaderMap {
    let identity = options.identity_profile;
    let locale = options.locale_profile;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(identity.user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(SUPPORTED_ENCODINGS));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(locale.accept_language()),
    );
    headers.insert(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_static(locale.forwarded_for()),
    );
    headers
}

/// Fetches a page for analysis
///
/// # Request Flow
///
/// 1. GET the URL with profile headers
/// 2. On a 3xx with `Location`, follow it while hops remain
///    (`max_redirects` hops when following is enabled, none otherwise)
/// 3. Status >= 500 → `ServerError`; anything lower is analyzed
/// 4. Read and decode the body
///
/// The whole flow runs under the configured timeout.
///
/// # Returns
///
/// * `Ok(FetchResult)` - A response with status < 500
/// * `Err(FetchError)` - Transport failure, server error or redirect overflow
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    options: &AnalysisOptions,
    config: &FetchConfig,
) -> Result<FetchResult, FetchError> {
    let timeout = config.timeout();
    match tokio::time::timeout(timeout, fetch_following_redirects(client, url, options, config))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}

async fn fetch_following_redirects(
    client: &Client,
    url: &Url,
    options: &AnalysisOptions,
    config: &FetchConfig,
) -> Result<FetchResult, FetchError> {
    let started = Instant::now();
    let headers = build_request_headers(options);
    let max_hops = if options.follow_redirects {
        config.max_redirects
    } else {
        0
    };
    let timeout_secs = config.timeout_secs;

    let mut current = url.clone();
    let mut redirect_chain = Vec::new();

    let response = loop {
        tracing::debug!("GET {}", current);
        let response = client
            .get(current.clone())
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &current, timeout_secs))?;

        if !options.follow_redirects || !response.status().is_redirection() {
            break response;
        }

        let next = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| current.join(location).ok());

        match next {
            Some(next) => {
                if redirect_chain.len() >= max_hops {
                    return Err(FetchError::TooManyRedirects { limit: max_hops });
                }
                tracing::debug!("Redirect {} -> {}", current, next);
                redirect_chain.push(next.to_string());
                current = next;
            }
            None => break response,
        }
    };

    let status = response.status().as_u16();
    if status >= 500 {
        return Err(FetchError::ServerError { status });
    }

    let response_headers = ResponseHeaders::from_header_map(response.headers());
    let raw = response
        .bytes()
        .await
        .map_err(|e| classify_reqwest_error(&e, &current, timeout_secs))?;
    let decoded = decode_body(response_headers.get("content-encoding"), &raw);
    let body_bytes = decoded.len();
    let body = decode_text(response_headers.get("content-type"), &decoded);

    Ok(FetchResult {
        final_url: current,
        status,
        headers: response_headers,
        body,
        body_bytes,
        elapsed_ms: started.elapsed().as_millis() as u64,
        redirect_chain,
    })
}

/// Decodes a response body according to its `Content-Encoding`
///
/// Unknown encodings, and bodies that fail to decode, are returned as-is.
pub fn decode_body(encoding: Option<&str>, raw: &[u8]) -> Vec<u8> {
    let encoding = encoding.map(|e| e.trim().to_ascii_lowercase());
    let mut decoded = Vec::new();

    let result = match encoding.as_deref() {
        Some("gzip") | Some("x-gzip") => GzDecoder::new(raw).read_to_end(&mut decoded),
        Some("deflate") => ZlibDecoder::new(raw)
            .read_to_end(&mut decoded)
            .or_else(|_| {
                decoded.clear();
                DeflateDecoder::new(raw).read_to_end(&mut decoded)
            }),
        _ => return raw.to_vec(),
    };

    match result {
        Ok(_) => decoded,
        Err(e) => {
            tracing::warn!("Failed to decode {:?} body: {}", encoding, e);
            raw.to_vec()
        }
    }
}

/// Decodes body bytes to text using the `charset` of the `Content-Type`
///
/// A byte order mark takes precedence over the declared charset. Missing or
/// unknown charsets fall back to UTF-8; invalid sequences are replaced.
pub fn decode_text(content_type: Option<&str>, bytes: &[u8]) -> String {
    let encoding = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Body is not valid {}, invalid sequences replaced", used.name());
    }
    text.into_owned()
}

/// Value of the `charset` parameter of a `Content-Type` header
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}
