//! Fetch coordinator
//!
//! This module contains everything needed to turn a target URL into a
//! [`FetchResult`]:
//! - Identity and locale profiles for outbound headers
//! - The HTTP fetcher with redirect handling and timing
//! - Case-insensitive response headers
//! - Transport error classification

mod error;
mod fetcher;
mod headers;
mod profiles;

pub use error::{classify_error_text, classify_reqwest_error, FetchError};
pub use fetcher::{
    build_http_client, build_request_headers, decode_body, decode_text, fetch_page,
    FetchResult,
};
pub use headers::ResponseHeaders;
pub use profiles::{IdentityProfile, LocaleProfile};
