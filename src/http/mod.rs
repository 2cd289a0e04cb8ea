//! HTTP request abstractions.
//!
//! This module defines the request-capability interface the dispatch layer
//! programs against, plus the supporting pieces:
//!
//! - **`request`**: The [`RequestView`] trait and the concrete inbound request type
//! - **`headers`**: Case-insensitive single-value and multi-value header maps
//! - **`query`**: Lenient form-style query string decoding
//! - **`body`**: Shared readable handle over an in-memory request body

pub mod body;
pub mod headers;
pub mod query;
pub mod request;

pub use body::BodyStream;
pub use headers::{HeaderMap, HeaderValuesMap};
pub use request::{IncomingRequest, IncomingRequestBuilder, RequestView};
