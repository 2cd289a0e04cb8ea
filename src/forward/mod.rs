//! Internal request forwarding.
//!
//! A "forward" redispatches a request to a new path inside the same process,
//! without a network round-trip, while keeping enough identity context
//! (session cookie, authorization) for the new handler to act on behalf of
//! the same caller.

pub mod view;

pub use view::{ForwardedRequest, FORWARDED_HEADERS};
