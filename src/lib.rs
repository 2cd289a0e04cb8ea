//! Redispatch - In-Process Request Forwarding
//!
//! Library for simulating a server-side redirect ("forward") inside a gateway
//! or dispatch layer, without a network round-trip.

pub mod forward;
pub mod http;
