//! Request middleware that sits in front of every route.
//!
//! - [`rate_limit::throttle`] -- Per-client request allowance, 429 once spent.

pub mod rate_limit;
