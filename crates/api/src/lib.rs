//! HTTP layer of the catalog service: configuration, state, error mapping,
//! the response envelope, validating extractors, services, and routes.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
