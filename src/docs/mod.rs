//! API Documentation module
//!
//! Provides OpenAPI specification generation for the HTTP API using utoipa.

mod openapi;

pub use openapi::ApiDoc;
