//! Mock infrastructure for upstream AI providers
//!
//! A single wiremock server stands in for every provider family; each family
//! keeps its own endpoint path so they can be mocked side by side.

pub mod providers;

pub use providers::*;
