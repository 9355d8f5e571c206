//! REST API client module for PokeAPI.
//!
//! This module provides the `PokeApiClient` for fetching the pokemon index
//! and detail records, and the `ApiError` type wrapping transport and HTTP
//! status failures.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod client_tests;

pub use client::{PokeApiClient, PAGE_LIMIT};
pub use error::ApiError;
