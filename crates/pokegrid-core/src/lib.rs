//! Core library for pokegrid.
//!
//! - `api`: PokeAPI client and error types
//! - `query`: in-memory query cache with staleness, retention and retries
//! - `models`: pokemon wire/display types and the static card catalog
//! - `config`: user configuration
//! - `utils`: string helpers

pub mod api;
pub mod config;
pub mod models;
pub mod query;
pub mod utils;

pub use api::{ApiError, PokeApiClient};
pub use config::Config;
pub use models::{cards, Card, Identifier, Pokemon};
pub use query::{PokemonQueries, QueryClient, QueryKey, QueryPolicy, RetryDelay};
