//! Query layer: cached, retried reads.
//!
//! A `QueryClient` maps a `QueryKey` to the last fetched value. Values are
//! served from memory while fresh (`QueryPolicy::stale_time`), kept around
//! while used (`QueryPolicy::gc_time`), and refetched with exponential
//! backoff on failure. Nothing here knows about HTTP; `PokemonQueries` wires
//! the layer to `PokeApiClient`.

pub mod cache;
pub mod client;
pub mod key;
pub mod pokemon;
pub mod policy;

pub use cache::{CacheEntry, QueryCache, QueryState};
pub use client::QueryClient;
pub use key::QueryKey;
pub use pokemon::{list_key, single_key, PokemonQueries};
pub use policy::{QueryPolicy, RetryDelay};
