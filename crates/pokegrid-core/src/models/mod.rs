//! Data models for the card gallery.
//!
//! - `Pokemon`: the display record built from PokeAPI data
//! - `PokemonListResponse`, `NamedResource`, `PokemonDetails`: wire types
//! - `Identifier`: id-or-name lookup key
//! - `Card`: the static gallery catalog

pub mod card;
pub mod pokemon;

pub use card::{cards, Card, CARDS};
pub use pokemon::{
    Identifier, NamedResource, Pokemon, PokemonDetails, PokemonListResponse, Sprites,
};
