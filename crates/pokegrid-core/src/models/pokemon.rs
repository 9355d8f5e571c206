use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::capitalize_first_letter;

/// One entry of the paginated `/pokemon` index
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonListResponse {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// Detail record from `/pokemon/{id}`. Only the fields the gallery shows.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetails {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
}

impl PokemonDetails {
    pub fn into_pokemon(self) -> Pokemon {
        let image = match self.sprites.front_default {
            Some(url) => url,
            None => {
                debug!(id = self.id, name = %self.name, "No front sprite for pokemon");
                String::new()
            }
        };

        Pokemon {
            id: self.id,
            name: capitalize_first_letter(&self.name),
            image,
        }
    }
}

/// Display-ready pokemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub image: String,
}

impl Pokemon {
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Lookup key for a single pokemon: numeric id or name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(u32),
    Name(String),
}

impl Identifier {
    /// Parse user input. Numeric input becomes an id, anything else a
    /// lowercased name, since PokeAPI names are all lowercase.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => Identifier::Id(id),
            Err(_) => Identifier::Name(trimmed.to_lowercase()),
        }
    }

    /// An empty name or id 0 counts as no identifier at all
    pub fn is_absent(&self) -> bool {
        match self {
            Identifier::Id(id) => *id == 0,
            Identifier::Name(name) => name.trim().is_empty(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{}", id),
            Identifier::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Id(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}
