//! Tab content renderers.

pub mod cards;
pub mod pokemon;
