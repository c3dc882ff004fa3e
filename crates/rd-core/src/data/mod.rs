//! Static game data tables

mod characters;

pub use characters::{CharacterId, CharacterTemplate};
