//! Data-driven combat content.
//!
//! Loaders turn RON/TOML data files into the snapshot types `combat-core`
//! consumes:
//! - Equipment, item and spell catalog (RON)
//! - Bestiary: enemy templates, guest templates and enemy groups (RON)
//! - Party, inventory and named encounters (RON)
//! - Combat tuning (TOML)
//!
//! Content is read once at startup and never appears in session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BestiaryFile, BestiaryLoader, CatalogFile, CatalogLoader, ConfigLoader, ContentFactory,
    LoadResult, PartyFile, PartyLoader,
};
