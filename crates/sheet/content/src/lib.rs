//! Data files for the character sheet engine.
//!
//! Loads RON/TOML content into `sheet-core` types:
//! - Rulebook configuration (TOML): stacking set, schedule order, dice mode
//! - Item catalogs (RON): equipment, buffs, feats and conditions with their changes
//! - Characters (RON): authored scores plus inline items and catalog references
//!
//! Nothing here derives anything; loaded data goes straight into
//! [`sheet_core::DerivationEngine`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterFile, CharacterLoader, ItemCatalog, ItemLoader, RulesLoader};
