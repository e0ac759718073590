//! Content loaders for reading sheet data from files.

pub mod character;
pub mod item;
pub mod rules;

pub use character::{CharacterFile, CharacterLoader};
pub use item::{ItemCatalog, ItemLoader};
pub use rules::RulesLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
