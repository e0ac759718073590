//! Character loader.
//!
//! A character file holds the authored character plus references to catalog
//! items it carries. Referenced items are appended after the inline ones.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::{Character, ItemId};

use crate::loaders::item::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// On-disk layout of a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterFile {
    pub character: Character,
    /// Catalog items the character carries, by id.
    #[serde(default)]
    pub equipped: Vec<ItemId>,
}

impl CharacterFile {
    /// Resolves `equipped` against `catalog` into a complete character.
    pub fn resolve(self, catalog: &ItemCatalog) -> LoadResult<Character> {
        let CharacterFile {
            mut character,
            equipped,
        } = self;
        for id in equipped {
            let item = catalog.get(&id).ok_or_else(|| {
                anyhow::anyhow!(
                    "Character '{}' references unknown item '{}'",
                    character.name,
                    id
                )
            })?;
            character.items.push(item.clone());
        }
        Ok(character)
    }
}

/// Loader for characters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character file without resolving catalog references.
    pub fn load_file(path: &Path) -> LoadResult<CharacterFile> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character RON {}: {}", path.display(), e))
    }

    /// Load a character and attach its equipped catalog items.
    pub fn load(path: &Path, catalog: &ItemCatalog) -> LoadResult<Character> {
        let character = Self::load_file(path)?.resolve(catalog)?;
        tracing::debug!(
            character = %character.name,
            items = character.items.len(),
            "loaded character"
        );
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::ContributingItem;

    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog {
            items: vec![ContributingItem::new("cloak", "Cloak of Resistance +1")],
        }
    }

    fn file(equipped: &[&str]) -> CharacterFile {
        CharacterFile {
            character: Character::new("Seoni")
                .with_item(ContributingItem::new("mage-armor", "Mage Armor")),
            equipped: equipped.iter().copied().map(ItemId::new).collect(),
        }
    }

    #[test]
    fn equipped_items_follow_inline_items() {
        let character = file(&["cloak"]).resolve(&catalog()).unwrap();
        let ids: Vec<_> = character.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["mage-armor", "cloak"]);
    }

    #[test]
    fn unknown_references_fail() {
        let error = file(&["boots"]).resolve(&catalog()).unwrap_err();
        assert!(error.to_string().contains("boots"));
    }
}
