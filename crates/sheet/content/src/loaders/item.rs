//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sheet_core::{ContributingItem, ItemId};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ContributingItem>,
}

impl ItemCatalog {
    pub fn get(&self, id: &ItemId) -> Option<&ContributingItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// Item ids must be unique within the catalog.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), items = catalog.len(), "loaded item catalog");
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for item in &catalog.items {
            if !seen.insert(&item.id) {
                anyhow::bail!("Duplicate item id '{}' in catalog", item.id);
            }
        }
        Ok(catalog)
    }

    /// Load several catalogs into one, rejecting ids defined twice.
    pub fn load_all<'a>(paths: impl IntoIterator<Item = &'a Path>) -> LoadResult<ItemCatalog> {
        let mut merged = ItemCatalog::default();
        for path in paths {
            for item in Self::load(path)?.items {
                if merged.get(&item.id).is_some() {
                    anyhow::bail!(
                        "Item '{}' from {} is already defined",
                        item.id,
                        path.display()
                    );
                }
                merged.items.push(item);
            }
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_flags_and_changes() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    (
                        id: "ring-of-protection-1",
                        name: "Ring of Protection +1",
                        changes: [
                            (id: "ring-of-protection-1.ac", formula: "1", category: "ac", bonus_type: "deflection"),
                        ],
                    ),
                    (
                        id: "pinned",
                        name: "Pinned",
                        active: false,
                        flags: "LOSE_DEX_TO_AC",
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let ring = catalog.get(&ItemId::new("ring-of-protection-1")).unwrap();
        assert!(ring.active);
        assert_eq!(ring.changes.len(), 1);
        let pinned = catalog.get(&ItemId::new("pinned")).unwrap();
        assert!(!pinned.active);
        assert!(pinned.flags.loses_dex_to_ac());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = ItemLoader::parse(
            r#"(items: [(id: "belt", name: "Belt"), (id: "belt", name: "Other Belt")])"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("belt"), "{message}");
    }
}
