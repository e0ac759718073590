//! Loading from arbitrary files on disk.

use std::fs;

use sheet_content::{CharacterLoader, ItemLoader, RulesLoader};
use sheet_core::{ChangeStatus, DerivationEngine, EvalMode, UserId, paths};
use tempfile::TempDir;

const CATALOG: &str = r#"(
    items: [
        (
            id: "lucky-charm",
            name: "Lucky Charm",
            editor: Some("alice"),
            changes: [
                (id: "lucky-charm.ac", formula: "@abilities.luck.mod", category: "ac", bonus_type: "luck"),
            ],
        ),
        (
            id: "stone",
            name: "Ioun Stone",
            changes: [
                (id: "stone.init", formula: "1d4", category: "init", bonus_type: "insight"),
            ],
        ),
    ],
)"#;

const CHARACTER: &str = r#"(
    character: (name: "Kyra", abilities: (str: 10.0, dex: 10.0, con: 10.0, int: 10.0, wis: 10.0, cha: 10.0)),
    equipped: ["lucky-charm", "stone"],
)"#;

#[test]
fn loads_a_campaign_directory() {
    let dir = TempDir::new().unwrap();
    let rules_path = dir.path().join("rules.toml");
    let items_path = dir.path().join("items.ron");
    let character_path = dir.path().join("kyra.ron");
    fs::write(&rules_path, "eval_mode = \"average\"\n").unwrap();
    fs::write(&items_path, CATALOG).unwrap();
    fs::write(&character_path, CHARACTER).unwrap();

    let rules = RulesLoader::load(&rules_path).unwrap();
    assert_eq!(rules.eval_mode, EvalMode::Average);
    let catalog = ItemLoader::load(&items_path).unwrap();
    let kyra = CharacterLoader::load(&character_path, &catalog).unwrap();
    assert_eq!(kyra.items.len(), 2);

    let derivation = DerivationEngine::new(rules).derive(&kyra);
    assert_eq!(derivation.value(paths::INIT.as_str()), 2.5);
    assert_eq!(derivation.value(paths::AC_NORMAL.as_str()), 10.0);
    assert_eq!(
        derivation.report.outcome("lucky-charm.ac").map(|o| o.status),
        Some(ChangeStatus::Failed)
    );
    assert_eq!(derivation.report.notices_for(&UserId::new("alice")).count(), 1);
}

#[test]
fn missing_files_name_the_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere.toml");
    let error = RulesLoader::load(&missing).unwrap_err();
    assert!(format!("{error:#}").contains("nowhere.toml"));
}

#[test]
fn malformed_characters_are_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, "(character: (abilities: 12))").unwrap();
    assert!(CharacterLoader::load_file(&path).is_err());
}
