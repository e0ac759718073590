//! Derivations over the data files shipped with the crate.

use std::path::{Path, PathBuf};

use sheet_content::{CharacterLoader, ItemCatalog, ItemLoader, RulesLoader};
use sheet_core::{DerivationEngine, ItemId, RulesConfig, paths};

fn data(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(relative)
}

fn catalog() -> ItemCatalog {
    let core = data("items/core.ron");
    let buffs = data("items/buffs.ron");
    ItemLoader::load_all([core.as_path(), buffs.as_path()]).unwrap()
}

#[test]
fn bundled_rules_match_the_defaults() {
    let rules = RulesLoader::load(&data("rules.toml")).unwrap();
    assert_eq!(rules, RulesConfig::default());
}

#[test]
fn bundled_catalogs_do_not_overlap() {
    let catalog = catalog();
    assert!(catalog.get(&ItemId::new("haste")).is_some());
    assert!(catalog.get(&ItemId::new("breastplate-1")).is_some());
}

#[test]
fn valeros_in_full_plate_of_numbers() {
    let rules = RulesLoader::load(&data("rules.toml")).unwrap();
    let valeros = CharacterLoader::load(&data("characters/valeros.ron"), &catalog()).unwrap();
    let derivation = DerivationEngine::new(rules).derive(&valeros);

    assert!(derivation.report.is_clean());
    assert_eq!(derivation.value("abilities.str.total"), 19.0);
    assert_eq!(derivation.value(paths::AC_NORMAL.as_str()), 22.0);
    assert_eq!(derivation.value(paths::AC_TOUCH.as_str()), 13.0);
    assert_eq!(derivation.value(paths::AC_FLAT_FOOTED.as_str()), 20.0);
    assert_eq!(derivation.value(paths::CMB.as_str()), 9.0);
    assert_eq!(derivation.value(paths::CMD.as_str()), 21.0);
    assert_eq!(derivation.value(paths::ACP.as_str()), 6.0);
    assert_eq!(derivation.value(paths::ATTACK_MELEE.as_str()), 5.0);
    assert_eq!(derivation.value(paths::HP_MAX.as_str()), 54.0);
    assert_eq!(derivation.value("attributes.savingThrows.fort.total"), 7.0);
    assert_eq!(derivation.value("skills.clm.mod"), 6.0);
    assert_eq!(derivation.value("skills.prc.mod"), 3.0);

    // Armor base and enhancement from one item collapse into one line.
    let armor: Vec<_> = derivation
        .explain(paths::AC_NORMAL.as_str())
        .positive
        .into_iter()
        .filter(|entry| entry.label == "+1 Breastplate")
        .collect();
    assert_eq!(armor.len(), 1);
    assert_eq!(armor[0].amount, 7.0);
}

#[test]
fn seoni_takes_the_best_dodge_bonus() {
    let seoni = CharacterLoader::load(&data("characters/seoni.ron"), &catalog()).unwrap();
    let derivation = DerivationEngine::default().derive(&seoni);

    assert!(derivation.report.is_clean());
    assert_eq!(derivation.value(paths::AC_NORMAL.as_str()), 17.0);
    assert_eq!(derivation.value(paths::CMD.as_str()), 14.0);
    assert_eq!(derivation.value("attributes.speed.land.total"), 60.0);
    assert_eq!(derivation.value("attributes.savingThrows.ref.total"), 5.0);
    assert!(derivation.report.outcome("bloodline.dc").is_none());
}
