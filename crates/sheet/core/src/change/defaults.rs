//! Changes the engine synthesizes for every character.
//!
//! These carry the core rulebook wiring (ability modifiers into AC, attack,
//! saves and so on) as ordinary changes, so they schedule, stack and show up
//! in provenance exactly like authored ones.

use strum::IntoEnumIterator;

use super::{Category, ChangeRecord, CharacterFlags, Formula};
use crate::bonus::BonusType;
use crate::state::{Ability, Save};

/// Prefix of every synthesized change id.
pub const DEFAULT_ID_PREFIX: &str = "_default.";

fn id(name: &str) -> String {
    format!("{DEFAULT_ID_PREFIX}{name}")
}

fn untyped(name: &str, formula: &str, category: Category) -> ChangeRecord {
    ChangeRecord::add(id(name), formula, category, BonusType::UNTYPED)
}

/// Default changes for a character with `flags` active.
pub fn default_changes(flags: CharacterFlags) -> Vec<ChangeRecord> {
    let dex_to_ac = if flags.loses_dex_to_ac() {
        "min(0, @abilities.dex.mod)"
    } else {
        "@abilities.dex.mod"
    };

    let mut changes = vec![
        untyped("dex-ac", dex_to_ac, Category::AC)
            .with_subtarget("dexterity")
            .with_label("Dexterity"),
        untyped("dex-ac-ff", "min(0, @abilities.dex.mod)", Category::AC)
            .with_subtarget("flatFooted")
            .with_label("Dexterity"),
        untyped("dex-cmd-ff", "min(0, @abilities.dex.mod)", Category::CMD)
            .with_subtarget("flatFooted")
            .with_label("Dexterity"),
        untyped("bab-attack", "@attributes.bab.total", Category::ATTACK)
            .with_label("Base Attack Bonus"),
        untyped("str-melee", "@abilities.str.mod", Category::ATTACK)
            .with_subtarget("melee")
            .with_label("Strength"),
        untyped("dex-ranged", "@abilities.dex.mod", Category::ATTACK)
            .with_subtarget("ranged")
            .with_label("Dexterity"),
        untyped("bab-cmb", "@attributes.bab.total", Category::CMB).with_label("Base Attack Bonus"),
        untyped("str-cmb", "@abilities.str.mod", Category::CMB).with_label("Strength"),
        untyped("bab-cmd", "@attributes.bab.total", Category::CMD).with_label("Base Attack Bonus"),
        untyped("str-cmd", "@abilities.str.mod", Category::CMD).with_label("Strength"),
        untyped("dex-init", "@abilities.dex.mod", Category::INIT).with_label("Dexterity"),
        untyped("con-hp", "@abilities.con.mod * @attributes.hd.total", Category::HIT_POINTS)
            .with_label("Constitution"),
    ];

    for save in Save::iter() {
        changes.push(
            ChangeRecord::add(
                id(&format!("{save}-base")),
                Formula::literal(format!("@attributes.savingThrows.{save}.base")),
                Category::SAVE,
                BonusType::BASE,
            )
            .with_subtarget(save.to_string())
            .with_label("Base Save"),
        );
        let ability = save.ability();
        changes.push(
            ChangeRecord::add(
                id(&format!("{ability}-{save}")),
                Formula::literal(format!("@abilities.{ability}.mod")),
                Category::SAVE,
                BonusType::UNTYPED,
            )
            .with_subtarget(save.to_string())
            .with_label(ability_label(ability)),
        );
    }

    changes.extend(flag_overrides(flags));
    changes
}

/// Continuous high-priority sets forcing ability totals for the active
/// condition flags.
fn flag_overrides(flags: CharacterFlags) -> Vec<ChangeRecord> {
    let forced = [
        (CharacterFlags::NO_STR, Ability::Str, "0"),
        (CharacterFlags::NO_DEX, Ability::Dex, "0"),
        (CharacterFlags::ONE_INT, Ability::Int, "1"),
        (CharacterFlags::ONE_WIS, Ability::Wis, "1"),
        (CharacterFlags::ONE_CHA, Ability::Cha, "1"),
    ];

    forced
        .into_iter()
        .filter(|(flag, _, _)| flags.contains(*flag))
        .map(|(_, ability, value)| {
            ChangeRecord::set(
                id(&format!("{ability}-forced")),
                value,
                Category::ABILITY,
                BonusType::UNTYPED,
            )
            .with_subtarget(ability.to_string())
            .with_priority(ChangeRecord::OVERRIDE_PRIORITY)
            .continuous()
            .with_label(ability_label(ability))
        })
        .collect()
}

fn ability_label(ability: Ability) -> &'static str {
    match ability {
        Ability::Str => "Strength",
        Ability::Dex => "Dexterity",
        Ability::Con => "Constitution",
        Ability::Int => "Intelligence",
        Ability::Wis => "Wisdom",
        Ability::Cha => "Charisma",
    }
}
