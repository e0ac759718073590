//! Layered recompute of structural values.
//!
//! A pass writes the sheet in three layers around change application:
//!
//! 1. [`base_recompute`]: authored values only, no changes applied
//! 2. [`refresh_derived`]: values computed purely from already-written totals,
//!    re-run after every change so the next formula sees current data
//! 3. [`finalize`]: values that read fully settled change totals

use strum::IntoEnumIterator;

use super::{
    Ability, CLASS_SKILL_BONUS, Character, CharacterSheet, Save, Snapshot, SpeedKind, paths,
};

/// Natural armor class and combat maneuver defense before any change.
pub const BASE_DEFENSE: f64 = 10.0;

/// Builds the sheet for `character` with no changes applied.
pub fn base_recompute(character: &Character) -> CharacterSheet {
    let mut sheet = CharacterSheet::new(character.skills.clone());

    for ability in Ability::iter() {
        sheet.set_property(&paths::ability_total(ability), character.abilities.get(ability));
        sheet.set_property(&paths::ability_mod_bonus(ability), 0.0);
    }

    sheet.set_property(&paths::BAB, character.bab);
    sheet.set_property(&paths::HIT_DICE, character.hit_dice);
    sheet.set_property(&paths::HP_MAX, character.hit_points);
    sheet.set_property(&paths::ACP, 0.0);

    for path in [
        paths::AC_NORMAL,
        paths::AC_TOUCH,
        paths::AC_FLAT_FOOTED,
        paths::CMD,
        paths::CMD_FLAT_FOOTED,
    ] {
        sheet.set_property(&path, BASE_DEFENSE);
    }
    for path in [
        paths::CMB,
        paths::INIT,
        paths::ATTACK,
        paths::ATTACK_MELEE,
        paths::ATTACK_RANGED,
        paths::DAMAGE,
        paths::DAMAGE_WEAPON,
        paths::DAMAGE_SPELL,
    ] {
        sheet.set_property(&path, 0.0);
    }

    for save in Save::iter() {
        sheet.set_property(&paths::save_base(save), character.saves.get(save));
        sheet.set_property(&paths::save_total(save), 0.0);
    }

    for kind in SpeedKind::iter() {
        let speed = character.speeds.get(&kind).copied().unwrap_or(0.0);
        sheet.set_property(&paths::speed_total(kind), speed);
    }

    for skill in &character.skills {
        for entry in skill.entries() {
            sheet.set_property(&entry.rank_path(), entry.ranks);
            sheet.set_property(&entry.bonus_path(), 0.0);
            sheet.set_property(&entry.mod_path(), 0.0);
        }
    }

    refresh_derived(&mut sheet);
    sheet
}

/// Recomputes ability modifiers from the current totals.
pub fn refresh_derived<S: Snapshot + ?Sized>(sheet: &mut S) {
    for ability in Ability::iter() {
        let total = sheet
            .get_property(paths::ability_total(ability).as_str())
            .unwrap_or(0.0);
        let bonus = sheet
            .get_property(paths::ability_mod_bonus(ability).as_str())
            .unwrap_or(0.0);
        sheet.set_property(&paths::ability_mod(ability), Ability::modifier(total) + bonus);
    }
}

/// Computes skill modifiers once every change has settled.
pub fn finalize(sheet: &mut CharacterSheet) {
    refresh_derived(sheet);

    let acp = sheet.get(paths::ACP.as_str());
    let skills = sheet.skills().to_vec();
    for skill in &skills {
        let ability_mod = sheet.get(paths::ability_mod(skill.ability).as_str());
        for entry in skill.entries() {
            let ranks = sheet.get(entry.rank_path().as_str());
            let mut total = ranks + ability_mod + sheet.get(entry.bonus_path().as_str());
            if skill.class_skill && ranks > 0.0 {
                total += CLASS_SKILL_BONUS;
            }
            if skill.armor_penalty {
                total -= acp;
            }
            sheet.set_property(&entry.mod_path(), total);
        }
    }
}
