//! Abstract target → concrete paths.

use std::str::FromStr;

use strum::IntoEnumIterator;

use super::TargetHook;
use crate::bonus::BonusType;
use crate::change::Category;
use crate::state::{Ability, ConcretePath, Save, Snapshot, SpeedKind, paths};

/// Maps a change's (category, subtarget, bonus type) onto the concrete
/// paths it modifies.
///
/// Resolution runs per change against the live snapshot, so targets that
/// depend on character data (the skill list) always reflect the current
/// state of the pass.
#[derive(Default)]
pub struct TargetResolver {
    hooks: Vec<Box<dyn TargetHook>>,
}

impl TargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook, keeping hooks sorted by priority. Hooks with equal
    /// priority run in registration order.
    pub fn register(&mut self, hook: impl TargetHook + 'static) {
        self.hooks.push(Box::new(hook));
        self.hooks.sort_by_key(|hook| hook.priority());
    }

    pub fn with_hook(mut self, hook: impl TargetHook + 'static) -> Self {
        self.register(hook);
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `None` when neither the built-in table nor any hook knows the
    /// target. The change is then inert.
    pub fn resolve(
        &self,
        category: &Category,
        subtarget: Option<&str>,
        bonus_type: &BonusType,
        snapshot: &dyn Snapshot,
    ) -> Option<Vec<ConcretePath>> {
        if let Some(resolved) = builtin(category, subtarget, bonus_type, snapshot) {
            return Some(resolved);
        }
        self.hooks
            .iter()
            .find_map(|hook| hook.resolve(category, subtarget, bonus_type, snapshot))
    }
}

fn parse<T: FromStr>(subtarget: Option<&str>) -> Option<T> {
    subtarget.and_then(|name| name.parse().ok())
}

fn builtin(
    category: &Category,
    subtarget: Option<&str>,
    bonus_type: &BonusType,
    snapshot: &dyn Snapshot,
) -> Option<Vec<ConcretePath>> {
    let resolved = match category.as_str() {
        "ability" => vec![paths::ability_total(parse::<Ability>(subtarget)?)],
        "abilityMod" => vec![paths::ability_mod_bonus(parse::<Ability>(subtarget)?)],
        "skill" => return skills(subtarget, snapshot),
        "ac" => armor_class(subtarget, bonus_type)?,
        "attack" => match subtarget {
            None => vec![paths::ATTACK],
            Some("melee") => vec![paths::ATTACK_MELEE],
            Some("ranged") => vec![paths::ATTACK_RANGED],
            Some(_) => return None,
        },
        "damage" => match subtarget {
            None => vec![paths::DAMAGE],
            Some("weapon") => vec![paths::DAMAGE_WEAPON],
            Some("spell") => vec![paths::DAMAGE_SPELL],
            Some(_) => return None,
        },
        "save" => match subtarget {
            None => Save::iter().map(paths::save_total).collect(),
            Some(_) => vec![paths::save_total(parse::<Save>(subtarget)?)],
        },
        "cmd" => match subtarget {
            None => vec![paths::CMD, paths::CMD_FLAT_FOOTED],
            Some("normal") => vec![paths::CMD],
            Some("flatFooted") => vec![paths::CMD_FLAT_FOOTED],
            Some(_) => return None,
        },
        "speed" => match subtarget {
            None => SpeedKind::iter().map(paths::speed_total).collect(),
            Some(_) => vec![paths::speed_total(parse::<SpeedKind>(subtarget)?)],
        },
        "cmb" => vec![paths::CMB],
        "init" => vec![paths::INIT],
        "bab" => vec![paths::BAB],
        "mhp" => vec![paths::HP_MAX],
        "acp" => vec![paths::ACP],
        _ => return None,
    };
    Some(resolved)
}

fn armor_class(subtarget: Option<&str>, bonus_type: &BonusType) -> Option<Vec<ConcretePath>> {
    let resolved = match subtarget {
        None if bonus_type.is_dodge() => vec![paths::AC_NORMAL, paths::AC_TOUCH, paths::CMD],
        None => vec![paths::AC_NORMAL, paths::AC_TOUCH, paths::AC_FLAT_FOOTED],
        Some("armor" | "shield" | "natural") => vec![paths::AC_NORMAL, paths::AC_FLAT_FOOTED],
        Some("dexterity") => vec![paths::AC_NORMAL, paths::AC_TOUCH, paths::CMD],
        Some("normal") => vec![paths::AC_NORMAL],
        Some("touch") => vec![paths::AC_TOUCH],
        Some("flatFooted") => vec![paths::AC_FLAT_FOOTED],
        Some(_) => return None,
    };
    Some(resolved)
}

/// Skill fan-out over the live skill list.
///
/// - no subtarget: every skill and sub-skill
/// - a skill key (`acr`, `crf`, `crf.crf1`): that skill or its sub-skills
/// - an ability name (`dex`): every skill keyed to that ability
fn skills(subtarget: Option<&str>, snapshot: &dyn Snapshot) -> Option<Vec<ConcretePath>> {
    let targets = snapshot.skill_targets();
    let Some(key) = subtarget else {
        return Some(targets.into_iter().map(|target| target.bonus_path).collect());
    };

    let prefix = format!("{key}.");
    let by_key: Vec<_> = targets
        .iter()
        .filter(|target| target.key == key || target.key.starts_with(&prefix))
        .map(|target| target.bonus_path.clone())
        .collect();
    if !by_key.is_empty() {
        return Some(by_key);
    }

    let ability: Ability = key.parse().ok()?;
    Some(
        targets
            .into_iter()
            .filter(|target| target.ability == ability)
            .map(|target| target.bonus_path)
            .collect(),
    )
}
