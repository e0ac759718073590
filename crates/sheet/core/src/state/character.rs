//! Authored character data: the only state that persists across passes.

use std::collections::BTreeMap;

use super::{AbilityScores, SaveBases, SkillDef, SpeedKind};
use crate::change::{ChangeRecord, CharacterFlags, ContributingItem};

/// A character as stored by the host application.
///
/// Everything the engine derives (totals, modifiers, provenance) is rebuilt
/// from this on every pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: AbilityScores,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bab: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_dice: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_points: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub saves: SaveBases,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speeds: BTreeMap<SpeedKind, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ContributingItem>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_bab(mut self, bab: f64) -> Self {
        self.bab = bab;
        self
    }

    pub fn with_hit_dice(mut self, hit_dice: f64, hit_points: f64) -> Self {
        self.hit_dice = hit_dice;
        self.hit_points = hit_points;
        self
    }

    pub fn with_saves(mut self, saves: SaveBases) -> Self {
        self.saves = saves;
        self
    }

    pub fn with_speed(mut self, kind: SpeedKind, speed: f64) -> Self {
        self.speeds.insert(kind, speed);
        self
    }

    pub fn with_skill(mut self, skill: SkillDef) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_item(mut self, item: ContributingItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn active_items(&self) -> impl Iterator<Item = &ContributingItem> {
        self.items.iter().filter(|item| item.active)
    }

    /// OR-reduction of every active item's declared flags.
    pub fn declared_flags(&self) -> CharacterFlags {
        CharacterFlags::reduce(self.active_items().map(|item| item.flags))
    }

    /// Authored changes of every active item, owner references filled in.
    pub fn authored_changes(&self) -> Vec<ChangeRecord> {
        self.active_items()
            .flat_map(|item| item.owned_changes())
            .collect()
    }
}
