//! Concrete numeric paths on a character sheet.

use std::borrow::{Borrow, Cow};
use std::fmt;

use super::{Ability, Save, SpeedKind};

/// One addressable numeric field, e.g. `attributes.ac.normal.total`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConcretePath(Cow<'static, str>);

impl ConcretePath {
    pub const fn known(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConcretePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConcretePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ConcretePath {
    fn from(path: &'static str) -> Self {
        Self::known(path)
    }
}

/// Well-known sheet paths.
pub mod paths {
    use super::*;

    pub const AC_NORMAL: ConcretePath = ConcretePath::known("attributes.ac.normal.total");
    pub const AC_TOUCH: ConcretePath = ConcretePath::known("attributes.ac.touch.total");
    pub const AC_FLAT_FOOTED: ConcretePath = ConcretePath::known("attributes.ac.flatFooted.total");
    pub const CMD: ConcretePath = ConcretePath::known("attributes.cmd.total");
    pub const CMD_FLAT_FOOTED: ConcretePath = ConcretePath::known("attributes.cmd.flatFootedTotal");
    pub const CMB: ConcretePath = ConcretePath::known("attributes.cmb.total");
    pub const INIT: ConcretePath = ConcretePath::known("attributes.init.total");
    pub const BAB: ConcretePath = ConcretePath::known("attributes.bab.total");
    pub const HIT_DICE: ConcretePath = ConcretePath::known("attributes.hd.total");
    pub const HP_MAX: ConcretePath = ConcretePath::known("attributes.hp.max");
    pub const ACP: ConcretePath = ConcretePath::known("attributes.acp.total");
    pub const ATTACK: ConcretePath = ConcretePath::known("attributes.attack.general");
    pub const ATTACK_MELEE: ConcretePath = ConcretePath::known("attributes.attack.melee");
    pub const ATTACK_RANGED: ConcretePath = ConcretePath::known("attributes.attack.ranged");
    pub const DAMAGE: ConcretePath = ConcretePath::known("attributes.damage.general");
    pub const DAMAGE_WEAPON: ConcretePath = ConcretePath::known("attributes.damage.weapon");
    pub const DAMAGE_SPELL: ConcretePath = ConcretePath::known("attributes.damage.spell");

    /// AC and CMD totals: the family dodge suppression applies to.
    pub const ARMOR_CLASS_FAMILY: [ConcretePath; 5] =
        [AC_NORMAL, AC_TOUCH, AC_FLAT_FOOTED, CMD, CMD_FLAT_FOOTED];

    pub fn ability_total(ability: Ability) -> ConcretePath {
        ConcretePath::new(format!("abilities.{ability}.total"))
    }

    pub fn ability_mod(ability: Ability) -> ConcretePath {
        ConcretePath::new(format!("abilities.{ability}.mod"))
    }

    /// Accumulates `abilityMod` changes; folded into the modifier on refresh.
    pub fn ability_mod_bonus(ability: Ability) -> ConcretePath {
        ConcretePath::new(format!("abilities.{ability}.modBonus"))
    }

    pub fn save_total(save: Save) -> ConcretePath {
        ConcretePath::new(format!("attributes.savingThrows.{save}.total"))
    }

    pub fn save_base(save: Save) -> ConcretePath {
        ConcretePath::new(format!("attributes.savingThrows.{save}.base"))
    }

    pub fn speed_total(kind: SpeedKind) -> ConcretePath {
        ConcretePath::new(format!("attributes.speed.{kind}.total"))
    }

    pub fn skill_field(skill: &str, field: &str) -> ConcretePath {
        ConcretePath::new(format!("skills.{skill}.{field}"))
    }

    pub fn sub_skill_field(skill: &str, sub_skill: &str, field: &str) -> ConcretePath {
        ConcretePath::new(format!("skills.{skill}.subSkills.{sub_skill}.{field}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_paths_use_lowercase_keys() {
        assert_eq!(paths::ability_total(Ability::Dex).as_str(), "abilities.dex.total");
        assert_eq!(
            paths::save_total(Save::Fort).as_str(),
            "attributes.savingThrows.fort.total"
        );
        assert_eq!(
            paths::sub_skill_field("crf", "crf1", "changeBonus").as_str(),
            "skills.crf.subSkills.crf1.changeBonus"
        );
    }

    #[test]
    fn known_and_owned_paths_are_interchangeable() {
        assert_eq!(
            ConcretePath::new(String::from("attributes.cmd.total")),
            paths::CMD
        );
    }
}
