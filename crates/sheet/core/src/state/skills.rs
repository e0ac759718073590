//! Skill definitions and the live skill list used for target fan-out.

use super::{Ability, ConcretePath, paths};

/// Bonus for a trained class skill.
pub const CLASS_SKILL_BONUS: f64 = 3.0;

/// Authored skill entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub key: String,
    pub ability: Ability,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranks: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_skill: bool,
    /// Whether the armor check penalty applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_penalty: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_skills: Vec<SubSkillDef>,
}

/// Sub-skill (Craft, Perform, Profession specialisations). Inherits the
/// parent's ability, class-skill status and armor check penalty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubSkillDef {
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranks: f64,
}

impl SkillDef {
    pub fn new(key: impl Into<String>, ability: Ability) -> Self {
        Self {
            key: key.into(),
            ability,
            ranks: 0.0,
            class_skill: false,
            armor_penalty: false,
            sub_skills: Vec::new(),
        }
    }

    pub fn with_ranks(mut self, ranks: f64) -> Self {
        self.ranks = ranks;
        self
    }

    pub fn class_skill(mut self) -> Self {
        self.class_skill = true;
        self
    }

    pub fn armor_penalty(mut self) -> Self {
        self.armor_penalty = true;
        self
    }

    pub fn with_sub_skill(mut self, key: impl Into<String>, ranks: f64) -> Self {
        let key = key.into();
        self.sub_skills.push(SubSkillDef {
            name: key.clone(),
            key,
            ranks,
        });
        self
    }

    /// Every rank-holding entry of this skill: the skill itself, or each of
    /// its sub-skills when it has any.
    pub fn entries(&self) -> Vec<SkillEntry<'_>> {
        if self.sub_skills.is_empty() {
            return vec![SkillEntry {
                skill: self,
                sub_skill: None,
                ranks: self.ranks,
            }];
        }
        self.sub_skills
            .iter()
            .map(|sub| SkillEntry {
                skill: self,
                sub_skill: Some(sub),
                ranks: sub.ranks,
            })
            .collect()
    }
}

/// A skill or sub-skill with the paths the engine reads and writes.
#[derive(Clone, Copy, Debug)]
pub struct SkillEntry<'a> {
    pub skill: &'a SkillDef,
    pub sub_skill: Option<&'a SubSkillDef>,
    pub ranks: f64,
}

impl SkillEntry<'_> {
    /// Dotted key: `acr`, or `crf.crf1` for a sub-skill.
    pub fn key(&self) -> String {
        match self.sub_skill {
            Some(sub) => format!("{}.{}", self.skill.key, sub.key),
            None => self.skill.key.clone(),
        }
    }

    pub fn field(&self, field: &str) -> ConcretePath {
        match self.sub_skill {
            Some(sub) => paths::sub_skill_field(&self.skill.key, &sub.key, field),
            None => paths::skill_field(&self.skill.key, field),
        }
    }

    pub fn rank_path(&self) -> ConcretePath {
        self.field("rank")
    }

    pub fn bonus_path(&self) -> ConcretePath {
        self.field("changeBonus")
    }

    pub fn mod_path(&self) -> ConcretePath {
        self.field("mod")
    }

    pub fn target(&self) -> SkillTarget {
        SkillTarget {
            key: self.key(),
            ability: self.skill.ability,
            bonus_path: self.bonus_path(),
        }
    }
}

/// What the target resolver needs to know about one live skill entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillTarget {
    pub key: String,
    pub ability: Ability,
    pub bonus_path: ConcretePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_without_sub_skills_is_its_own_entry() {
        let skill = SkillDef::new("acr", Ability::Dex).with_ranks(4.0);
        let entries = skill.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key(), "acr");
        assert_eq!(entries[0].bonus_path().as_str(), "skills.acr.changeBonus");
    }

    #[test]
    fn sub_skills_replace_the_parent_entry() {
        let skill = SkillDef::new("crf", Ability::Int)
            .with_sub_skill("crf1", 2.0)
            .with_sub_skill("crf2", 0.0);
        let keys: Vec<_> = skill.entries().iter().map(|entry| entry.key()).collect();
        assert_eq!(keys, vec!["crf.crf1", "crf.crf2"]);
        assert_eq!(
            skill.entries()[1].mod_path().as_str(),
            "skills.crf.subSkills.crf2.mod"
        );
    }
}
