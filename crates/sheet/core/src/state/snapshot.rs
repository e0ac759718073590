//! The live numeric view of a character during and after a pass.

use std::collections::BTreeMap;

use super::{ConcretePath, SkillDef, SkillTarget};
use crate::formula::Bindings;

/// What the engine reads from and writes to while deriving.
///
/// Host applications with their own document model implement this directly;
/// [`CharacterSheet`] is the bundled implementation.
pub trait Snapshot {
    fn get_property(&self, path: &str) -> Option<f64>;

    fn set_property(&mut self, path: &ConcretePath, value: f64);

    /// Every live skill and sub-skill, for dynamic target fan-out.
    fn skill_targets(&self) -> Vec<SkillTarget>;

    /// Adds `delta` to `path`, treating an unset path as 0.
    fn add_property(&mut self, path: &ConcretePath, delta: f64) {
        let current = self.get_property(path.as_str()).unwrap_or(0.0);
        self.set_property(path, current + delta);
    }
}

/// Ordered map of every numeric path on a character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CharacterSheet {
    values: BTreeMap<ConcretePath, f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    skills: Vec<SkillDef>,
}

impl CharacterSheet {
    pub fn new(skills: Vec<SkillDef>) -> Self {
        Self {
            values: BTreeMap::new(),
            skills,
        }
    }

    /// Value at `path`, 0 when unset.
    pub fn get(&self, path: &str) -> f64 {
        self.values.get(path).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConcretePath, f64)> {
        self.values.iter().map(|(path, value)| (path, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn skills(&self) -> &[SkillDef] {
        &self.skills
    }
}

impl Snapshot for CharacterSheet {
    fn get_property(&self, path: &str) -> Option<f64> {
        self.values.get(path).copied()
    }

    fn set_property(&mut self, path: &ConcretePath, value: f64) {
        self.values.insert(path.clone(), value);
    }

    fn skill_targets(&self) -> Vec<SkillTarget> {
        self.skills
            .iter()
            .flat_map(|skill| skill.entries())
            .map(|entry| entry.target())
            .collect()
    }
}

impl Bindings for CharacterSheet {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get_property(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Ability, paths};

    #[test]
    fn unset_paths_read_as_absent_but_add_from_zero() {
        let mut sheet = CharacterSheet::default();
        assert_eq!(sheet.get_property(paths::AC_NORMAL.as_str()), None);

        sheet.add_property(&paths::AC_NORMAL, 2.0);
        sheet.add_property(&paths::AC_NORMAL, 1.0);
        assert_eq!(sheet.get(paths::AC_NORMAL.as_str()), 3.0);
        assert_eq!(sheet.lookup("attributes.ac.normal.total"), Some(3.0));
    }

    #[test]
    fn skill_targets_expand_sub_skills() {
        let sheet = CharacterSheet::new(vec![
            SkillDef::new("acr", Ability::Dex),
            SkillDef::new("crf", Ability::Int).with_sub_skill("crf1", 1.0),
        ]);
        let keys: Vec<_> = sheet
            .skill_targets()
            .into_iter()
            .map(|target| target.key)
            .collect();
        assert_eq!(keys, vec!["acr", "crf.crf1"]);
    }
}
