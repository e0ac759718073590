//! Read-only stacking reducer over already-evaluated changes.
//!
//! Subsystems that build a single roll (one attack, one save) use this to ask
//! which of a handful of changes actually count, without running a pass.

use crate::change::{Category, ChangeRecord, Operator};
use crate::config::RulesConfig;

use super::BonusType;

/// A change paired with the value it evaluated to.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedChange {
    pub change: ChangeRecord,
    pub value: f64,
}

impl EvaluatedChange {
    pub fn new(change: ChangeRecord, value: f64) -> Self {
        Self { change, value }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Group by bonus type only, ignoring category and subtarget.
    pub ignore_target: bool,
}

#[derive(PartialEq)]
struct GroupKey<'a> {
    bonus_type: &'a BonusType,
    target: Option<(&'a Category, Option<&'a str>)>,
}

impl<'a> GroupKey<'a> {
    fn of(evaluated: &'a EvaluatedChange, options: FilterOptions) -> Self {
        let change = &evaluated.change;
        Self {
            bonus_type: &change.bonus_type,
            target: (!options.ignore_target)
                .then(|| (&change.category, change.subtarget.as_deref())),
        }
    }
}

/// Keeps the highest change per bonus type (and target) unless the type
/// stacks.
#[derive(Clone, Copy, Debug)]
pub struct HighestChangeFilter<'a> {
    rules: &'a RulesConfig,
}

impl<'a> HighestChangeFilter<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self { rules }
    }

    /// Returns the members of `changes` that count, in their original order.
    ///
    /// `set` changes and stacking types are always kept. Among competing
    /// changes the first of equal highest values wins.
    pub fn reduce(
        &self,
        changes: &[EvaluatedChange],
        options: FilterOptions,
    ) -> Vec<EvaluatedChange> {
        let competes = |evaluated: &EvaluatedChange| {
            evaluated.change.operator == Operator::Add
                && !self.rules.is_stacking(&evaluated.change.bonus_type)
        };

        changes
            .iter()
            .enumerate()
            .filter(|&(index, candidate)| {
                if !competes(candidate) {
                    return true;
                }
                let group = GroupKey::of(candidate, options);
                changes
                    .iter()
                    .enumerate()
                    .filter(|&(other_index, other)| {
                        other_index != index
                            && competes(other)
                            && GroupKey::of(other, options) == group
                    })
                    .all(|(other_index, other)| {
                        other.value < candidate.value
                            || (other.value == candidate.value && other_index > index)
                    })
            })
            .map(|(_, evaluated)| evaluated.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(id: &str, bonus_type: BonusType, value: f64) -> EvaluatedChange {
        EvaluatedChange::new(
            ChangeRecord::add(id, "0", Category::ATTACK, bonus_type),
            value,
        )
    }

    fn ids(changes: &[EvaluatedChange]) -> Vec<&str> {
        changes.iter().map(|e| e.change.id.as_str()).collect()
    }

    #[test]
    fn keeps_highest_per_type_in_original_order() {
        let rules = RulesConfig::default();
        let changes = vec![
            evaluated("bless", BonusType::MORALE, 1.0),
            evaluated("flank", BonusType::UNTYPED, 2.0),
            evaluated("heroism", BonusType::MORALE, 2.0),
            evaluated("prayer", BonusType::LUCK, 1.0),
            evaluated("aid", BonusType::UNTYPED, 1.0),
        ];
        let kept = HighestChangeFilter::new(&rules).reduce(&changes, FilterOptions::default());
        assert_eq!(ids(&kept), vec!["flank", "heroism", "prayer", "aid"]);
    }

    #[test]
    fn ties_keep_the_first() {
        let rules = RulesConfig::default();
        let changes = vec![
            evaluated("a", BonusType::INSIGHT, 2.0),
            evaluated("b", BonusType::INSIGHT, 2.0),
        ];
        let kept = HighestChangeFilter::new(&rules).reduce(&changes, FilterOptions::default());
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn targets_separate_groups_unless_ignored() {
        let rules = RulesConfig::default();
        let mut melee = evaluated("melee", BonusType::COMPETENCE, 1.0);
        melee.change.subtarget = Some("melee".into());
        let general = evaluated("general", BonusType::COMPETENCE, 2.0);
        let changes = vec![melee, general];

        let filter = HighestChangeFilter::new(&rules);
        let by_target = filter.reduce(&changes, FilterOptions::default());
        assert_eq!(ids(&by_target), vec!["melee", "general"]);

        let by_type = filter.reduce(&changes, FilterOptions { ignore_target: true });
        assert_eq!(ids(&by_type), vec!["general"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let rules = RulesConfig::default();
        let changes = vec![
            evaluated("a", BonusType::SACRED, 1.0),
            evaluated("b", BonusType::SACRED, 3.0),
        ];
        let before = changes.clone();
        HighestChangeFilter::new(&rules).reduce(&changes, FilterOptions::default());
        assert_eq!(changes, before);
    }
}
