use std::cmp::Reverse;

use crate::change::ChangeRecord;
use crate::config::RulesConfig;

/// Orders a pass's changes.
///
/// Sort keys, in order:
/// 1. explicit priority, descending (overrides at 1001 run first)
/// 2. category position in [`RulesConfig::category_order`]
/// 3. bonus type position in [`RulesConfig::bonus_type_order`]
/// 4. change id, ascending
///
/// Ids are unique within a pass, so the result is a total order that does
/// not depend on the order changes were collected in.
#[derive(Clone, Copy, Debug)]
pub struct PriorityScheduler<'a> {
    rules: &'a RulesConfig,
}

impl<'a> PriorityScheduler<'a> {
    pub fn new(rules: &'a RulesConfig) -> Self {
        Self { rules }
    }

    pub fn schedule(&self, mut changes: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
        changes.sort_by(|a, b| {
            let key = |change: &ChangeRecord| {
                (
                    Reverse(change.priority),
                    self.rules.category_rank(&change.category),
                    self.rules.bonus_type_rank(&change.bonus_type),
                )
            };
            key(a).cmp(&key(b)).then_with(|| a.id.cmp(&b.id))
        });
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusType;
    use crate::change::Category;

    fn ids(changes: &[ChangeRecord]) -> Vec<&str> {
        changes.iter().map(|change| change.id.as_str()).collect()
    }

    #[test]
    fn priority_then_category_then_bonus_type_then_id() {
        let rules = RulesConfig::default();
        let changes = vec![
            ChangeRecord::add("z.ac", "1", Category::AC, BonusType::DODGE),
            ChangeRecord::add("b.ac", "1", Category::AC, BonusType::DEFLECTION),
            ChangeRecord::add("a.ac", "1", Category::AC, BonusType::DEFLECTION),
            ChangeRecord::add("str", "2", Category::ABILITY, BonusType::ENHANCEMENT),
            ChangeRecord::set("haste", "60", Category::SPEED, BonusType::UNTYPED)
                .with_priority(ChangeRecord::OVERRIDE_PRIORITY),
            ChangeRecord::add("custom", "1", Category::new("sr"), BonusType::UNTYPED),
        ];

        let ordered = PriorityScheduler::new(&rules).schedule(changes);
        assert_eq!(ids(&ordered), vec!["haste", "str", "z.ac", "a.ac", "b.ac", "custom"]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let rules = RulesConfig::default();
        let scheduler = PriorityScheduler::new(&rules);
        let forward = vec![
            ChangeRecord::add("b", "1", Category::SAVE, BonusType::LUCK),
            ChangeRecord::add("a", "1", Category::SAVE, BonusType::LUCK),
            ChangeRecord::add("c", "1", Category::SKILL, BonusType::LUCK).with_priority(-5),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(scheduler.schedule(forward), scheduler.schedule(backward));
    }
}
