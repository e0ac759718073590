use crate::bonus::BonusType;
use crate::change::Category;
use crate::formula::EvalMode;
use crate::state::{ConcretePath, paths};

/// Rulebook data the engine consults while deriving.
///
/// Nothing here is hardcoded in the algorithms: which bonus types stack,
/// scheduling order and the armor-class family all come from this value,
/// so alternate rulebooks only need a different config file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Bonus types whose contributions always sum.
    pub stacking_types: Vec<BonusType>,
    /// Scheduling order of categories. Unlisted categories sort last.
    pub category_order: Vec<Category>,
    /// Scheduling order of bonus types. Unlisted types sort last.
    pub bonus_type_order: Vec<BonusType>,
    /// Paths subject to dodge suppression while Dexterity to AC is denied.
    pub armor_class_paths: Vec<ConcretePath>,
    /// Pairs merged in provenance when one item contributes both.
    pub complementary_pairs: Vec<(BonusType, BonusType)>,
    /// Dice resolution for change formulas.
    pub eval_mode: EvalMode,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self {
            stacking_types: vec![
                BonusType::UNTYPED,
                BonusType::UNTYPED_PERM,
                BonusType::RACIAL,
                BonusType::CIRCUMSTANCE,
                BonusType::PENALTY,
            ],
            category_order: vec![
                Category::ABILITY,
                Category::ABILITY_MOD,
                Category::BAB,
                Category::ACP,
                Category::HIT_POINTS,
                Category::SKILL,
                Category::AC,
                Category::ATTACK,
                Category::DAMAGE,
                Category::SAVE,
                Category::CMB,
                Category::CMD,
                Category::INIT,
                Category::SPEED,
            ],
            bonus_type_order: vec![
                BonusType::UNTYPED,
                BonusType::UNTYPED_PERM,
                BonusType::BASE,
                BonusType::ENHANCEMENT,
                BonusType::DODGE,
                BonusType::INHERENT,
                BonusType::DEFLECTION,
                BonusType::MORALE,
                BonusType::LUCK,
                BonusType::SACRED,
                BonusType::INSIGHT,
                BonusType::RESISTANCE,
                BonusType::PROFANE,
                BonusType::TRAIT,
                BonusType::RACIAL,
                BonusType::SIZE,
                BonusType::COMPETENCE,
                BonusType::CIRCUMSTANCE,
                BonusType::ALCHEMICAL,
                BonusType::PENALTY,
            ],
            armor_class_paths: paths::ARMOR_CLASS_FAMILY.to_vec(),
            complementary_pairs: vec![(BonusType::BASE, BonusType::ENHANCEMENT)],
            eval_mode: EvalMode::Maximize,
        }
    }

    pub fn is_stacking(&self, bonus_type: &BonusType) -> bool {
        self.stacking_types.contains(bonus_type)
    }

    pub fn category_rank(&self, category: &Category) -> usize {
        rank(&self.category_order, category)
    }

    pub fn bonus_type_rank(&self, bonus_type: &BonusType) -> usize {
        rank(&self.bonus_type_order, bonus_type)
    }

    pub fn is_armor_class(&self, path: &ConcretePath) -> bool {
        self.armor_class_paths.contains(path)
    }

    /// The type `bonus_type` merges with in provenance, if any.
    pub fn complement_of(&self, bonus_type: &BonusType) -> Option<&BonusType> {
        self.complementary_pairs.iter().find_map(|(a, b)| {
            if a == bonus_type {
                Some(b)
            } else if b == bonus_type {
                Some(a)
            } else {
                None
            }
        })
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn rank<T: PartialEq>(order: &[T], value: &T) -> usize {
    order
        .iter()
        .position(|entry| entry == value)
        .unwrap_or(order.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dodge_does_not_stack_by_default() {
        let rules = RulesConfig::default();
        assert!(rules.is_stacking(&BonusType::UNTYPED));
        assert!(rules.is_stacking(&BonusType::CIRCUMSTANCE));
        assert!(!rules.is_stacking(&BonusType::DODGE));
        assert!(!rules.is_stacking(&BonusType::ENHANCEMENT));
    }

    #[test]
    fn unknown_names_rank_last() {
        let rules = RulesConfig::default();
        assert!(rules.category_rank(&Category::ABILITY) < rules.category_rank(&Category::SKILL));
        assert_eq!(
            rules.category_rank(&Category::new("spellResistance")),
            rules.category_order.len()
        );
        assert_eq!(
            rules.bonus_type_rank(&BonusType::new("mythic")),
            rules.bonus_type_order.len()
        );
    }

    #[test]
    fn complements_are_symmetric() {
        let rules = RulesConfig::default();
        assert_eq!(rules.complement_of(&BonusType::BASE), Some(&BonusType::ENHANCEMENT));
        assert_eq!(rules.complement_of(&BonusType::ENHANCEMENT), Some(&BonusType::BASE));
        assert_eq!(rules.complement_of(&BonusType::LUCK), None);
    }
}
