//! Bonus stacking: the accumulator, its provenance mirror, and the
//! standalone highest-of-type filter.

mod accumulator;
mod filter;
mod kinds;
mod provenance;

pub use accumulator::{AccumulatorStore, AddState, Applied, Override};
pub use filter::{EvaluatedChange, FilterOptions, HighestChangeFilter};
pub use kinds::BonusType;
pub use provenance::{ProvenanceBuckets, ProvenanceEntry, ProvenancePart, ProvenanceTracker};

use crate::change::CharacterFlags;
use crate::config::RulesConfig;
use crate::state::ConcretePath;

/// Pass-scoped inputs every stacking decision reads.
#[derive(Clone, Copy, Debug)]
pub struct ApplyContext<'a> {
    pub rules: &'a RulesConfig,
    pub flags: CharacterFlags,
}

impl<'a> ApplyContext<'a> {
    pub fn new(rules: &'a RulesConfig, flags: CharacterFlags) -> Self {
        Self { rules, flags }
    }

    /// Positive dodge bonuses to the armor-class family are lost together
    /// with Dexterity to AC.
    pub fn suppresses(&self, bonus_type: &BonusType, path: &ConcretePath, value: f64) -> bool {
        bonus_type.is_dodge()
            && value > 0.0
            && self.flags.loses_dex_to_ac()
            && self.rules.is_armor_class(path)
    }
}
