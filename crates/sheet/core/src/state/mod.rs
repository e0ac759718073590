//! Character state: authored data, the live sheet, and the layer functions
//! that rebuild it.

mod ability;
mod character;
mod layers;
mod path;
mod skills;
mod snapshot;

pub use ability::{Ability, AbilityScores, Save, SaveBases, SpeedKind};
pub use character::Character;
pub use layers::{BASE_DEFENSE, base_recompute, finalize, refresh_derived};
pub use path::{ConcretePath, paths};
pub use skills::{CLASS_SKILL_BONUS, SkillDef, SkillEntry, SkillTarget, SubSkillDef};
pub use snapshot::{CharacterSheet, Snapshot};
