//! Bonus derivation for tabletop character sheets.
//!
//! `sheet-core` computes a character's final numbers from the changes its
//! equipment, buffs, feats and conditions contribute: scheduling them,
//! resolving abstract targets to concrete sheet paths, applying stacking
//! rules, and recording provenance for explanation. All derivation flows
//! through [`engine::DerivationEngine`]; loaders and front-ends depend on the
//! types re-exported here.
pub mod bonus;
pub mod change;
pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod state;
pub use bonus::{
    AccumulatorStore, Applied, ApplyContext, BonusType, EvaluatedChange, FilterOptions,
    HighestChangeFilter, Override, ProvenanceBuckets, ProvenanceEntry, ProvenanceTracker,
};
pub use change::{
    Category, ChangeId, ChangeRecord, CharacterFlags, ContributingItem, Formula, ItemId, Operator,
    OwnerRef, UserId, default_changes,
};
pub use config::RulesConfig;
pub use engine::{
    ChangeOutcome, ChangeStatus, Derivation, DerivationEngine, DerivationReport, FormulaNotice,
    PassPhase, PriorityScheduler, TargetHook, TargetResolver,
};
pub use error::{ChangeError, ErrorSeverity, FormulaError, PhaseError, SheetError};
pub use formula::{
    ArithmeticEvaluator, Bindings, EvalMode, EvalOptions, Evaluation, FormulaEvaluator,
};
pub use state::{
    Ability, AbilityScores, Character, CharacterSheet, ConcretePath, Save, SaveBases, SkillDef,
    SpeedKind, Snapshot, paths,
};
