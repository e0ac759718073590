//! The derivation pass.
//!
//! [`DerivationEngine::derive`] turns a [`Character`] into a fully computed
//! [`CharacterSheet`] plus the bookkeeping needed to explain it. A pass runs
//! to completion synchronously and shares no state with any other pass:
//!
//! 1. **FlagScan**: OR-reduce every active item's declared flags
//! 2. **BaseRecompute**: authored values, no changes applied
//! 3. **ChangeApply(i)**: resolve, evaluate, accumulate and record the i-th
//!    scheduled change, then refresh derived values; after every
//!    non-continuous change, re-apply every continuous one
//! 4. **Finalize**: values reading settled totals (skill modifiers)
//!
//! Nothing in one change can stop the pass. Formula failures become
//! [`FormulaNotice`]s, duplicate ids become violations, unresolvable targets
//! leave the change inert.

mod hook;
mod phase;
mod report;
mod resolver;
mod scheduler;

pub use hook::{StaticCategoryHook, TargetHook};
pub use phase::PassPhase;
pub use report::{ChangeOutcome, ChangeStatus, DerivationReport, FormulaNotice};
pub use resolver::TargetResolver;
pub use scheduler::PriorityScheduler;

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::bonus::{
    AccumulatorStore, Applied, ApplyContext, EvaluatedChange, ProvenanceBuckets, ProvenanceTracker,
};
use crate::change::{ChangeId, ChangeRecord, CharacterFlags, Formula, default_changes};
use crate::config::RulesConfig;
use crate::error::{ChangeError, FormulaError, PhaseError};
use crate::formula::{ArithmeticEvaluator, EvalOptions, FormulaEvaluator};
use crate::state::{
    Character, CharacterSheet, ConcretePath, base_recompute, finalize, refresh_derived,
};

/// Runs derivation passes.
///
/// Holds only immutable configuration, so one engine can derive any number
/// of characters, concurrently if the caller wishes.
pub struct DerivationEngine<E = ArithmeticEvaluator> {
    rules: RulesConfig,
    resolver: TargetResolver,
    evaluator: E,
}

impl DerivationEngine<ArithmeticEvaluator> {
    pub fn new(rules: RulesConfig) -> Self {
        Self::with_evaluator(rules, ArithmeticEvaluator)
    }
}

impl Default for DerivationEngine<ArithmeticEvaluator> {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl<E: FormulaEvaluator> DerivationEngine<E> {
    pub fn with_evaluator(rules: RulesConfig, evaluator: E) -> Self {
        Self {
            rules,
            resolver: TargetResolver::new(),
            evaluator,
        }
    }

    pub fn with_hook(mut self, hook: impl TargetHook + 'static) -> Self {
        self.resolver.register(hook);
        self
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    /// Runs one full pass over `character`.
    pub fn derive(&self, character: &Character) -> Derivation {
        let span = tracing::info_span!("derive", character = %character.name);
        let _entered = span.enter();

        let flags = character.declared_flags();
        tracing::debug!(phase = %PassPhase::FlagScan, ?flags);

        let sheet = base_recompute(character);
        tracing::debug!(phase = %PassPhase::BaseRecompute, paths = sheet.len());

        let (changes, violations) = collect_changes(character, flags);
        let order = PriorityScheduler::new(&self.rules).schedule(changes);
        let continuous: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|(_, change)| change.continuous)
            .map(|(index, _)| index)
            .collect();
        tracing::debug!(
            changes = order.len(),
            continuous = continuous.len(),
            "scheduled changes"
        );

        let mut pass = Pass {
            engine: self,
            ctx: ApplyContext::new(&self.rules, flags),
            sheet,
            accumulator: AccumulatorStore::new(),
            provenance: ProvenanceTracker::new(),
            outcomes: order
                .iter()
                .map(|change| ChangeOutcome::pending(change.id.clone()))
                .collect(),
            notices: Vec::new(),
            noticed: HashSet::new(),
        };

        for (index, change) in order.iter().enumerate() {
            pass.apply(index, change, PassPhase::ChangeApply(index));
            if change.continuous {
                continue;
            }
            for &other in continuous.iter().filter(|&&other| other != index) {
                pass.apply(other, &order[other], PassPhase::ContinuousReapply(index));
            }
        }

        let Pass {
            mut sheet,
            accumulator,
            provenance,
            outcomes,
            notices,
            ..
        } = pass;
        finalize(&mut sheet);
        tracing::debug!(phase = %PassPhase::Finalize, failed = notices.len(), "pass complete");

        Derivation {
            sheet,
            flags,
            order,
            overrides: accumulator,
            provenance,
            report: DerivationReport {
                outcomes,
                notices,
                violations,
            },
        }
    }
}

/// Defaults first, then every active item's changes. Later duplicates of an
/// id are dropped and reported.
fn collect_changes(
    character: &Character,
    flags: CharacterFlags,
) -> (Vec<ChangeRecord>, Vec<ChangeError>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    let mut violations = Vec::new();

    for change in default_changes(flags)
        .into_iter()
        .chain(character.authored_changes())
    {
        if seen.insert(change.id.clone()) {
            kept.push(change);
        } else {
            tracing::error!(
                change = %change.id,
                "duplicate change id; keeping the first occurrence"
            );
            violations.push(ChangeError::DuplicateId(change.id));
        }
    }
    (kept, violations)
}

/// Mutable state of one pass.
struct Pass<'a, E> {
    engine: &'a DerivationEngine<E>,
    ctx: ApplyContext<'a>,
    sheet: CharacterSheet,
    accumulator: AccumulatorStore,
    provenance: ProvenanceTracker,
    outcomes: Vec<ChangeOutcome>,
    notices: Vec<FormulaNotice>,
    noticed: HashSet<ChangeId>,
}

impl<E: FormulaEvaluator> Pass<'_, E> {
    fn apply(&mut self, index: usize, change: &ChangeRecord, phase: PassPhase) {
        let targets = self
            .engine
            .resolver
            .resolve(
                &change.category,
                change.subtarget.as_deref(),
                &change.bonus_type,
                &self.sheet,
            )
            .unwrap_or_default();
        if targets.is_empty() {
            if phase == PassPhase::ChangeApply(index) {
                tracing::debug!(
                    change = %change.id,
                    category = %change.category,
                    subtarget = change.subtarget.as_deref().unwrap_or("-"),
                    "target did not resolve; change is inert"
                );
            }
            self.outcomes[index].status = ChangeStatus::Inert;
            return;
        }

        let value = match self.evaluate(change) {
            Ok(value) => value,
            Err(error) => {
                self.fail(index, change, phase, error, &targets);
                return;
            }
        };

        let mut contributed = Vec::with_capacity(targets.len());
        for path in targets {
            match self
                .accumulator
                .apply(&self.ctx, &mut self.sheet, change, &path, value)
            {
                Applied::Suppressed => self.provenance.retract(&change.id, &path),
                Applied::Added { .. } | Applied::Set => {
                    self.provenance.record(&self.ctx, change, &path, value);
                    contributed.push(path);
                }
            }
        }

        let outcome = &mut self.outcomes[index];
        outcome.resolved_value = Some(value);
        outcome.status = if contributed.is_empty() {
            ChangeStatus::Suppressed
        } else {
            ChangeStatus::Applied
        };
        outcome.contributed_paths = contributed;

        refresh_derived(&mut self.sheet);
    }

    fn evaluate(&self, change: &ChangeRecord) -> Result<f64, FormulaError> {
        let value = match &change.formula {
            Formula::Literal(expr) => {
                let options = EvalOptions {
                    mode: self.ctx.rules.eval_mode,
                };
                self.engine
                    .evaluator
                    .evaluate(expr, &self.sheet, options)?
                    .total
            }
            Formula::Computed(formula) => formula.call(&self.sheet)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }

    fn fail(
        &mut self,
        index: usize,
        change: &ChangeRecord,
        phase: PassPhase,
        error: FormulaError,
        targets: &[ConcretePath],
    ) {
        tracing::warn!(
            change = %change.id,
            %phase,
            %error,
            "formula failed; change contributes nothing"
        );

        // A continuous change may have contributed on an earlier application.
        for path in targets {
            self.accumulator.withdraw(&mut self.sheet, change, path);
            self.provenance.retract(&change.id, path);
        }
        refresh_derived(&mut self.sheet);

        let outcome = &mut self.outcomes[index];
        outcome.status = ChangeStatus::Failed;
        outcome.resolved_value = None;
        outcome.contributed_paths.clear();

        if self.noticed.insert(change.id.clone()) {
            self.notices.push(FormulaNotice {
                editor: change.owner.as_ref().and_then(|owner| owner.editor.clone()),
                error: PhaseError::new(
                    phase,
                    ChangeError::Formula {
                        change: change.id.clone(),
                        source: error,
                    },
                ),
            });
        }
    }
}

/// Result of one pass. Read-only; discard and derive again when the
/// character changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivation {
    pub sheet: CharacterSheet,
    pub flags: CharacterFlags,
    /// Every change of the pass in scheduled order.
    pub order: Vec<ChangeRecord>,
    pub overrides: AccumulatorStore,
    pub provenance: ProvenanceTracker,
    pub report: DerivationReport,
}

impl Derivation {
    /// Final value of `path`, 0 when the path does not exist.
    pub fn value(&self, path: &str) -> f64 {
        self.sheet.get(path)
    }

    /// Displayed breakdown of `path`.
    pub fn explain(&self, path: &str) -> ProvenanceBuckets {
        self.provenance.buckets(path)
    }

    /// SHA-256 over every path and value in path order.
    ///
    /// Two passes over the same character produce the same fingerprint.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (path, value) in self.sheet.iter() {
            hasher.update(path.as_str().as_bytes());
            hasher.update([0u8]);
            hasher.update(value.to_bits().to_le_bytes());
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Changes that applied, paired with their resolved values, in schedule
    /// order. Input for [`crate::bonus::HighestChangeFilter`].
    pub fn evaluated_changes(&self) -> Vec<EvaluatedChange> {
        self.order
            .iter()
            .zip(&self.report.outcomes)
            .filter(|(_, outcome)| outcome.status == ChangeStatus::Applied)
            .filter_map(|(change, outcome)| {
                outcome
                    .resolved_value
                    .map(|value| EvaluatedChange::new(change.clone(), value))
            })
            .collect()
    }
}
