//! Per-path stacking bookkeeping.
//!
//! For every concrete path touched in a pass the store keeps one [`Override`]:
//! per bonus type, the contributions seen so far and the amount currently
//! added to the path. Applying a contribution moves the path by the marginal
//! difference between what the group should contribute now and what it
//! already contributed, which makes the result independent of arrival order
//! and makes re-applying the same change a no-op.

use std::collections::BTreeMap;

use super::{ApplyContext, BonusType};
use crate::change::{ChangeId, ChangeRecord, Operator};
use crate::state::{ConcretePath, Snapshot};

/// `add` state for one bonus type on one path.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AddState {
    stacking: bool,
    contributions: BTreeMap<ChangeId, f64>,
    applied: f64,
}

impl AddState {
    fn new(stacking: bool) -> Self {
        Self {
            stacking,
            ..Self::default()
        }
    }

    /// What the group should contribute: the sum when stacking, otherwise
    /// the highest contribution. The first contribution counts in full even
    /// when negative.
    fn target(&self) -> f64 {
        let values = self.contributions.values().copied();
        if self.stacking {
            values.sum()
        } else {
            values.reduce(f64::max).unwrap_or(0.0)
        }
    }

    fn contribute(&mut self, change: &ChangeId, value: f64) -> f64 {
        self.contributions.insert(change.clone(), value);
        self.settle()
    }

    fn withdraw(&mut self, change: &ChangeId) -> f64 {
        if self.contributions.remove(change).is_none() {
            return 0.0;
        }
        self.settle()
    }

    fn settle(&mut self) -> f64 {
        let target = self.target();
        let delta = target - self.applied;
        self.applied = target;
        delta
    }

    pub fn is_stacking(&self) -> bool {
        self.stacking
    }

    /// Amount currently added to the path by this bonus type.
    pub fn applied(&self) -> f64 {
        self.applied
    }

    pub fn running(&self) -> Option<f64> {
        (!self.contributions.is_empty()).then(|| self.target())
    }

    pub fn contributions(&self) -> impl Iterator<Item = (&ChangeId, f64)> {
        self.contributions.iter().map(|(id, value)| (id, *value))
    }
}

/// Stacking state of one concrete path. Created on first touch.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Override {
    add: BTreeMap<BonusType, AddState>,
    set: BTreeMap<BonusType, f64>,
}

impl Override {
    pub fn add_state(&self, bonus_type: &BonusType) -> Option<&AddState> {
        self.add.get(bonus_type)
    }

    pub fn last_set(&self, bonus_type: &BonusType) -> Option<f64> {
        self.set.get(bonus_type).copied()
    }

    pub fn add_states(&self) -> impl Iterator<Item = (&BonusType, &AddState)> {
        self.add.iter()
    }
}

/// What happened to one contribution on one path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Applied {
    /// The path moved by `delta` (possibly 0 when superseded).
    Added { delta: f64 },
    /// The path was overwritten.
    Set,
    /// Dodge bonus dropped while Dexterity to AC is denied.
    Suppressed,
}

/// Every [`Override`] of one pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccumulatorStore {
    overrides: BTreeMap<ConcretePath, Override>,
}

impl AccumulatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Override> {
        self.overrides.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConcretePath, &Override)> {
        self.overrides.iter()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Applies `value` from `change` to `path` on `sheet`.
    pub fn apply<S: Snapshot + ?Sized>(
        &mut self,
        ctx: &ApplyContext<'_>,
        sheet: &mut S,
        change: &ChangeRecord,
        path: &ConcretePath,
        value: f64,
    ) -> Applied {
        match change.operator {
            Operator::Set => {
                self.overrides
                    .entry(path.clone())
                    .or_default()
                    .set
                    .insert(change.bonus_type.clone(), value);
                sheet.set_property(path, value);
                tracing::trace!(change = %change.id, %path, value, "set");
                Applied::Set
            }
            Operator::Add => {
                if ctx.suppresses(&change.bonus_type, path, value) {
                    tracing::trace!(change = %change.id, %path, value, "dodge suppressed");
                    return Applied::Suppressed;
                }
                let stacking = ctx.rules.is_stacking(&change.bonus_type);
                let delta = self
                    .overrides
                    .entry(path.clone())
                    .or_default()
                    .add
                    .entry(change.bonus_type.clone())
                    .or_insert_with(|| AddState::new(stacking))
                    .contribute(&change.id, value);
                if delta != 0.0 {
                    sheet.add_property(path, delta);
                }
                tracing::trace!(change = %change.id, %path, value, delta, stacking, "add");
                Applied::Added { delta }
            }
        }
    }

    /// Removes an earlier `add` contribution of `change` from `path`.
    ///
    /// Used when a continuous change fails on re-application. Returns the
    /// delta applied to the path.
    pub fn withdraw<S: Snapshot + ?Sized>(
        &mut self,
        sheet: &mut S,
        change: &ChangeRecord,
        path: &ConcretePath,
    ) -> f64 {
        let Some(state) = self
            .overrides
            .get_mut(path.as_str())
            .and_then(|entry| entry.add.get_mut(&change.bonus_type))
        else {
            return 0.0;
        };
        let delta = state.withdraw(&change.id);
        if delta != 0.0 {
            sheet.add_property(path, delta);
        }
        delta
    }
}
