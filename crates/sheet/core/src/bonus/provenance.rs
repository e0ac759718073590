//! Human-auditable record of what contributed to each path.
//!
//! The tracker mirrors the accumulator: every recorded entry is kept, and the
//! displayed breakdown is computed on read. For non-stacking `add` types only
//! the best contribution per bonus type is shown, so the breakdown sums to the
//! same total the accumulator produced.

use std::collections::BTreeMap;

use super::{ApplyContext, BonusType};
use crate::change::{ChangeId, ChangeRecord, ItemId, Operator};
use crate::state::ConcretePath;

/// One change's share of a [`ProvenanceEntry`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProvenancePart {
    pub change: ChangeId,
    pub bonus_type: BonusType,
    pub amount: f64,
}

impl ProvenancePart {
    fn of(change: &ChangeRecord, amount: f64) -> Self {
        Self {
            change: change.id.clone(),
            bonus_type: change.bonus_type.clone(),
            amount,
        }
    }
}

/// One line of a path's breakdown.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProvenanceEntry {
    pub amount: f64,
    pub label: String,
    pub bonus_type: BonusType,
    pub operator: Operator,
    /// Item the contribution came from, if any.
    pub source: Option<ItemId>,
    /// Changes folded into this entry. More than one when an item's
    /// complementary types were merged.
    pub parts: Vec<ProvenancePart>,
    #[cfg_attr(feature = "serde", serde(skip))]
    stacking: bool,
}

impl ProvenanceEntry {
    fn new(change: &ChangeRecord, amount: f64, stacking: bool) -> Self {
        Self {
            amount,
            label: change.display_label().to_string(),
            bonus_type: change.bonus_type.clone(),
            operator: change.operator,
            source: change.owner_item().cloned(),
            parts: vec![ProvenancePart::of(change, amount)],
            stacking,
        }
    }

    fn competes(&self) -> bool {
        self.operator == Operator::Add && !self.stacking
    }

    fn contains(&self, change: &ChangeId) -> bool {
        self.parts.iter().any(|part| part.change == *change)
    }
}

/// The displayed breakdown of one path.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProvenanceBuckets {
    pub positive: Vec<ProvenanceEntry>,
    pub negative: Vec<ProvenanceEntry>,
}

impl ProvenanceBuckets {
    /// Sum of every displayed `add` amount.
    pub fn added_total(&self) -> f64 {
        self.positive
            .iter()
            .chain(&self.negative)
            .filter(|entry| entry.operator == Operator::Add)
            .map(|entry| entry.amount)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Per-path provenance of one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProvenanceTracker {
    entries: BTreeMap<ConcretePath, Vec<ProvenanceEntry>>,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `change` contributed `amount` to `path`, replacing
    /// whatever the same change recorded there before.
    pub fn record(
        &mut self,
        ctx: &ApplyContext<'_>,
        change: &ChangeRecord,
        path: &ConcretePath,
        amount: f64,
    ) {
        self.retract(&change.id, path);
        if change.operator == Operator::Add && amount == 0.0 {
            return;
        }

        let stacking = ctx.rules.is_stacking(&change.bonus_type);
        let entries = self.entries.entry(path.clone()).or_default();

        if change.operator == Operator::Add && !stacking {
            if let Some(merged) = complement_entry(ctx, entries, change) {
                merged.amount += amount;
                merged.parts.push(ProvenancePart::of(change, amount));
                tracing::trace!(
                    change = %change.id,
                    %path,
                    total = merged.amount,
                    "merged complementary entry"
                );
                return;
            }
        }

        entries.push(ProvenanceEntry::new(change, amount, stacking));
    }

    pub fn retract(&mut self, change: &ChangeId, path: &ConcretePath) {
        let Some(entries) = self.entries.get_mut(path.as_str()) else {
            return;
        };
        for entry in entries.iter_mut().filter(|entry| entry.contains(change)) {
            entry.parts.retain(|part| part.change != *change);
            entry.amount = entry.parts.iter().map(|part| part.amount).sum();
            if let Some(first) = entry.parts.first() {
                entry.bonus_type = first.bonus_type.clone();
            }
        }
        entries.retain(|entry| !entry.parts.is_empty());
    }

    /// Displayed breakdown of `path`.
    ///
    /// Competing entries are judged part by part: a merged entry only shows
    /// the parts that win their own bonus type, and an entry with no winning
    /// part is hidden.
    pub fn buckets(&self, path: &str) -> ProvenanceBuckets {
        let Some(entries) = self.entries.get(path) else {
            return ProvenanceBuckets::default();
        };

        // (entry, part) of the best part per bonus type. Ties keep the first.
        let mut best: BTreeMap<&BonusType, (usize, usize)> = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate().filter(|(_, e)| e.competes()) {
            for (slot, part) in entry.parts.iter().enumerate() {
                best.entry(&part.bonus_type)
                    .and_modify(|current| {
                        let (i, s) = *current;
                        if part.amount > entries[i].parts[s].amount {
                            *current = (index, slot);
                        }
                    })
                    .or_insert((index, slot));
            }
        }

        let mut buckets = ProvenanceBuckets::default();
        for (index, entry) in entries.iter().enumerate() {
            let shown = if entry.competes() {
                let mut shown = entry.clone();
                let mut slot = 0;
                shown.parts.retain(|part| {
                    let wins = best.get(&part.bonus_type) == Some(&(index, slot));
                    slot += 1;
                    wins
                });
                let Some(first) = shown.parts.first() else {
                    continue;
                };
                shown.bonus_type = first.bonus_type.clone();
                shown.amount = shown.parts.iter().map(|part| part.amount).sum();
                shown
            } else {
                entry.clone()
            };
            if shown.operator == Operator::Add && shown.amount < 0.0 {
                buckets.negative.push(shown);
            } else {
                buckets.positive.push(shown);
            }
        }
        buckets
    }

    pub fn paths(&self) -> impl Iterator<Item = &ConcretePath> {
        self.entries
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(path, _)| path)
    }

    /// Displayed breakdown of every path.
    pub fn all_buckets(&self) -> BTreeMap<ConcretePath, ProvenanceBuckets> {
        self.paths()
            .map(|path| (path.clone(), self.buckets(path.as_str())))
            .collect()
    }
}

/// An unmerged entry on the same path from the same item whose type is the
/// complement of `change`'s type.
fn complement_entry<'e>(
    ctx: &ApplyContext<'_>,
    entries: &'e mut [ProvenanceEntry],
    change: &ChangeRecord,
) -> Option<&'e mut ProvenanceEntry> {
    let source = change.owner_item()?;
    let complement = ctx.rules.complement_of(&change.bonus_type)?;
    entries.iter_mut().find(|entry| {
        entry.operator == Operator::Add
            && entry.source.as_ref() == Some(source)
            && entry.parts.iter().all(|part| part.bonus_type == *complement)
    })
}
