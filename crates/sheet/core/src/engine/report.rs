//! Per-pass output records.
//!
//! Authored changes are never mutated. What the engine learned about each one
//! (its resolved value, the paths it touched, whether it failed) lives here.

use crate::change::{ChangeId, UserId};
use crate::error::{ChangeError, PhaseError};
use crate::state::ConcretePath;

/// What happened to a change in the pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum ChangeStatus {
    /// Contributed to at least one path (possibly 0 when superseded).
    Applied,
    /// Target did not resolve.
    Inert,
    /// Formula failed; contributed nothing.
    Failed,
    /// Every target dropped the contribution (dodge while Dexterity is denied).
    Suppressed,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeOutcome {
    pub id: ChangeId,
    pub status: ChangeStatus,
    pub resolved_value: Option<f64>,
    pub contributed_paths: Vec<ConcretePath>,
}

impl ChangeOutcome {
    pub(crate) fn pending(id: ChangeId) -> Self {
        Self {
            id,
            status: ChangeStatus::Inert,
            resolved_value: None,
            contributed_paths: Vec::new(),
        }
    }
}

/// A formula failure addressed to whoever may edit the offending content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaNotice {
    /// `None` for engine-synthesized changes.
    pub editor: Option<UserId>,
    pub error: PhaseError<ChangeError>,
}

impl FormulaNotice {
    pub fn change_id(&self) -> &ChangeId {
        self.error.error.change_id()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivationReport {
    /// One outcome per scheduled change, in schedule order.
    pub outcomes: Vec<ChangeOutcome>,
    pub notices: Vec<FormulaNotice>,
    /// Content-pipeline defects such as duplicate ids.
    pub violations: Vec<ChangeError>,
}

impl DerivationReport {
    pub fn outcome(&self, id: &str) -> Option<&ChangeOutcome> {
        self.outcomes.iter().find(|outcome| outcome.id.as_str() == id)
    }

    /// Notices the given user is allowed to see.
    pub fn notices_for<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a FormulaNotice> {
        self.notices
            .iter()
            .filter(move |notice| notice.editor.as_ref() == Some(user))
    }

    pub fn failed(&self) -> impl Iterator<Item = &ChangeOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == ChangeStatus::Failed)
    }

    pub fn is_clean(&self) -> bool {
        self.notices.is_empty() && self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PassPhase;
    use crate::error::FormulaError;

    fn notice(change: &str, editor: Option<&str>) -> FormulaNotice {
        FormulaNotice {
            editor: editor.map(UserId::new),
            error: PhaseError::new(
                PassPhase::ChangeApply(0),
                ChangeError::Formula {
                    change: ChangeId::new(change),
                    source: FormulaError::DivisionByZero,
                },
            ),
        }
    }

    #[test]
    fn notices_reach_only_their_editor() {
        let report = DerivationReport {
            notices: vec![
                notice("belt", Some("gm")),
                notice("ring", Some("alice")),
                notice("_default.dex-ac", None),
            ],
            ..DerivationReport::default()
        };

        let alice = UserId::new("alice");
        let seen: Vec<_> = report
            .notices_for(&alice)
            .map(|notice| notice.change_id().as_str())
            .collect();
        assert_eq!(seen, vec!["ring"]);
        assert!(!report.is_clean());
    }
}
