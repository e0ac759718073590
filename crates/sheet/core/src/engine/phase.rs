use std::fmt;

/// Stage of a derivation pass.
///
/// ```text
/// Idle → FlagScan → BaseRecompute → ChangeApply(i) ×N → Finalize → Idle
///                                        └─ ContinuousReapply(i)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassPhase {
    #[default]
    Idle,
    FlagScan,
    BaseRecompute,
    /// Applying the change at this schedule position.
    ChangeApply(usize),
    /// Re-applying continuous changes after the change at this position.
    ContinuousReapply(usize),
    Finalize,
}

impl PassPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassPhase::Idle => "idle",
            PassPhase::FlagScan => "flag_scan",
            PassPhase::BaseRecompute => "base_recompute",
            PassPhase::ChangeApply(_) => "change_apply",
            PassPhase::ContinuousReapply(_) => "continuous_reapply",
            PassPhase::Finalize => "finalize",
        }
    }

    /// Schedule position for the per-change phases.
    pub fn index(&self) -> Option<usize> {
        match self {
            PassPhase::ChangeApply(index) | PassPhase::ContinuousReapply(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for PassPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "{}({index})", self.as_str()),
            None => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_schedule_position() {
        assert_eq!(PassPhase::ContinuousReapply(4).to_string(), "continuous_reapply(4)");
        assert_eq!(PassPhase::Finalize.to_string(), "finalize");
        assert_eq!(PassPhase::FlagScan.index(), None);
    }
}
