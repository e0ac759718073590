//! Extension point for categories the built-in target table does not know.

use crate::bonus::BonusType;
use crate::change::Category;
use crate::state::{ConcretePath, Snapshot};

/// Resolves targets for third-party categories.
///
/// Hooks are consulted in priority order (lower values first) only when the
/// built-in table misses. The first hook returning `Some` wins; when every
/// hook returns `None` the change is inert.
pub trait TargetHook: Send + Sync {
    /// Returns the priority of this hook. Lower values run first.
    /// Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn resolve(
        &self,
        category: &Category,
        subtarget: Option<&str>,
        bonus_type: &BonusType,
        snapshot: &dyn Snapshot,
    ) -> Option<Vec<ConcretePath>>;
}

impl<F> TargetHook for F
where
    F: Fn(&Category, Option<&str>, &BonusType, &dyn Snapshot) -> Option<Vec<ConcretePath>>
        + Send
        + Sync,
{
    fn resolve(
        &self,
        category: &Category,
        subtarget: Option<&str>,
        bonus_type: &BonusType,
        snapshot: &dyn Snapshot,
    ) -> Option<Vec<ConcretePath>> {
        self(category, subtarget, bonus_type, snapshot)
    }
}

/// Hook mapping one category straight onto a fixed set of paths.
#[derive(Clone, Debug)]
pub struct StaticCategoryHook {
    category: Category,
    paths: Vec<ConcretePath>,
}

impl StaticCategoryHook {
    pub fn new(category: Category, paths: Vec<ConcretePath>) -> Self {
        Self { category, paths }
    }
}

impl TargetHook for StaticCategoryHook {
    fn resolve(
        &self,
        category: &Category,
        _subtarget: Option<&str>,
        _bonus_type: &BonusType,
        _snapshot: &dyn Snapshot,
    ) -> Option<Vec<ConcretePath>> {
        (*category == self.category).then(|| self.paths.clone())
    }
}
