//! Change categories: the abstract "what does this modify" half of a target.
//!
//! A change names a category and, optionally, a subtarget within it
//! (`ability` + `dex`, `save` + `fort`, `skill` + `acr`). The
//! [`crate::engine::TargetResolver`] turns that pair into concrete paths.

use std::borrow::Cow;
use std::fmt;

/// Name of a change category, such as `ac`, `skill` or `save`.
///
/// Unknown names are legal: third-party content resolves them through
/// [`crate::engine::TargetHook`]s.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Category(Cow<'static, str>);

impl Category {
    pub const ABILITY: Self = Self::known("ability");
    pub const ABILITY_MOD: Self = Self::known("abilityMod");
    pub const BAB: Self = Self::known("bab");
    pub const ACP: Self = Self::known("acp");
    pub const HIT_POINTS: Self = Self::known("mhp");
    pub const SKILL: Self = Self::known("skill");
    pub const AC: Self = Self::known("ac");
    pub const ATTACK: Self = Self::known("attack");
    pub const DAMAGE: Self = Self::known("damage");
    pub const SAVE: Self = Self::known("save");
    pub const CMB: Self = Self::known("cmb");
    pub const CMD: Self = Self::known("cmd");
    pub const INIT: Self = Self::known("init");
    pub const SPEED: Self = Self::known("speed");

    const fn known(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Category {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}
