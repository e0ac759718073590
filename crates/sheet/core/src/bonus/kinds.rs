//! Bonus types ("modifier types" in the rulebook).
//!
//! Bonus types are rulebook vocabulary, not engine constants: whether a type
//! stacks, and where it sorts, is decided by [`crate::config::RulesConfig`].
//! The constants below are the names the standard rules content uses.

use std::borrow::Cow;
use std::fmt;

/// Name of a bonus type, such as `enh`, `dodge` or `morale`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BonusType(Cow<'static, str>);

impl BonusType {
    pub const UNTYPED: Self = Self::known("untyped");
    pub const UNTYPED_PERM: Self = Self::known("untypedPerm");
    pub const BASE: Self = Self::known("base");
    pub const ENHANCEMENT: Self = Self::known("enh");
    pub const DODGE: Self = Self::known("dodge");
    pub const INHERENT: Self = Self::known("inherent");
    pub const DEFLECTION: Self = Self::known("deflection");
    pub const MORALE: Self = Self::known("morale");
    pub const LUCK: Self = Self::known("luck");
    pub const SACRED: Self = Self::known("sacred");
    pub const INSIGHT: Self = Self::known("insight");
    pub const RESISTANCE: Self = Self::known("resist");
    pub const PROFANE: Self = Self::known("profane");
    pub const TRAIT: Self = Self::known("trait");
    pub const RACIAL: Self = Self::known("racial");
    pub const SIZE: Self = Self::known("size");
    pub const COMPETENCE: Self = Self::known("competence");
    pub const CIRCUMSTANCE: Self = Self::known("circumstance");
    pub const ALCHEMICAL: Self = Self::known("alchemical");
    pub const PENALTY: Self = Self::known("penalty");

    const fn known(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a bonus type from any name, including ones unknown to the
    /// standard rules content.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dodge(&self) -> bool {
        *self == Self::DODGE
    }
}

impl Default for BonusType {
    fn default() -> Self {
        Self::UNTYPED
    }
}

impl fmt::Display for BonusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BonusType {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for BonusType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_and_borrowed_names_compare_equal() {
        assert_eq!(BonusType::new(String::from("dodge")), BonusType::DODGE);
        assert!(BonusType::from("dodge").is_dodge());
        assert_eq!(BonusType::ENHANCEMENT.as_str(), "enh");
    }

    #[test]
    fn default_is_untyped() {
        assert_eq!(BonusType::default(), BonusType::UNTYPED);
    }
}
