//! Authored change records.
//!
//! A [`ChangeRecord`] is immutable input to a pass. Anything the engine
//! learns while applying it (resolved value, touched paths) goes into a
//! separate [`crate::engine::ChangeOutcome`].

use std::fmt;
use std::sync::Arc;

use crate::bonus::BonusType;
use crate::change::Category;
use crate::error::FormulaError;
use crate::formula::Bindings;

/// Identifier of a change, unique within one character's change set.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChangeId(String);

impl ChangeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a contributing item (equipment, buff, feat, condition).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user that may edit content (and therefore receives its formula errors).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a change combines with the current value of its target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Operator {
    /// Contribute to the target, subject to stacking rules.
    #[default]
    Add,
    /// Overwrite the target outright.
    Set,
}

/// Closure-backed formula for changes synthesized in code.
#[derive(Clone)]
pub struct ComputedFormula(Arc<dyn Fn(&dyn Bindings) -> Result<f64, FormulaError> + Send + Sync>);

impl ComputedFormula {
    pub fn new(
        f: impl Fn(&dyn Bindings) -> Result<f64, FormulaError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, bindings: &dyn Bindings) -> Result<f64, FormulaError> {
        (self.0)(bindings)
    }
}

impl fmt::Debug for ComputedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComputedFormula(..)")
    }
}

impl PartialEq for ComputedFormula {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The value expression of a change.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula {
    /// Authored expression text, evaluated by a [`crate::formula::FormulaEvaluator`].
    Literal(String),
    /// Code-supplied closure reading the same bindings.
    Computed(ComputedFormula),
}

impl Formula {
    pub fn literal(expr: impl Into<String>) -> Self {
        Self::Literal(expr.into())
    }

    pub fn computed(
        f: impl Fn(&dyn Bindings) -> Result<f64, FormulaError> + Send + Sync + 'static,
    ) -> Self {
        Self::Computed(ComputedFormula::new(f))
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self::Literal(String::from("0"))
    }
}

impl From<&str> for Formula {
    fn from(expr: &str) -> Self {
        Self::Literal(expr.to_string())
    }
}

// Formulas serialize as their bare expression text. Computed formulas exist
// only in memory.
#[cfg(feature = "serde")]
impl serde::Serialize for Formula {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Formula::Literal(expr) => serializer.serialize_str(expr),
            Formula::Computed(_) => Err(serde::ser::Error::custom(
                "computed formulas cannot be serialized",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Formula {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Formula::Literal)
    }
}

/// Display-only back reference from a change to the item that authored it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerRef {
    pub item_id: ItemId,
    pub item_name: String,
    /// User allowed to edit the item; formula errors are reported to them only.
    pub editor: Option<UserId>,
}

/// An authored modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeRecord {
    pub id: ChangeId,
    pub formula: Formula,
    #[cfg_attr(feature = "serde", serde(default))]
    pub operator: Operator,
    pub category: Category,
    /// Target within the category (`dex`, `fort`, `acr`, `armor`).
    /// `None` addresses the category as a whole.
    #[cfg_attr(feature = "serde", serde(default))]
    pub subtarget: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_type: BonusType,
    /// Higher runs first. Flag and override changes use 1001.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Re-applied after every non-continuous change in the pass.
    #[cfg_attr(feature = "serde", serde(default))]
    pub continuous: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    /// Filled in when the change is collected from its item.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub owner: Option<OwnerRef>,
}

impl ChangeRecord {
    pub const OVERRIDE_PRIORITY: i32 = 1001;

    /// Creates an `add` change.
    pub fn add(
        id: impl Into<String>,
        formula: impl Into<Formula>,
        category: Category,
        bonus_type: BonusType,
    ) -> Self {
        Self {
            id: ChangeId::new(id),
            formula: formula.into(),
            operator: Operator::Add,
            category,
            subtarget: None,
            bonus_type,
            priority: 0,
            continuous: false,
            label: String::new(),
            owner: None,
        }
    }

    /// Creates a `set` change.
    pub fn set(
        id: impl Into<String>,
        formula: impl Into<Formula>,
        category: Category,
        bonus_type: BonusType,
    ) -> Self {
        Self {
            operator: Operator::Set,
            ..Self::add(id, formula, category, bonus_type)
        }
    }

    pub fn with_subtarget(mut self, subtarget: impl Into<String>) -> Self {
        self.subtarget = Some(subtarget.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Label used for provenance: the authored label, else the owner's name,
    /// else the id.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            return &self.label;
        }
        match &self.owner {
            Some(owner) => &owner.item_name,
            None => self.id.as_str(),
        }
    }

    pub fn owner_item(&self) -> Option<&ItemId> {
        self.owner.as_ref().map(|owner| &owner.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_builder_keeps_add_defaults() {
        let change = ChangeRecord::set("haste.speed", "30", Category::SPEED, BonusType::UNTYPED)
            .with_subtarget("land")
            .with_priority(ChangeRecord::OVERRIDE_PRIORITY);
        assert_eq!(change.operator, Operator::Set);
        assert_eq!(change.priority, 1001);
        assert!(!change.continuous);
        assert_eq!(change.subtarget.as_deref(), Some("land"));
    }

    #[test]
    fn display_label_falls_back_to_owner_then_id() {
        let bare = ChangeRecord::add("ring.ac", "1", Category::AC, BonusType::DEFLECTION);
        assert_eq!(bare.display_label(), "ring.ac");

        let owned = bare.clone().with_owner(OwnerRef {
            item_id: ItemId::new("ring"),
            item_name: "Ring of Protection +1".into(),
            editor: None,
        });
        assert_eq!(owned.display_label(), "Ring of Protection +1");
        assert_eq!(owned.with_label("Ring").display_label(), "Ring");
    }

    #[test]
    fn operator_parses_case_insensitively() {
        assert_eq!("SET".parse::<Operator>(), Ok(Operator::Set));
        assert_eq!(Operator::Add.to_string(), "add");
    }

    #[test]
    fn computed_formulas_compare_by_identity() {
        let formula = Formula::computed(|_| Ok(2.0));
        assert_eq!(formula.clone(), formula);
        assert_ne!(formula, Formula::computed(|_| Ok(2.0)));
    }
}
