use super::{ChangeRecord, CharacterFlags, ItemId, OwnerRef, UserId};

/// Anything that contributes changes or flags to a character: equipment,
/// buffs, feats, class features, conditions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContributingItem {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub editor: Option<UserId>,
    /// Inactive items (unequipped gear, disabled buffs) contribute nothing.
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub active: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: CharacterFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub changes: Vec<ChangeRecord>,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl ContributingItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            editor: None,
            active: true,
            flags: CharacterFlags::empty(),
            changes: Vec::new(),
        }
    }

    pub fn with_change(mut self, change: ChangeRecord) -> Self {
        self.changes.push(change);
        self
    }

    pub fn with_flags(mut self, flags: CharacterFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_editor(mut self, editor: UserId) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef {
            item_id: self.id.clone(),
            item_name: self.name.clone(),
            editor: self.editor.clone(),
        }
    }

    /// The item's changes with their owner back reference filled in.
    pub fn owned_changes(&self) -> impl Iterator<Item = ChangeRecord> + '_ {
        let owner = self.owner_ref();
        self.changes
            .iter()
            .map(move |change| change.clone().with_owner(owner.clone()))
    }
}
