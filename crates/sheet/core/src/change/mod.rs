//! Change records and the data items contribute to a pass.

mod category;
mod defaults;
mod flags;
mod item;
mod record;

pub use category::Category;
pub use defaults::{DEFAULT_ID_PREFIX, default_changes};
pub use flags::CharacterFlags;
pub use item::ContributingItem;
pub use record::{
    ChangeId, ChangeRecord, ComputedFormula, Formula, ItemId, OwnerRef, Operator, UserId,
};
