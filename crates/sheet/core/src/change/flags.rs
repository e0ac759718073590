use bitflags::bitflags;

bitflags! {
    /// Pass-scoped condition flags, OR-reduced from every active item.
    ///
    /// Computed once during `FlagScan` and passed by value to everything
    /// that needs it; nothing mutates it for the rest of the pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CharacterFlags: u8 {
        /// Dexterity bonus and positive dodge bonuses no longer apply to AC.
        const LOSE_DEX_TO_AC = 1 << 0;
        const NO_STR         = 1 << 1;
        const NO_DEX         = 1 << 2;
        const ONE_INT        = 1 << 3;
        const ONE_WIS        = 1 << 4;
        const ONE_CHA        = 1 << 5;
    }
}

impl CharacterFlags {
    /// OR-reduces a sequence of declared flag sets.
    pub fn reduce(declared: impl IntoIterator<Item = CharacterFlags>) -> Self {
        declared
            .into_iter()
            .fold(Self::empty(), |acc, flags| acc | flags)
    }

    pub fn loses_dex_to_ac(self) -> bool {
        self.contains(Self::LOSE_DEX_TO_AC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_is_a_union() {
        let flags = CharacterFlags::reduce([
            CharacterFlags::NO_DEX,
            CharacterFlags::empty(),
            CharacterFlags::LOSE_DEX_TO_AC | CharacterFlags::NO_DEX,
        ]);
        assert_eq!(flags, CharacterFlags::NO_DEX | CharacterFlags::LOSE_DEX_TO_AC);
        assert!(flags.loses_dex_to_ac());
    }

    #[test]
    fn reduce_of_nothing_is_empty() {
        assert!(CharacterFlags::reduce([]).is_empty());
    }
}
