//! Ability scores, saving throws and movement modes.

/// The six ability scores.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    /// Standard modifier for a score: floor((score - 10) / 2).
    ///
    /// Examples:
    /// - 10-11 → +0
    /// - 12-13 → +1
    /// - 8-9 → -1
    /// - 0 → -5
    pub fn modifier(score: f64) -> f64 {
        ((score - 10.0) / 2.0).floor()
    }
}

/// Authored base ability scores.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores {
    pub str: f64,
    pub dex: f64,
    pub con: f64,
    pub int: f64,
    pub wis: f64,
    pub cha: f64,
}

impl AbilityScores {
    pub fn new(str: f64, dex: f64, con: f64, int: f64, wis: f64, cha: f64) -> Self {
        Self {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> f64 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }
}

impl Default for AbilityScores {
    /// Default scores: all 10
    fn default() -> Self {
        Self::new(10.0, 10.0, 10.0, 10.0, 10.0, 10.0)
    }
}

/// The three saving throws.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Save {
    Fort,
    Ref,
    Will,
}

impl Save {
    /// Ability whose modifier adds to this save.
    pub fn ability(self) -> Ability {
        match self {
            Save::Fort => Ability::Con,
            Save::Ref => Ability::Dex,
            Save::Will => Ability::Wis,
        }
    }
}

/// Authored base save bonuses (from class levels).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveBases {
    pub fort: f64,
    pub reflex: f64,
    pub will: f64,
}

impl SaveBases {
    pub fn get(&self, save: Save) -> f64 {
        match save {
            Save::Fort => self.fort,
            Save::Ref => self.reflex,
            Save::Will => self.will,
        }
    }
}

/// Movement modes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SpeedKind {
    Land,
    Climb,
    Swim,
    Fly,
    Burrow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_floors_toward_negative_infinity() {
        assert_eq!(Ability::modifier(10.0), 0.0);
        assert_eq!(Ability::modifier(13.0), 1.0);
        assert_eq!(Ability::modifier(9.0), -1.0);
        assert_eq!(Ability::modifier(0.0), -5.0);
        assert_eq!(Ability::modifier(20.0), 5.0);
    }

    #[test]
    fn ability_names_round_trip_through_strum() {
        assert_eq!("DEX".parse::<Ability>(), Ok(Ability::Dex));
        assert_eq!(Ability::Cha.as_ref(), "cha");
        assert_eq!(Save::Ref.ability(), Ability::Dex);
    }
}
