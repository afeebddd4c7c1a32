#[cfg(test)]
mod test;

use core::fmt;
use core::str::FromStr;
use thiserror::Error;

/// Denomination, a suit or notrump
///
/// We choose this representation over `Option<Suit>` because we are not sure if
/// the latter can be optimized to a single byte.
///
/// The order of the suits deviates from [`dds`][dds], but this order provides
/// natural ordering by deriving [`PartialOrd`] and [`Ord`].
///
/// [dds]: https://github.com/dds-bridge/dds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Strain {
    /// ♣
    Clubs,
    /// ♦
    Diamonds,
    /// ♥
    Hearts,
    /// ♠
    Spades,
    /// NT, the strain not proposing a trump suit
    Notrump,
}

impl Strain {
    /// Whether this strain is a suit
    #[must_use]
    pub const fn is_suit(self) -> bool {
        !matches!(self, Self::Notrump)
    }

    /// Whether this strain is notrump
    #[must_use]
    pub const fn is_notrump(self) -> bool {
        matches!(self, Self::Notrump)
    }

    /// Helper constant for iteration over all strains
    pub const ALL: [Self; 5] = [
        Self::Clubs,
        Self::Diamonds,
        Self::Hearts,
        Self::Spades,
        Self::Notrump,
    ];
}

/// The declared contract, used by the play engine only for its strain
///
/// Bidding is out of scope here: a contract is a level and a strain, nothing
/// more.  The absent contract is [`Contract::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contract {
    /// The number of odd tricks proposed, 1 to 7; 0 in [`Contract::NONE`]
    pub level: u8,

    /// The trump suit, or [`Strain::Notrump`]
    pub strain: Strain,
}

impl Contract {
    /// The sentinel for "no contract", level 0 at notrump
    pub const NONE: Self = Self {
        level: 0,
        strain: Strain::Notrump,
    };

    /// Create a contract from level and strain
    #[must_use]
    pub const fn new(level: u8, strain: Strain) -> Self {
        Self { level, strain }
    }

    /// Whether this is the absent contract
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for Contract {
    fn default() -> Self {
        Self::NONE
    }
}

/// `3NT`, `4H`, …; the absent contract shows as `-`
impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            return f.write_str("-");
        }
        let strain = match self.strain {
            Strain::Clubs => "C",
            Strain::Diamonds => "D",
            Strain::Hearts => "H",
            Strain::Spades => "S",
            Strain::Notrump => "NT",
        };
        write!(f, "{}{}", self.level, strain)
    }
}

/// Error parsing a contract string
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseContractError {
    /// The level is not a digit in 1..=7
    #[error("contract level must be 1 to 7")]
    BadLevel,

    /// The strain is not one of `C`, `D`, `H`, `S`, `N`
    #[error("unknown strain")]
    BadStrain,
}

/// Parse a level digit followed by a strain character
///
/// `N` and `NT` both denote notrump.  The empty string parses to
/// [`Contract::NONE`].
impl FromStr for Contract {
    type Err = ParseContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::NONE);
        }
        let mut chars = s.chars();
        let level = match chars.next().and_then(|c| c.to_digit(10)) {
            Some(level @ 1..=7) => {
                // Levels are in 1..=7, which fits in `u8`
                #[allow(clippy::cast_possible_truncation)]
                let level = level as u8;
                level
            }
            _ => return Err(ParseContractError::BadLevel),
        };
        let strain = match (chars.next(), chars.next(), chars.next()) {
            (Some('C' | 'c'), None, _) => Strain::Clubs,
            (Some('D' | 'd'), None, _) => Strain::Diamonds,
            (Some('H' | 'h'), None, _) => Strain::Hearts,
            (Some('S' | 's'), None, _) => Strain::Spades,
            (Some('N' | 'n'), None, _) | (Some('N' | 'n'), Some('T' | 't'), None) => {
                Strain::Notrump
            }
            _ => return Err(ParseContractError::BadStrain),
        };
        Ok(Self::new(level, strain))
    }
}
