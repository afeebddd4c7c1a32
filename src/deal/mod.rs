#[cfg(test)]
mod test;

use crate::contract::Strain;
use core::fmt;
use core::num::{NonZeroU8, Wrapping};
use core::ops::{Add, AddAssign, BitAnd, BitOr, BitXor, Index, IndexMut, Not, Sub};
use core::str::FromStr;
use thiserror::Error;

/// Rank characters in ascending order, `T` standing for the ten
const RANKS: &[u8; 13] = b"23456789TJQKA";

fn rank_from_char(c: char) -> Option<u8> {
    let c = c.to_ascii_uppercase();
    RANKS.iter().position(|&b| char::from(b) == c).map(|i| {
        // The position is in 0..13, which fits in `u8`
        #[allow(clippy::cast_possible_truncation)]
        let i = i as u8;
        i + 2
    })
}

const fn rank_to_char(rank: u8) -> char {
    RANKS[rank as usize - 2] as char
}

/// One of the four playing suits
///
/// Every suit is also a [`Strain`]; the conversion back is fallible because
/// notrump names no suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    /// ♣, the lowest-ranking suit
    Clubs,
    /// ♦
    Diamonds,
    /// ♥
    Hearts,
    /// ♠, the highest-ranking suit
    Spades,
}

impl Suit {
    /// Suits from clubs up, the order of this crate's bit layout
    pub const ASC: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    /// Suits from spades down, the order of PBN hand strings
    pub const DESC: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Parse a suit character, case insensitively
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' | 'c' => Some(Self::Clubs),
            'D' | 'd' => Some(Self::Diamonds),
            'H' | 'h' => Some(Self::Hearts),
            'S' | 's' => Some(Self::Spades),
            _ => None,
        }
    }

    const fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Self::Clubs,
            1 => Self::Diamonds,
            2 => Self::Hearts,
            _ => Self::Spades,
        }
    }
}

impl From<Suit> for char {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl From<Suit> for Strain {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Clubs => Self::Clubs,
            Suit::Diamonds => Self::Diamonds,
            Suit::Hearts => Self::Hearts,
            Suit::Spades => Self::Spades,
        }
    }
}

/// Error raised when converting [`Strain::Notrump`] to a suit
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Notrump is not a suit")]
pub struct SuitFromNotrumpError;

impl TryFrom<Strain> for Suit {
    type Error = SuitFromNotrumpError;

    fn try_from(strain: Strain) -> Result<Self, Self::Error> {
        match strain {
            Strain::Clubs => Ok(Self::Clubs),
            Strain::Diamonds => Ok(Self::Diamonds),
            Strain::Hearts => Ok(Self::Hearts),
            Strain::Spades => Ok(Self::Spades),
            Strain::Notrump => Err(SuitFromNotrumpError),
        }
    }
}

/// Position at the table
///
/// Seats advance clockwise; adding a [`Wrapping`] offset rotates around the
/// table, so `seat + Wrapping(1)` is the next seat to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Seat {
    /// North, partnering [`Seat::South`]
    North,
    /// East, partnering [`Seat::West`]
    East,
    /// South, partnering [`Seat::North`]
    South,
    /// West, partnering [`Seat::East`]
    West,
}

impl Seat {
    /// Seats in clockwise order, the order of PBN deal strings
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Whether this seat belongs to the North-South side
    #[must_use]
    pub const fn is_ns(self) -> bool {
        self as u8 & 1 == 0
    }

    /// Parse a seat character, case insensitively
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'N' | 'n' => Some(Self::North),
            'E' | 'e' => Some(Self::East),
            'S' | 's' => Some(Self::South),
            'W' | 'w' => Some(Self::West),
            _ => None,
        }
    }

    const fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }
}

impl Add<Wrapping<u8>> for Seat {
    type Output = Self;

    fn add(self, rhs: Wrapping<u8>) -> Self {
        Self::from_index((Wrapping(self as u8) + rhs).0)
    }
}

impl AddAssign<Wrapping<u8>> for Seat {
    fn add_assign(&mut self, rhs: Wrapping<u8>) {
        *self = *self + rhs;
    }
}

impl From<Seat> for char {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }
}

bitflags::bitflags! {
    /// A set of seats
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SeatFlags: u8 {
        /// Flag for [`Seat::North`]
        const NORTH = 0b0001;
        /// Flag for [`Seat::East`]
        const EAST = 0b0010;
        /// Flag for [`Seat::South`]
        const SOUTH = 0b0100;
        /// Flag for [`Seat::West`]
        const WEST = 0b1000;
    }
}

impl From<Seat> for SeatFlags {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::North => Self::NORTH,
            Seat::East => Self::EAST,
            Seat::South => Self::SOUTH,
            Seat::West => Self::WEST,
        }
    }
}

/// A single playing card, packed into one byte
///
/// The suit lives in the low two bits and the rank above them, which keeps
/// the packed value non-zero and lets `Option<Card>` cost nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(NonZeroU8);

impl Card {
    /// Pack suit and rank into a card
    ///
    /// Ranks run from 2 to 14, with 11 to 14 standing for J, Q, K, A.
    ///
    /// # Panics
    /// Panics if the rank is not in the range 2..=14.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        assert!(2 <= rank && rank <= 14);
        match NonZeroU8::new(rank << 2 | suit as u8) {
            Some(packed) => Self(packed),
            None => unreachable!(),
        }
    }

    /// The suit of the card
    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::from_index(self.0.get())
    }

    /// The rank of the card, 2 to 14
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0.get() >> 2
    }

    /// High-card points of the card: A = 4, K = 3, Q = 2, J = 1
    #[must_use]
    pub const fn hcp(self) -> u8 {
        self.rank().saturating_sub(10)
    }
}

/// Two uppercase characters, rank then suit, e.g. `AS` for the spade ace
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use fmt::Write as _;
        f.write_char(rank_to_char(self.rank()))?;
        f.write_char(self.suit().into())
    }
}

/// Error parsing a two-character card string
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseCardError {
    /// The string is not exactly two characters
    #[error("a card string is a rank character followed by a suit character")]
    Length,

    /// Unknown rank character
    #[error("unknown rank `{0}`")]
    BadRank(char),

    /// Unknown suit character
    #[error("unknown suit `{0}`")]
    BadSuit(char),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError::Length);
        };
        Ok(Self::new(
            Suit::from_char(suit).ok_or(ParseCardError::BadSuit(suit))?,
            rank_from_char(rank).ok_or(ParseCardError::BadRank(rank))?,
        ))
    }
}

/// A fixed-capacity bitset of cards or ranks
pub trait SmallSet<T>: Copy + Eq + BitAnd + BitOr + BitXor + Not + Sub {
    /// The empty set
    const EMPTY: Self;

    /// The set of every representable value
    const ALL: Self;

    /// The number of elements in the set
    #[must_use]
    fn len(self) -> usize;

    /// Whether the set has no elements
    #[must_use]
    fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Whether the set contains a value
    fn contains(self, value: T) -> bool;

    /// Insert a value, reporting whether it was new
    fn insert(&mut self, value: T) -> bool;

    /// Remove a value, reporting whether it was present
    fn remove(&mut self, value: T) -> bool;

    /// Visit the elements of the set
    fn iter(self) -> impl Iterator<Item = T>;
}

/// The set operators every card set supports, defined over the raw bits
///
/// `-` is set difference; `!` complements within the valid-card mask rather
/// than over the whole integer.
macro_rules! set_ops {
    ($set:ty) => {
        impl BitAnd for $set {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self::from_bits(self.to_bits() & rhs.to_bits())
            }
        }

        impl BitOr for $set {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self::from_bits(self.to_bits() | rhs.to_bits())
            }
        }

        impl BitXor for $set {
            type Output = Self;

            fn bitxor(self, rhs: Self) -> Self {
                Self::from_bits(self.to_bits() ^ rhs.to_bits())
            }
        }

        impl Not for $set {
            type Output = Self;

            fn not(self) -> Self {
                Self::ALL ^ self
            }
        }

        impl Sub for $set {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                self & !rhs
            }
        }
    };
}

/// The ranks held in a single suit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Holding(u16);

impl Holding {
    /// As a bitset of ranks, bit `r` standing for rank `r`
    #[must_use]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Create a holding from a bitset of ranks, dropping invalid bits
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Summed high-card points of the holding
    #[must_use]
    pub fn hcp(self) -> u8 {
        self.iter().map(|rank| rank.saturating_sub(10)).sum()
    }
}

impl SmallSet<u8> for Holding {
    const EMPTY: Self = Self(0);
    const ALL: Self = Self(0x7FFC);

    fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    fn contains(self, rank: u8) -> bool {
        self.0 >> rank & 1 != 0
    }

    fn insert(&mut self, rank: u8) -> bool {
        let before = self.0;
        self.0 |= 1 << rank & Self::ALL.0;
        self.0 != before
    }

    fn remove(&mut self, rank: u8) -> bool {
        let before = self.0;
        self.0 &= !(1 << rank);
        self.0 != before
    }

    fn iter(self) -> impl Iterator<Item = u8> {
        (2..15).filter(move |&rank| self.contains(rank))
    }
}

set_ops!(Holding);

/// Ranks print highest first, the ten as `T` for PBN compatibility
///
/// Formatting flags are ignored; pad the rendered string with
/// [`fmt::Formatter::pad`] if alignment matters.
impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use fmt::Write as _;
        (2..15)
            .rev()
            .filter(|&rank| self.contains(rank))
            .try_for_each(|rank| f.write_char(rank_to_char(rank)))
    }
}

impl FromStr for Holding {
    type Err = ParseHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut holding = Self::EMPTY;
        for c in s.chars() {
            let rank = rank_from_char(c).ok_or(ParseHandError::BadRank(c))?;
            if !holding.insert(rank) {
                return Err(ParseHandError::RepeatedRank);
            }
        }
        Ok(holding)
    }
}

/// Error parsing a PBN hand or deal string
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseHandError {
    /// A hand has more or fewer than four `.`-separated suits
    #[error("a hand consists of exactly four suits")]
    NotFourSuits,

    /// A deal has more or fewer than four whitespace-separated hands
    #[error("a deal consists of exactly four hands")]
    NotFourHands,

    /// Unknown rank character
    #[error("unknown rank `{0}`")]
    BadRank(char),

    /// The same rank appears twice within a suit
    #[error("rank repeated within a suit")]
    RepeatedRank,

    /// Unknown seat prefix on a deal string
    #[error("unknown seat `{0}`")]
    BadSeat(char),
}

/// The cards held by one seat, one [`Holding`] per suit
///
/// A hand occupies four 16-bit rank lanes in ascending suit order, so it
/// also reads as a single 52-bit card mask via [`Hand::to_bits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hand(pub [Holding; 4]);

impl Index<Suit> for Hand {
    type Output = Holding;

    fn index(&self, suit: Suit) -> &Holding {
        &self.0[suit as usize]
    }
}

impl IndexMut<Suit> for Hand {
    fn index_mut(&mut self, suit: Suit) -> &mut Holding {
        &mut self.0[suit as usize]
    }
}

impl Hand {
    /// As a bitset of cards, one 16-bit rank lane per suit
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        let Self([clubs, diamonds, hearts, spades]) = self;
        (spades.to_bits() as u64) << 48
            | (hearts.to_bits() as u64) << 32
            | (diamonds.to_bits() as u64) << 16
            | clubs.to_bits() as u64
    }

    /// Create a hand from a bitset of cards, dropping invalid bits
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u64) -> Self {
        Self([
            Holding::from_bits(bits as u16),
            Holding::from_bits((bits >> 16) as u16),
            Holding::from_bits((bits >> 32) as u16),
            Holding::from_bits((bits >> 48) as u16),
        ])
    }

    /// Summed high-card points of the hand
    #[must_use]
    pub fn hcp(self) -> u8 {
        self.0.iter().map(|holding| holding.hcp()).sum()
    }

    /// The part of this hand in the given suit
    #[must_use]
    pub fn only(self, suit: Suit) -> Self {
        let mut hand = Self::EMPTY;
        hand[suit] = self[suit];
        hand
    }
}

impl SmallSet<Card> for Hand {
    const EMPTY: Self = Self([Holding::EMPTY; 4]);
    const ALL: Self = Self([Holding::ALL; 4]);

    fn len(self) -> usize {
        self.to_bits().count_ones() as usize
    }

    fn contains(self, card: Card) -> bool {
        self[card.suit()].contains(card.rank())
    }

    fn insert(&mut self, card: Card) -> bool {
        self[card.suit()].insert(card.rank())
    }

    fn remove(&mut self, card: Card) -> bool {
        self[card.suit()].remove(card.rank())
    }

    fn iter(self) -> impl Iterator<Item = Card> {
        Suit::ASC
            .into_iter()
            .flat_map(move |suit| self[suit].iter().map(move |rank| Card::new(suit, rank)))
    }
}

set_ops!(Hand);

/// Four suit groups from spades down to clubs, separated by dots
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, suit) in Suit::DESC.into_iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", self[suit])?;
        }
        Ok(())
    }
}

/// Parse a PBN hand, four suit groups from spades to clubs
///
/// The empty hand `...` doubles as the notation for an unknown hand, which
/// parses to the empty set.  The PBN shorthand `-` is also accepted.
impl FromStr for Hand {
    type Err = ParseHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::EMPTY);
        }
        let mut parts = s.split('.');
        let mut hand = Self::EMPTY;
        for suit in Suit::DESC {
            let part = parts.next().ok_or(ParseHandError::NotFourSuits)?;
            hand[suit] = part.parse()?;
        }
        match parts.next() {
            Some(_) => Err(ParseHandError::NotFourSuits),
            None => Ok(hand),
        }
    }
}

/// A deal of four hands indexed by seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Deal(pub [Hand; 4]);

impl Index<Seat> for Deal {
    type Output = Hand;

    fn index(&self, seat: Seat) -> &Hand {
        &self.0[seat as usize]
    }
}

impl IndexMut<Seat> for Deal {
    fn index_mut(&mut self, seat: Seat) -> &mut Hand {
        &mut self.0[seat as usize]
    }
}

struct DealDisplay {
    deal: Deal,
    seat: Seat,
}

impl fmt::Display for DealDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", char::from(self.seat), self.deal[self.seat])?;
        for offset in 1..4 {
            write!(f, " {}", self.deal[self.seat + Wrapping(offset)])?;
        }
        Ok(())
    }
}

impl Deal {
    /// PBN-compatible display from a seat's perspective, e.g. `N:… … … …`
    #[must_use]
    pub fn display(self, seat: Seat) -> impl fmt::Display {
        DealDisplay { deal: self, seat }
    }
}

/// Four hands in North, East, South, West order without a seat prefix
impl fmt::Display for Deal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, seat) in Seat::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", self[seat])?;
        }
        Ok(())
    }
}

/// Parse a PBN deal, four hands clockwise from an optional seat prefix
///
/// Without a prefix the first hand is North's.
impl FromStr for Deal {
    type Err = ParseHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut deal = Self::default();
        let mut seat = Seat::North;

        for i in 0..4 {
            let mut token = tokens.next().ok_or(ParseHandError::NotFourHands)?;
            if i == 0 {
                if let Some((prefix, hand)) = token.split_once(':') {
                    let mut chars = prefix.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(ParseHandError::BadSeat(':'));
                    };
                    seat = Seat::from_char(c).ok_or(ParseHandError::BadSeat(c))?;
                    token = hand;
                }
            }
            deal[seat] = token.parse()?;
            seat += Wrapping(1);
        }

        match tokens.next() {
            Some(_) => Err(ParseHandError::NotFourHands),
            None => Ok(deal),
        }
    }
}
