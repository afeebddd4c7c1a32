#[cfg(test)]
mod test;

use crate::contract::Strain;
use crate::deal::{Card, Deal, Holding, Seat, SmallSet as _, Suit};
use core::ffi::{c_char, c_int};
use dds_bridge_sys as sys;
use thiserror::Error;

static THREAD_POOL: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Errors that can occur in the solver
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SolverError {
    /// A general or unknown error
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_UNKNOWN_FAULT) })]
    UnknownFault = sys::RETURN_UNKNOWN_FAULT,

    /// Zero cards
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_ZERO_CARDS) })]
    ZeroCards = sys::RETURN_ZERO_CARDS,

    /// Target exceeds number of tricks
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_TARGET_TOO_HIGH) })]
    TargetTooHigh = sys::RETURN_TARGET_TOO_HIGH,

    /// Duplicate cards
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_DUPLICATE_CARDS) })]
    DuplicateCards = sys::RETURN_DUPLICATE_CARDS,

    /// Target tricks < 0
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_TARGET_WRONG_LO) })]
    NegativeTarget = sys::RETURN_TARGET_WRONG_LO,

    /// Target tricks > 13
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_TARGET_WRONG_HI) })]
    InvalidTarget = sys::RETURN_TARGET_WRONG_HI,

    /// Solving parameter < 1
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_SOLNS_WRONG_LO) })]
    LowSolvingParameter = sys::RETURN_SOLNS_WRONG_LO,

    /// Solving parameter > 3
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_SOLNS_WRONG_HI) })]
    HighSolvingParameter = sys::RETURN_SOLNS_WRONG_HI,

    /// Too many cards
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_TOO_MANY_CARDS) })]
    TooManyCards = sys::RETURN_TOO_MANY_CARDS,

    /// Wrong current suit or rank
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_SUIT_OR_RANK) })]
    CurrentSuitOrRank = sys::RETURN_SUIT_OR_RANK,

    /// Wrong played card
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_PLAYED_CARD) })]
    PlayedCard = sys::RETURN_PLAYED_CARD,

    /// Wrong card count
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_CARD_COUNT) })]
    CardCount = sys::RETURN_CARD_COUNT,

    /// Wrong thread index
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_THREAD_INDEX) })]
    ThreadIndex = sys::RETURN_THREAD_INDEX,

    /// Mode parameter < 0
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_MODE_WRONG_LO) })]
    NegativeModeParameter = sys::RETURN_MODE_WRONG_LO,

    /// Mode parameter > 2
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_MODE_WRONG_HI) })]
    HighModeParameter = sys::RETURN_MODE_WRONG_HI,

    /// Wrong trump suit
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_TRUMP_WRONG) })]
    Trump = sys::RETURN_TRUMP_WRONG,

    /// Wrong "first"
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_FIRST_WRONG) })]
    First = sys::RETURN_FIRST_WRONG,

    /// Invalid PBN
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_PBN_FAULT) })]
    PBN = sys::RETURN_PBN_FAULT,

    /// Cannot create a new thread
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_THREAD_CREATE) })]
    ThreadCreate = sys::RETURN_THREAD_CREATE,

    /// Failed to wait for a thread
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_THREAD_WAIT) })]
    ThreadWait = sys::RETURN_THREAD_WAIT,

    /// Missing threading system
    #[error("{}", unsafe { core::str::from_utf8_unchecked(sys::TEXT_THREAD_MISSING) })]
    ThreadMissing = sys::RETURN_THREAD_MISSING,
}

impl SolverError {
    /// Propagate a status code to an error
    ///
    /// - `x`: Arbitrary data to return if `status` is non-negative (success)
    /// - `status`: The status code from a DDS function
    ///
    /// # Errors
    /// A [`SolverError`] specified by `status`
    pub const fn propagate<T: Copy>(x: T, status: i32) -> Result<T, Self> {
        match status {
            0.. => Ok(x),
            sys::RETURN_ZERO_CARDS => Err(Self::ZeroCards),
            sys::RETURN_TARGET_TOO_HIGH => Err(Self::TargetTooHigh),
            sys::RETURN_DUPLICATE_CARDS => Err(Self::DuplicateCards),
            sys::RETURN_TARGET_WRONG_LO => Err(Self::NegativeTarget),
            sys::RETURN_TARGET_WRONG_HI => Err(Self::InvalidTarget),
            sys::RETURN_SOLNS_WRONG_LO => Err(Self::LowSolvingParameter),
            sys::RETURN_SOLNS_WRONG_HI => Err(Self::HighSolvingParameter),
            sys::RETURN_TOO_MANY_CARDS => Err(Self::TooManyCards),
            sys::RETURN_SUIT_OR_RANK => Err(Self::CurrentSuitOrRank),
            sys::RETURN_PLAYED_CARD => Err(Self::PlayedCard),
            sys::RETURN_CARD_COUNT => Err(Self::CardCount),
            sys::RETURN_THREAD_INDEX => Err(Self::ThreadIndex),
            sys::RETURN_MODE_WRONG_LO => Err(Self::NegativeModeParameter),
            sys::RETURN_MODE_WRONG_HI => Err(Self::HighModeParameter),
            sys::RETURN_TRUMP_WRONG => Err(Self::Trump),
            sys::RETURN_FIRST_WRONG => Err(Self::First),
            sys::RETURN_PBN_FAULT => Err(Self::PBN),
            sys::RETURN_THREAD_CREATE => Err(Self::ThreadCreate),
            sys::RETURN_THREAD_WAIT => Err(Self::ThreadWait),
            sys::RETURN_THREAD_MISSING => Err(Self::ThreadMissing),
            _ => Err(Self::UnknownFault),
        }
    }
}

/// The native library numbers suits spades-first
const fn suit_to_dds(suit: Suit) -> c_int {
    3 - suit as c_int
}

const fn strain_to_dds(strain: Strain) -> c_int {
    match strain {
        Strain::Notrump => 4,
        _ => 3 - strain as c_int,
    }
}

const fn suit_from_dds(suit: c_int) -> Option<Suit> {
    match suit {
        0 => Some(Suit::Spades),
        1 => Some(Suit::Hearts),
        2 => Some(Suit::Diamonds),
        3 => Some(Suit::Clubs),
        _ => None,
    }
}

/// One double-dummy board held by the native solver
///
/// A board is built from the hands remaining at the start of the current
/// trick, a strain, and the seat on lead.  Cards already played to the
/// current trick are then fed in with [`Solver::replay`], and
/// [`Solver::solve`] scores every legal continuation.  The handle is a plain
/// value; dropping it releases nothing because the native library keeps no
/// per-board state.
pub struct Solver {
    board: sys::dealPBN,
}

impl Solver {
    /// Build a board from remaining hands, a strain, and the trick leader
    ///
    /// The hands are passed in PBN form.  Cards played to the current trick
    /// stay in their holders' hands; the native library removes them as the
    /// trick is replayed.
    #[must_use]
    pub fn new(deal: Deal, strain: Strain, leader: Seat) -> Self {
        let pbn = deal.display(Seat::North).to_string();
        let mut board = sys::dealPBN {
            trump: strain_to_dds(strain),
            first: leader as c_int,
            ..Default::default()
        };
        for (slot, byte) in board.remainCards.iter_mut().zip(pbn.bytes()) {
            *slot = byte as c_char;
        }
        Self { board }
    }

    /// Append one card to the current trick
    ///
    /// # Errors
    /// [`SolverError::CardCount`] when three cards have already been replayed
    pub fn replay(&mut self, card: Card) -> Result<(), SolverError> {
        let Some(slot) = self
            .board
            .currentTrickRank
            .iter()
            .position(|&rank| rank == 0)
        else {
            return Err(SolverError::CardCount);
        };
        self.board.currentTrickSuit[slot] = suit_to_dds(card.suit());
        self.board.currentTrickRank[slot] = c_int::from(card.rank());
        Ok(())
    }

    /// Score every card the seat to play can legally play
    ///
    /// Each playable card is paired with the number of tricks its side can
    /// take from here; groups of rank-equivalent cards are expanded into one
    /// entry per card.
    ///
    /// # Errors
    /// A [`SolverError`] propagated from the native library
    pub fn solve(&self) -> Result<Vec<(Card, u8)>, SolverError> {
        let mut result = sys::futureTricks::default();
        let status = {
            let _guard = THREAD_POOL.lock().map_err(|_| SolverError::ThreadWait)?;
            unsafe { sys::SolveBoardPBN(self.board, -1, 3, 0, &mut result, 0) }
        };
        SolverError::propagate((), status)?;
        tracing::trace!(cards = result.cards, nodes = result.nodes, "solved a board");

        let count = usize::try_from(result.cards).unwrap_or(0);
        let mut plays = Vec::with_capacity(count);
        for i in 0..count {
            let Some(suit) = suit_from_dds(result.suit[i]) else {
                continue;
            };
            let (Ok(rank), Ok(score)) = (
                u8::try_from(result.rank[i]),
                u8::try_from(result.score[i]),
            ) else {
                continue;
            };
            if !matches!(rank, 2..=14) {
                continue;
            }
            plays.push((Card::new(suit, rank), score));
            // Equal ranks arrive as a bitset alongside the representative
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            for equal in Holding::from_bits(result.equals[i] as u16).iter() {
                plays.push((Card::new(suit, equal), score));
            }
        }
        Ok(plays)
    }
}
