
use crate::contract::Strain;
use crate::deal::{Card, Deal, Hand, Seat, SeatFlags, SmallSet as _, Suit};
use crate::play::{Game, Trick, Voids};
use crate::solver::{Solver, SolverError};
use core::num::Wrapping;
use core::ops::{Index, IndexMut};
use rand::prelude::SliceRandom as _;
use std::collections::VecDeque;

/// Inclusive bounds on a tallied quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Smallest accepted value
    pub min: u8,
    /// Largest accepted value
    pub max: u8,
}

impl Range {
    /// Create a range from inclusive bounds
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Whether the value lies within the bounds
    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Bounds a single seat's full 13-card hand must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandConstraint {
    /// Bounds on summed high-card points
    pub hcp: Range,
    lengths: [Range; 4],
}

impl Default for HandConstraint {
    fn default() -> Self {
        Self {
            hcp: Range::new(0, 37),
            lengths: [Range::new(0, 13); 4],
        }
    }
}

impl Index<Suit> for HandConstraint {
    type Output = Range;

    fn index(&self, suit: Suit) -> &Range {
        &self.lengths[suit as usize]
    }
}

impl IndexMut<Suit> for HandConstraint {
    fn index_mut(&mut self, suit: Suit) -> &mut Range {
        &mut self.lengths[suit as usize]
    }
}

impl HandConstraint {
    fn accepts(&self, hand: Hand) -> bool {
        // Suit lengths are at most 13, which fits in `u8`
        #[allow(clippy::cast_possible_truncation)]
        let length = |suit: Suit| hand[suit].len() as u8;
        self.hcp.contains(hand.hcp())
            && Suit::ASC
                .into_iter()
                .all(|suit| self[suit].contains(length(suit)))
    }
}

/// Per-seat sampling constraints with edit tracking
///
/// Only seats whose constraints have been edited take part in filtering;
/// the rest accept any hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    seats: [HandConstraint; 4],
    edited: SeatFlags,
}

impl Index<Seat> for Constraints {
    type Output = HandConstraint;

    fn index(&self, seat: Seat) -> &HandConstraint {
        &self.seats[seat as usize]
    }
}

impl Constraints {
    /// Bound the seat's high-card points and mark the seat edited
    pub fn set_hcp(&mut self, seat: Seat, hcp: Range) {
        self.seats[seat as usize].hcp = hcp;
        self.edited |= seat.into();
    }

    /// Bound the seat's length in a suit and mark the seat edited
    pub fn set_length(&mut self, seat: Seat, suit: Suit, length: Range) {
        self.seats[seat as usize][suit] = length;
        self.edited |= seat.into();
    }

    /// Whether any of the seat's bounds has been edited
    #[must_use]
    pub fn is_edited(&self, seat: Seat) -> bool {
        self.edited.contains(seat.into())
    }

    /// Whether every edited seat's bounds accept its hand in the deal
    #[must_use]
    pub fn accepts(&self, deal: &Deal) -> bool {
        Seat::ALL
            .into_iter()
            .all(|seat| !self.is_edited(seat) || self[seat].accepts(deal[seat]))
    }
}

/// A Monte Carlo deal source bound to one position of a [`Game`]
///
/// The sampler completes the game's partial deal into full 52-card deals
/// consistent with everything the game knows: assigned cards stay where they
/// are, hidden cards go only to seats not proved void in their suit, and each
/// seat ends up with 13.  Accepted deals are scored through the double-dummy
/// solver, one trick count per legal move.
///
/// Samplers are independent values; clone one per worker to draw deals in
/// parallel.
#[derive(Debug, Clone)]
pub struct Sampler {
    assigned: [Hand; 4],
    played: [Hand; 4],
    needed: [u8; 4],
    pool: Vec<Card>,
    voids: Voids,
    trick: Trick,
    strain: Strain,
    constraints: Constraints,
    moves: Vec<Card>,
}

impl Sampler {
    /// Bind a sampler to the game's present state
    ///
    /// The current trick is unplayed into the seats' hands first: the solver
    /// wants full hands as of the trick's start and replays the trick through
    /// its own protocol.
    pub(crate) fn new(game: &Game) -> Self {
        let mut hands = Seat::ALL.map(|seat| game.hand(seat));
        let mut plays = Seat::ALL.map(|seat| game.played(seat));

        let trick = game.trick();
        let mut seat = trick.leader();
        for card in trick.cards() {
            hands[seat as usize].insert(card);
            plays[seat as usize].remove(card);
            seat += Wrapping(1);
        }

        let assigned: [Hand; 4] = core::array::from_fn(|i| hands[i] | plays[i]);
        // A seat's assigned cards never exceed 13
        #[allow(clippy::cast_possible_truncation)]
        let needed = assigned.map(|hand: Hand| 13 - hand.len() as u8);

        Self {
            assigned,
            played: plays,
            needed,
            pool: game.hidden().iter().collect(),
            voids: game.voids(),
            trick,
            strain: game.contract().strain,
            constraints: *game.constraints(),
            moves: game.moves(),
        }
    }

    /// The legal moves the sampler scores, fixed at binding time
    #[must_use]
    pub fn moves(&self) -> &[Card] {
        &self.moves
    }

    /// Draw one deal consistent with the bound state
    ///
    /// The hidden pool is shuffled and dealt seat by seat; a card whose suit
    /// the seat is void in goes to the back of the queue.  When every card
    /// left in the queue is blocked for the seat being filled, the draw is
    /// abandoned and `None` is returned; the caller simply retries.  The draw
    /// is biased, not uniform over consistent deals.
    pub fn generate(&self, rng: &mut (impl rand::Rng + ?Sized)) -> Option<Deal> {
        let mut pool: VecDeque<Card> = {
            let mut cards = self.pool.clone();
            cards.shuffle(rng);
            cards.into()
        };
        let mut deal = Deal(self.assigned);

        for seat in Seat::ALL {
            let mut needed = self.needed[seat as usize];
            let mut skipped = 0;
            while needed > 0 {
                let Some(card) = pool.pop_front() else {
                    return None;
                };
                if self.voids.contains(seat, card.suit()) {
                    pool.push_back(card);
                    skipped += 1;
                    if skipped == pool.len() {
                        tracing::trace!(
                            seat = %char::from(seat),
                            pool = pool.len(),
                            "deal abandoned: voids block every card left in the pool"
                        );
                        return None;
                    }
                } else {
                    deal[seat].insert(card);
                    needed -= 1;
                    skipped = 0;
                }
            }
        }
        Some(deal)
    }

    /// Whether the deal passes every edited seat constraint
    #[must_use]
    pub fn filter(&self, deal: &Deal) -> bool {
        self.constraints.accepts(deal)
    }

    /// Score the legal moves of a sampled deal through the solver
    ///
    /// Cards played to completed tricks are stripped from the deal, the
    /// current trick is replayed, and each legal move is paired with the
    /// number of tricks the side to play can then take.  A bound move held
    /// by another seat in this particular sample has no score and is left
    /// out of the result.
    ///
    /// # Errors
    /// A [`SolverError`] propagated from the double-dummy solver
    pub fn solve(&self, deal: &Deal) -> Result<Vec<(Card, u8)>, SolverError> {
        let mut remain = *deal;
        for seat in Seat::ALL {
            remain[seat] = remain[seat] - self.played[seat as usize];
        }

        let mut solver = Solver::new(remain, self.strain, self.trick.leader());
        for card in self.trick.cards() {
            solver.replay(card)?;
        }
        let scores = solver.solve()?;
        tracing::debug!(
            moves = self.moves.len(),
            scored = scores.len(),
            "scored a sampled deal"
        );

        Ok(self
            .moves
            .iter()
            .filter_map(|&wanted| {
                scores
                    .iter()
                    .find(|&&(card, _)| card == wanted)
                    .map(|&(_, tricks)| (wanted, tricks))
            })
            .collect())
    }
}
