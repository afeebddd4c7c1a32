
use crate::contract::{Contract, Strain};
use crate::deal::{Card, Deal, Hand, Holding, Seat, SmallSet as _, Suit};
use crate::sample::{Constraints, Sampler};
use core::num::Wrapping;

/// One round of up to four plays, one per seat in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trick {
    leader: Seat,
    cards: [Option<Card>; 4],
}

impl Trick {
    /// An empty trick to be led by `leader`
    #[must_use]
    pub const fn new(leader: Seat) -> Self {
        Self {
            leader,
            cards: [None; 4],
        }
    }

    /// The seat that led (or is to lead) this trick
    #[must_use]
    pub const fn leader(self) -> Seat {
        self.leader
    }

    /// The number of cards played to this trick so far
    #[must_use]
    pub fn len(self) -> usize {
        self.cards.iter().flatten().count()
    }

    /// Whether no card has been played to this trick
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.cards[0].is_none()
    }

    /// The cards played to this trick in play order
    pub fn cards(self) -> impl Iterator<Item = Card> {
        self.cards.into_iter().flatten()
    }

    /// The suit of the first card, once one has been played
    #[must_use]
    pub fn led_suit(self) -> Option<Suit> {
        self.cards[0].map(Card::suit)
    }

    /// The seat that wins the completed trick, or `None` mid-trick
    ///
    /// A trump card beats any card of a plain suit; a card of the led suit
    /// beats any other plain-suit card; within the deciding class the higher
    /// rank wins.
    #[must_use]
    pub fn winner(self, trump: Strain) -> Option<Seat> {
        let led = self.led_suit()?;
        if self.len() < 4 {
            return None;
        }
        let trump = Suit::try_from(trump).ok();
        let (winner, _) = self.cards().enumerate().max_by_key(|&(_, card)| {
            let class = if Some(card.suit()) == trump {
                2
            } else if card.suit() == led {
                1
            } else {
                0
            };
            (class, card.rank())
        })?;
        // Positions are in 0..4, which fits in `u8`
        #[allow(clippy::cast_possible_truncation)]
        let winner = winner as u8;
        Some(self.leader + Wrapping(winner))
    }

    fn push(&mut self, card: Card) {
        let count = self.len();
        debug_assert!(count < 4);
        self.cards[count & 3] = Some(card);
    }
}

/// Per-seat, per-suit proof of emptiness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Voids(u16);

impl Voids {
    /// Whether the seat is proved void in the suit
    #[must_use]
    pub const fn contains(self, seat: Seat, suit: Suit) -> bool {
        self.0 & 1 << (4 * seat as u8 + suit as u8) != 0
    }

    /// Record that the seat is void in the suit
    pub fn mark(&mut self, seat: Seat, suit: Suit) {
        self.0 |= 1 << (4 * seat as u8 + suit as u8);
    }

    /// As a bitset of (seat, suit) pairs
    #[must_use]
    pub const fn to_bits(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    hands: Deal,
    plays: Deal,
    lefts: [u8; 4],
    hidden: Hand,
    voids: Voids,
    trick: Trick,
    leader: Seat,
    ns_tricks: u8,
    ew_tricks: u8,
}

/// The state of a deal in play, with some hands possibly unknown
///
/// The state splits the 52 cards into what is known to be held
/// ([`Game::hand`]), what has been played ([`Game::played`]), and a shared
/// pool of hidden cards whose owners are not yet determined
/// ([`Game::hidden`]).  Seats proved void in a suit by failing to follow are
/// tracked in [`Game::voids`], and a revealed void can force hidden cards
/// into the last seat able to hold them.
///
/// Mutating operations snapshot the whole state, so any play can be undone
/// and redone exactly.
#[derive(Debug, Clone)]
pub struct Game {
    hands: Deal,
    plays: Deal,
    lefts: [u8; 4],
    hidden: Hand,
    voids: Voids,
    trick: Trick,
    leader: Seat,
    contract: Contract,
    constraints: Constraints,
    ns_tricks: u8,
    ew_tricks: u8,
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl Game {
    /// Start a game from known hands, an opening leader, and a contract
    ///
    /// Unknown hands are passed as empty; their 13 cards come from the
    /// hidden pool.  Each hand must hold at most 13 cards.
    #[must_use]
    pub fn new(hands: Deal, leader: Seat, contract: Contract) -> Self {
        let known = hands.0.iter().copied().fold(Hand::EMPTY, |acc, h| acc | h);
        // Hand lengths are at most 13, which fits in `u8`
        #[allow(clippy::cast_possible_truncation)]
        let lefts = hands.0.map(|hand| 13 - hand.len() as u8);
        Self {
            hands,
            plays: Deal::default(),
            lefts,
            hidden: !known,
            voids: Voids::default(),
            trick: Trick::new(leader),
            leader,
            contract,
            constraints: Constraints::default(),
            ns_tricks: 0,
            ew_tricks: 0,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// The seat to play next
    #[must_use]
    pub const fn leader(&self) -> Seat {
        self.leader
    }

    /// The declared contract
    #[must_use]
    pub const fn contract(&self) -> Contract {
        self.contract
    }

    /// The trick currently being played
    #[must_use]
    pub const fn trick(&self) -> Trick {
        self.trick
    }

    /// The cards known to be held by the seat
    #[must_use]
    pub fn hand(&self, seat: Seat) -> Hand {
        self.hands[seat]
    }

    /// The cards the seat has played over the whole game
    #[must_use]
    pub fn played(&self, seat: Seat) -> Hand {
        self.plays[seat]
    }

    /// The pool of unplayed cards whose owners are not yet known
    #[must_use]
    pub const fn hidden(&self) -> Hand {
        self.hidden
    }

    /// The number of hidden cards still belonging to the seat
    #[must_use]
    pub fn unknown(&self, seat: Seat) -> u8 {
        self.lefts[seat as usize]
    }

    /// The void matrix accumulated from failures to follow suit
    #[must_use]
    pub const fn voids(&self) -> Voids {
        self.voids
    }

    /// Tricks won by North-South so far
    #[must_use]
    pub const fn ns_tricks(&self) -> u8 {
        self.ns_tricks
    }

    /// Tricks won by East-West so far
    #[must_use]
    pub const fn ew_tricks(&self) -> u8 {
        self.ew_tricks
    }

    /// Whether all 13 tricks have been played
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ns_tricks + self.ew_tricks == 13
    }

    /// The per-seat sampling constraints
    #[must_use]
    pub const fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Edit the per-seat sampling constraints
    pub fn constraints_mut(&mut self) -> &mut Constraints {
        &mut self.constraints
    }

    /// A sampler bound to the present state
    #[must_use]
    pub fn sampling(&self) -> Sampler {
        Sampler::new(self)
    }

    fn unplayed(&self) -> Hand {
        !self.plays.0.iter().copied().fold(Hand::EMPTY, |acc, h| acc | h)
    }

    /// Whether the seat to play may legally play `card`
    ///
    /// The card must be held by the seat or drawable from the hidden pool,
    /// must not have been played, must follow the led suit whenever the
    /// seat's *known* hand can, and must not sit in a suit the seat is
    /// proved void in.  A seat whose known hand is out of the led suit may
    /// discard even though its hidden allocation could still contain that
    /// suit.
    #[must_use]
    pub fn is_legal(&self, card: Card) -> bool {
        let seat = self.leader;
        let hand = self.hands[seat];
        if !hand.contains(card) && !(self.hidden.contains(card) && self.lefts[seat as usize] > 0)
        {
            return false;
        }
        if !self.unplayed().contains(card) {
            return false;
        }
        if let Some(led) = self.trick.led_suit() {
            if !hand[led].is_empty() && card.suit() != led {
                return false;
            }
        }
        !self.voids.contains(seat, card.suit())
    }

    /// Every card the seat to play may legally play, in no promised order
    #[must_use]
    pub fn moves(&self) -> Vec<Card> {
        let seat = self.leader;
        let unplayed = self.unplayed();
        let hand = self.hands[seat];
        let mut available = hand & unplayed;
        if self.lefts[seat as usize] > 0 {
            available = available | (self.hidden & unplayed);
        }
        if let Some(led) = self.trick.led_suit() {
            if !hand[led].is_empty() {
                available = available.only(led);
            }
        }
        available
            .iter()
            .filter(|&card| !self.voids.contains(seat, card.suit()))
            .collect()
    }

    /// Play a card for the seat to play
    ///
    /// With `check` set, an illegal card is rejected and the state is left
    /// untouched.  With `check` unset the caller guarantees legality; a
    /// violating card trips a debug assertion and corrupts the state in
    /// release builds.
    ///
    /// A play that fails to follow suit marks the seat void in the led suit,
    /// and hidden cards of that suit are forced into the one remaining seat
    /// able to hold them, if such a seat is unique.
    pub fn play(&mut self, card: Card, check: bool) -> bool {
        if check && !self.is_legal(card) {
            return false;
        }
        let seat = self.leader;
        let led = self.trick.led_suit().unwrap_or(card.suit());

        self.undo.push(self.snapshot());
        self.redo.clear();

        if card.suit() != led {
            self.voids.mark(seat, led);
            self.assign_stranded(seat, led);
        }

        if !self.hands[seat].remove(card) {
            debug_assert!(self.hidden.contains(card) && self.lefts[seat as usize] > 0);
            self.hidden.remove(card);
            self.lefts[seat as usize] -= 1;
        }

        self.trick.push(card);
        self.plays[seat].insert(card);

        if self.trick.len() == 4 {
            self.resolve();
        } else {
            self.leader += Wrapping(1);
        }
        true
    }

    /// Rewind the last play; `false` when there is nothing to rewind
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo.push(current);
        self.restore(snapshot);
        true
    }

    /// Replay the last undone play; `false` when there is nothing to replay
    ///
    /// The redo stack is cleared by any call to [`Game::play`].
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo.push(current);
        self.restore(snapshot);
        true
    }

    /// Hidden cards of `suit` cannot belong to `seat` once it shows out.
    /// When exactly one other seat still has unknown cards, they are all
    /// forced into its hand.
    fn assign_stranded(&mut self, seat: Seat, suit: Suit) {
        let stranded = self.hidden[suit];
        if stranded.is_empty() {
            return;
        }
        let mut others = Seat::ALL
            .into_iter()
            .filter(|&s| s != seat && self.lefts[s as usize] > 0);
        let (Some(target), None) = (others.next(), others.next()) else {
            return;
        };
        self.hands[target][suit] = self.hands[target][suit] | stranded;
        // Stranded cards number at most 13, which fits in `u8`
        #[allow(clippy::cast_possible_truncation)]
        {
            self.lefts[target as usize] -= stranded.len() as u8;
        }
        self.hidden[suit] = Holding::EMPTY;
    }

    fn resolve(&mut self) {
        if let Some(winner) = self.trick.winner(self.contract.strain) {
            if winner.is_ns() {
                self.ns_tricks += 1;
            } else {
                self.ew_tricks += 1;
            }
            self.trick = Trick::new(winner);
            self.leader = winner;
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            hands: self.hands,
            plays: self.plays,
            lefts: self.lefts,
            hidden: self.hidden,
            voids: self.voids,
            trick: self.trick,
            leader: self.leader,
            ns_tricks: self.ns_tricks,
            ew_tricks: self.ew_tricks,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.hands = snapshot.hands;
        self.plays = snapshot.plays;
        self.lefts = snapshot.lefts;
        self.hidden = snapshot.hidden;
        self.voids = snapshot.voids;
        self.trick = snapshot.trick;
        self.leader = snapshot.leader;
        self.ns_tricks = snapshot.ns_tricks;
        self.ew_tricks = snapshot.ew_tricks;
    }
}
