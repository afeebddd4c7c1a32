use super::*;

fn all_holdings() -> impl Iterator<Item = Holding> {
    (0..1 << 13).map(|i| Holding::from_bits(i << 2))
}

#[test]
fn test_from_bits_masks_invalid_ranks() {
    for bits in [0u16, 1, 2, 3, 0x8000, 0x8003, 0xFFFF] {
        assert_eq!(
            Holding::from_bits(bits).to_bits(),
            bits & Holding::ALL.to_bits()
        );
    }
}

#[test]
fn test_holding_ops() {
    let pairs = all_holdings().zip(all_holdings().map(|v| !v));
    pairs.for_each(|(u, v)| {
        assert_eq!((u & v).to_bits(), u.to_bits() & v.to_bits());
        assert_eq!((u | v).to_bits(), u.to_bits() | v.to_bits());
        assert_eq!((u ^ v).to_bits(), u.to_bits() ^ v.to_bits());
        assert_eq!((u - v).to_bits(), u.to_bits() & !v.to_bits());
        assert_eq!(!u, Holding::ALL - u);
        assert_eq!(!u, Holding::ALL ^ u);
    });
}

#[test]
fn test_hand_bits() {
    assert_eq!(Hand::from_bits(Hand::ALL.to_bits()), Hand::ALL);
    assert_eq!(Hand::from_bits(!0), Hand::ALL);
    assert_eq!(Hand::from_bits(0), Hand::EMPTY);

    let hand: Hand = "AT74.QJ9.32.AK64".parse().expect("hand");
    assert_eq!(Hand::from_bits(hand.to_bits()), hand);
}

#[test]
fn test_iter_aqt() {
    const AQT: Holding = Holding::from_bits(0b10101 << 10);
    let mut iter = AQT.iter();
    assert_eq!(iter.next(), Some(10));
    assert_eq!(iter.next(), Some(12));
    assert_eq!(iter.next(), Some(14));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iter_spot_cards() {
    const XXX: Holding = Holding::from_bits(0b10101 << 2);
    const XX: Holding = Holding::from_bits(0b1001 << 5);
    const HAND: Hand = Hand([XXX, Holding::EMPTY, XX, Holding::EMPTY]);
    let mut iter = HAND.iter();
    assert_eq!(iter.next(), Some(Card::new(Suit::Clubs, 2)));
    assert_eq!(iter.next(), Some(Card::new(Suit::Clubs, 4)));
    assert_eq!(iter.next(), Some(Card::new(Suit::Clubs, 6)));
    assert_eq!(iter.next(), Some(Card::new(Suit::Hearts, 5)));
    assert_eq!(iter.next(), Some(Card::new(Suit::Hearts, 8)));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_seat_arithmetics() {
    const SEATS: [Seat; 4] = [Seat::East, Seat::South, Seat::West, Seat::North];

    (0..4).for_each(|x| {
        (0..4).for_each(|y| {
            assert_eq!(
                SEATS[usize::from(x)] + Wrapping(y),
                SEATS[usize::from(y)] + Wrapping(x)
            );
            assert_eq!(
                SEATS[usize::from(x)] + Wrapping(y),
                SEATS[usize::from((x + y) & 3)]
            );
        });
    });
}

#[test]
fn test_suit_strain_conversions() {
    for suit in Suit::ASC {
        assert_eq!(Suit::try_from(Strain::from(suit)), Ok(suit));
    }
    assert_eq!(Suit::try_from(Strain::Notrump), Err(SuitFromNotrumpError));
}

#[test]
fn test_seat_sides() {
    assert!(Seat::North.is_ns());
    assert!(Seat::South.is_ns());
    assert!(!Seat::East.is_ns());
    assert!(!Seat::West.is_ns());
}

#[test]
fn test_card_strings() {
    let ace: Card = "AS".parse().expect("spade ace");
    assert_eq!(ace, Card::new(Suit::Spades, 14));
    assert_eq!(ace.to_string(), "AS");

    let ten: Card = "td".parse().expect("diamond ten");
    assert_eq!(ten, Card::new(Suit::Diamonds, 10));
    assert_eq!(ten.to_string(), "TD");

    assert!(matches!("A".parse::<Card>(), Err(ParseCardError::Length)));
    assert!(matches!("ASS".parse::<Card>(), Err(ParseCardError::Length)));
    assert!(matches!(
        "1S".parse::<Card>(),
        Err(ParseCardError::BadRank('1'))
    ));
    assert!(matches!(
        "AX".parse::<Card>(),
        Err(ParseCardError::BadSuit('X'))
    ));
}

#[test]
fn test_card_io() {
    for suit in Suit::ASC {
        for rank in 2..15 {
            let card = Card::new(suit, rank);
            let parsed = card.to_string().parse::<Card>().expect("round trip");
            assert_eq!(card, parsed);
        }
    }
}

#[test]
fn test_hcp() {
    assert_eq!(Card::new(Suit::Spades, 14).hcp(), 4);
    assert_eq!(Card::new(Suit::Hearts, 13).hcp(), 3);
    assert_eq!(Card::new(Suit::Diamonds, 12).hcp(), 2);
    assert_eq!(Card::new(Suit::Clubs, 11).hcp(), 1);
    assert_eq!(Card::new(Suit::Spades, 10).hcp(), 0);
    assert_eq!(Card::new(Suit::Clubs, 2).hcp(), 0);

    let hand: Hand = "AT74.QJ9.32.AK64".parse().expect("hand");
    assert_eq!(hand.hcp(), 4 + 2 + 1 + 4 + 3);
    assert_eq!(Hand::ALL.hcp(), 40);
    assert_eq!(Hand::EMPTY.hcp(), 0);
}

#[test]
fn test_only() {
    let hand: Hand = "AT74.QJ9.32.AK64".parse().expect("hand");
    let spades = hand.only(Suit::Spades);
    assert_eq!(spades[Suit::Spades], hand[Suit::Spades]);
    assert_eq!(spades.len(), 4);
    assert_eq!(spades & hand, spades);
}

#[test]
fn test_holding_parser() {
    type Err = ParseHandError;
    const AQT: Holding = Holding::from_bits(0b10101 << 10);

    assert!(matches!(
        "AKQJT98765432".parse::<Holding>(),
        Ok(Holding::ALL)
    ));
    assert!(matches!("AQT".parse::<Holding>(), Ok(AQT)));
    assert!(matches!("TQA".parse::<Holding>(), Ok(AQT)));
    assert!(matches!("".parse::<Holding>(), Ok(Holding::EMPTY)));
    assert!(matches!("KxJ".parse::<Holding>(), Err(Err::BadRank('x'))));
    assert!(matches!("KJJ".parse::<Holding>(), Err(Err::RepeatedRank)));
}

#[test]
fn test_holding_io() -> Result<(), ParseHandError> {
    (0..1 << 13).try_for_each(|bits| {
        let binary = Holding::from_bits(bits << 2);
        let parsed: Holding = binary.to_string().parse()?;
        assert_eq!(binary, parsed);
        Ok(())
    })
}

#[test]
fn test_hand_parser() -> Result<(), ParseHandError> {
    assert!(matches!("-".parse::<Hand>(), Ok(Hand::EMPTY)));
    assert!(matches!("...".parse::<Hand>(), Ok(Hand::EMPTY)));

    assert!(matches!(
        "".parse::<Hand>(),
        Err(ParseHandError::NotFourSuits)
    ));
    assert!(matches!(
        "..".parse::<Hand>(),
        Err(ParseHandError::NotFourSuits)
    ));
    assert!(matches!(
        "....".parse::<Hand>(),
        Err(ParseHandError::NotFourSuits)
    ));

    assert_eq!(
        "AT74.QJ9.32.AK64".parse::<Hand>(),
        Ok(Hand([
            "AK64".parse()?,
            "32".parse()?,
            "QJ9".parse()?,
            "AT74".parse()?,
        ]))
    );

    Ok(())
}

#[test]
fn test_deal_parser() -> Result<(), ParseHandError> {
    let west: Hand = "KQT2.AT.J6542.85".parse()?;
    let east: Hand = "A8654.KQ5.T.QJT6".parse()?;

    assert_eq!(
        "W:KQT2.AT.J6542.85 - A8654.KQ5.T.QJT6 -".parse::<Deal>()?,
        Deal([Hand::EMPTY, east, Hand::EMPTY, west]),
    );

    assert_eq!(
        "N:.63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85".parse::<Deal>()?,
        "E:A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85 .63.AKQ987.A9732".parse::<Deal>()?,
    );

    // Without a prefix the first hand is North's
    assert_eq!(
        "KQT2.AT.J6542.85 ... ... ...".parse::<Deal>()?,
        Deal([west, Hand::EMPTY, Hand::EMPTY, Hand::EMPTY]),
    );

    assert!(matches!(
        "... ... ...".parse::<Deal>(),
        Err(ParseHandError::NotFourHands)
    ));
    assert!(matches!(
        "... ... ... ... ...".parse::<Deal>(),
        Err(ParseHandError::NotFourHands)
    ));
    assert!(matches!(
        "X:... ... ... ...".parse::<Deal>(),
        Err(ParseHandError::BadSeat('X'))
    ));

    Ok(())
}

#[test]
fn test_deal_io() -> Result<(), ParseHandError> {
    let deal: Deal =
        "N:.63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85".parse()?;

    for seat in Seat::ALL {
        let rotated: Deal = deal.display(seat).to_string().parse()?;
        assert_eq!(deal, rotated);
    }

    assert_eq!(deal.to_string().parse::<Deal>()?, deal);
    Ok(())
}
