use super::*;

fn four_suits() -> Deal {
    "AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432"
        .parse()
        .expect("deal string")
}

#[test]
fn test_running_suit_takes_all() {
    let solver = Solver::new(four_suits(), Strain::Notrump, Seat::North);
    let plays = solver.solve().expect("solvable board");

    // North's thirteen spades are one equivalence class, all worth 13 tricks
    assert_eq!(plays.len(), 13);
    for &(card, tricks) in &plays {
        assert_eq!(card.suit(), Suit::Spades);
        assert_eq!(tricks, 13);
    }
}

#[test]
fn test_replay_hands_the_lead_over() {
    let mut solver = Solver::new(four_suits(), Strain::Notrump, Seat::North);
    solver
        .replay(Card::new(Suit::Spades, 14))
        .expect("empty trick");
    let plays = solver.solve().expect("solvable board");

    // East is on play with thirteen hearts and no tricks to come
    assert_eq!(plays.len(), 13);
    for &(card, tricks) in &plays {
        assert_eq!(card.suit(), Suit::Hearts);
        assert_eq!(tricks, 0);
    }
}

#[test]
fn test_replay_overflow() {
    let mut solver = Solver::new(four_suits(), Strain::Notrump, Seat::North);
    for rank in [14, 14, 14] {
        let card = Card::new(Suit::Spades, rank);
        assert_eq!(solver.replay(card), Ok(()));
    }
    assert_eq!(
        solver.replay(Card::new(Suit::Spades, 14)),
        Err(SolverError::CardCount)
    );
}

#[test]
fn test_duplicate_cards_rejected() {
    let deal: Deal = "AKQJT98765432... AKQJT98765432... ..AKQJT98765432. ...AKQJT98765432"
        .parse()
        .expect("deal string");
    let solver = Solver::new(deal, Strain::Notrump, Seat::North);
    assert!(solver.solve().is_err());
}
