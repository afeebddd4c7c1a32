use super::*;

#[test]
fn test_strain_predicates() {
    for strain in Strain::ALL {
        assert_ne!(strain.is_suit(), strain.is_notrump());
    }
    assert!(Strain::Notrump.is_notrump());
    assert!(Strain::Spades.is_suit());
}

#[test]
fn test_parse_contract() {
    assert_eq!("3NT".parse(), Ok(Contract::new(3, Strain::Notrump)));
    assert_eq!("3N".parse(), Ok(Contract::new(3, Strain::Notrump)));
    assert_eq!("3nt".parse(), Ok(Contract::new(3, Strain::Notrump)));
    assert_eq!("4H".parse(), Ok(Contract::new(4, Strain::Hearts)));
    assert_eq!("1c".parse(), Ok(Contract::new(1, Strain::Clubs)));
    assert_eq!("7S".parse(), Ok(Contract::new(7, Strain::Spades)));
    assert_eq!("2D".parse(), Ok(Contract::new(2, Strain::Diamonds)));
    assert_eq!("".parse(), Ok(Contract::NONE));

    assert_eq!(
        "0N".parse::<Contract>(),
        Err(ParseContractError::BadLevel)
    );
    assert_eq!(
        "8C".parse::<Contract>(),
        Err(ParseContractError::BadLevel)
    );
    assert_eq!(
        "3X".parse::<Contract>(),
        Err(ParseContractError::BadStrain)
    );
    assert_eq!(
        "3NTX".parse::<Contract>(),
        Err(ParseContractError::BadStrain)
    );
    assert_eq!("3".parse::<Contract>(), Err(ParseContractError::BadStrain));
}

#[test]
fn test_contract_io() {
    assert_eq!(Contract::new(3, Strain::Notrump).to_string(), "3NT");
    assert_eq!(Contract::new(4, Strain::Hearts).to_string(), "4H");
    assert_eq!(Contract::NONE.to_string(), "-");

    for level in 1..8 {
        for strain in Strain::ALL {
            let contract = Contract::new(level, strain);
            assert_eq!(contract.to_string().parse(), Ok(contract));
        }
    }
}

#[test]
fn test_none_sentinel() {
    assert!(Contract::NONE.is_none());
    assert!(Contract::default().is_none());
    assert!(!Contract::new(1, Strain::Clubs).is_none());
    assert_eq!(Contract::NONE.level, 0);
    assert_eq!(Contract::NONE.strain, Strain::Notrump);
}
