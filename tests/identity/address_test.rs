// Account address tests

use ticketbooth::identity::{Address, AddressError, Keypair};

// ============================================================================
// DERIVATION TESTS
// ============================================================================

#[test]
fn test_derivation_is_deterministic() {
    let kp = Keypair::generate();

    let a = Address::from_public_key(&kp.public_key());
    let b = Address::from_public_key(&kp.public_key());

    assert_eq!(a, b);
}

#[test]
fn test_different_keys_give_different_addresses() {
    let a = Address::from_public_key(&Keypair::generate().public_key());
    let b = Address::from_public_key(&Keypair::generate().public_key());

    assert_ne!(a, b);
}

// ============================================================================
// FORMAT TESTS
// ============================================================================

#[test]
fn test_display_format() {
    let addr = Address::from_public_key(&Keypair::generate().public_key());
    let s = addr.to_string();

    assert!(s.starts_with("0x"));
    assert_eq!(s.len(), 42); // "0x" + 40 hex chars
}

#[test]
fn test_parse_roundtrip() {
    let addr = Address::from_public_key(&Keypair::generate().public_key());
    let parsed = Address::parse(&addr.to_string()).unwrap();

    assert_eq!(addr, parsed);
}

#[test]
fn test_parse_zero_address() {
    let parsed = Address::parse(&Address::ZERO.to_string()).unwrap();
    assert!(parsed.is_zero());
}

#[test]
fn test_parse_rejects_empty() {
    assert!(matches!(
        Address::parse(""),
        Err(AddressError::InvalidFormat(_))
    ));
}

#[test]
fn test_parse_rejects_bad_hex() {
    let err = Address::parse(&format!("0x{}", "zz".repeat(20))).unwrap_err();
    assert!(matches!(err, AddressError::InvalidHex(_)));
}

#[test]
fn test_parse_rejects_wrong_length() {
    let err = Address::parse(&format!("0x{}", "ab".repeat(21))).unwrap_err();
    assert!(matches!(
        err,
        AddressError::InvalidLength {
            expected: 20,
            got: 21
        }
    ));
}
