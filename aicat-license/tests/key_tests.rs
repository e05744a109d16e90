use aicat_license::{LicenseError, LicenseKey, MIN_KEY_LEN};

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn valid_key_parses() {
    let key = LicenseKey::parse("sk-test0123456789abcdef").unwrap();
    assert_eq!(key.as_str(), "sk-test0123456789abcdef");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let key = LicenseKey::parse("  sk-test0123456789abcdef\n").unwrap();
    assert_eq!(key.as_str(), "sk-test0123456789abcdef");
}

#[test]
fn empty_key_rejected() {
    assert!(matches!(
        LicenseKey::parse("   "),
        Err(LicenseError::InvalidKeyFormat(_))
    ));
}

#[test]
fn inner_whitespace_rejected() {
    assert!(LicenseKey::parse("sk-test 0123456789abcdef").is_err());
}

#[test]
fn short_key_rejected() {
    assert!(LicenseKey::parse("sk-short").is_err());
}

#[test]
fn minimum_length_boundary() {
    let exact = format!("sk-{}", "a".repeat(MIN_KEY_LEN - 3));
    assert!(LicenseKey::parse(&exact).is_ok());

    let below = format!("sk-{}", "a".repeat(MIN_KEY_LEN - 4));
    assert!(LicenseKey::parse(&below).is_err());
}

#[test]
fn wrong_prefix_rejected() {
    assert!(LicenseKey::parse("pk-test0123456789abcdef").is_err());
}

#[test]
fn from_str_round_trip() {
    let key: LicenseKey = "sk-test0123456789abcdef".parse().unwrap();
    assert_eq!(key.as_str(), "sk-test0123456789abcdef");
}

// ── Masking ──────────────────────────────────────────────────────

#[test]
fn masked_hides_middle() {
    let key = LicenseKey::parse("sk-test0123456789abcdef").unwrap();
    assert_eq!(key.masked(), "sk-te****cdef");
}

#[test]
fn display_uses_masked_form() {
    let key = LicenseKey::parse("sk-test0123456789abcdef").unwrap();
    let shown = format!("{key}");
    assert_eq!(shown, key.masked());
    assert!(!shown.contains("0123456789"));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn key_serializes_transparently() {
    let key = LicenseKey::parse("sk-test0123456789abcdef").unwrap();
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"sk-test0123456789abcdef\"");

    let parsed: LicenseKey = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, key);
}
