use tunesync::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_value() {
    // RFC 7636 appendix B
    assert_eq!(
        generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_format_gigabytes() {
    assert_eq!(format_gigabytes(0), "0.00 GB");
    assert_eq!(format_gigabytes(1024 * 1024 * 1024), "1.00 GB");
    assert_eq!(format_gigabytes(3 * 512 * 1024 * 1024), "1.50 GB");
}

#[test]
fn test_justify_labels() {
    let labels = justify_labels(&["Rock", "Hip-Hop", "Jazz"]);

    assert_eq!(labels, vec!["Rock   ", "Hip-Hop", "Jazz   "]);

    // width counts characters, not bytes
    let labels = justify_labels(&["Électro", "Pop"]);
    assert_eq!(labels, vec!["Électro", "Pop    "]);

    let empty: Vec<String> = justify_labels::<&str>(&[]);
    assert!(empty.is_empty());
}
