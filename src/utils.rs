use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

const BYTES_IN_GIGABYTE: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Renders a byte count in gigabytes with two decimals, e.g. `1.50 GB`.
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_IN_GIGABYTE)
}

/// Pads every label to the width of the longest one.
pub fn justify_labels<L: AsRef<str>>(labels: &[L]) -> Vec<String> {
    let width = labels
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    labels
        .iter()
        .map(|l| format!("{:<width$}", l.as_ref(), width = width))
        .collect()
}
