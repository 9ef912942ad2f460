use num_bigint::BigUint;
use sha1::{Digest, Sha1};

/// Number of leading decimal digits kept from the re-encoded digest.
const KEY_DIGITS: usize = 8;

/// Derive a stable integer key from a fixture name.
///
/// The name is SHA-1 hashed, the hex digest is re-read as a single base-16
/// number and re-encoded in base 10, and the first eight decimal digits
/// become the key. The same name always derives the same key, so related
/// fixtures can reference each other by name instead of relying on
/// auto-incremented ids. Collisions are possible and accepted.
pub fn derive(value: &str) -> i64 {
    let digest = Sha1::digest(value.as_bytes());
    let decimal = BigUint::parse_bytes(hex::encode(digest).as_bytes(), 16)
        .expect("sha1 digest is valid hexadecimal")
        .to_string();
    let digits = &decimal[..decimal.len().min(KEY_DIGITS)];
    digits.parse().expect("leading decimal digits fit in i64")
}
