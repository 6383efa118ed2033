//! Book identifier generation.

use rand::rngs::OsRng;
use rand::RngCore;

/// Length of generated identifiers
pub const ID_LENGTH: usize = 8;

/// URL-safe alphabet. 64 symbols, so masking a random byte with 63 is unbiased.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a random identifier of [`ID_LENGTH`] characters
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| ALPHABET[(b & 63) as usize] as char)
        .collect()
}

/// Generate an identifier for which `taken` returns false
pub fn generate_unique_id(mut taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let id = generate_id();
        if !taken(&id) {
            return id;
        }
    }
}
