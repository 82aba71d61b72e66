//! One-time credential generation
//!
//! New accounts never choose their own password; a random one is
//! generated here, emailed to the account holder, and only its bcrypt
//! hash is persisted.

use rand::seq::SliceRandom;
use rand::Rng;

const PASSWORD_LEN: usize = 14;

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*";

/// Generate a random temporary password.
///
/// Guarantees at least one character from each class so the result
/// passes common password policies. Visually ambiguous characters
/// (0/O, 1/l/I) are excluded.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    let all: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS].concat();

    let mut chars: Vec<u8> = vec![
        *LOWER.choose(&mut rng).unwrap_or(&b'a'),
        *UPPER.choose(&mut rng).unwrap_or(&b'A'),
        *DIGITS.choose(&mut rng).unwrap_or(&b'2'),
        *SYMBOLS.choose(&mut rng).unwrap_or(&b'!'),
    ];
    while chars.len() < PASSWORD_LEN {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    String::from_utf8(chars).unwrap_or_else(|_| "Temp-Pass-2345!".to_string())
}
