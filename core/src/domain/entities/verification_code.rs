//! Email verification code generation and comparison.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Number of distinct codes (000000..=999999)
const CODE_SPACE: u32 = 1_000_000;

/// Largest multiple of `CODE_SPACE` representable in 24 bits; draws at or
/// above it are rejected so every code is equally likely.
const REJECTION_BOUND: u32 = (1 << 24) / CODE_SPACE * CODE_SPACE;

/// Generate a 6-digit verification code from the OS CSPRNG.
///
/// Three random bytes are read as a big-endian integer and reduced modulo
/// one million, redrawing whenever the value falls in the biased tail.
pub fn generate_verification_code() -> String {
    generate_code_with(&mut OsRng)
}

pub(crate) fn generate_code_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 3];
    loop {
        rng.fill_bytes(&mut bytes);
        let value = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
        if value < REJECTION_BOUND {
            return format!("{:0width$}", value % CODE_SPACE, width = CODE_LENGTH);
        }
    }
}

/// Compare a stored code with a submitted one in constant time
pub fn codes_match(stored: &str, provided: &str) -> bool {
    if stored.len() != provided.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), provided.as_bytes())
}
