//! Unit tests for verification code generation

use std::collections::{HashSet, VecDeque};

use rand::RngCore;

use crate::domain::entities::verification_code::{
    codes_match, generate_code_with, generate_verification_code, CODE_LENGTH,
};

fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Replays fixed 3-byte draws
struct ScriptedRng {
    draws: VecDeque<[u8; 3]>,
}

impl ScriptedRng {
    fn new(draws: &[[u8; 3]]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!("only fill_bytes is used")
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!("only fill_bytes is used")
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let draw = self.draws.pop_front().expect("scripted draws exhausted");
        dest.copy_from_slice(&draw);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn test_generate_code_format() {
    for _ in 0..500 {
        let code = generate_verification_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(is_well_formed_code(&code), "bad code: {}", code);

        let num: u32 = code.parse().expect("Generated code should be a valid number");
        assert!(num < 1_000_000);
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: HashSet<String> = (0..100).map(|_| generate_verification_code()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_biased_tail_is_redrawn() {
    // 0xFFFFFF is above the rejection bound and must be discarded
    let mut rng = ScriptedRng::new(&[[0xFF, 0xFF, 0xFF], [0x00, 0x00, 0x2A]]);
    assert_eq!(generate_code_with(&mut rng), "000042");
}

#[test]
fn test_bound_edges() {
    // 15_999_999 is the last accepted value, 16_000_000 the first rejected one
    let last_accepted = 15_999_999u32.to_be_bytes();
    let first_rejected = 16_000_000u32.to_be_bytes();

    let mut rng = ScriptedRng::new(&[[last_accepted[1], last_accepted[2], last_accepted[3]]]);
    assert_eq!(generate_code_with(&mut rng), "999999");

    let mut rng = ScriptedRng::new(&[
        [first_rejected[1], first_rejected[2], first_rejected[3]],
        [0x00, 0x00, 0x00],
    ]);
    assert_eq!(generate_code_with(&mut rng), "000000");
}

#[test]
fn test_leading_digit_distribution_is_uniform() {
    const SAMPLES: usize = 20_000;
    let mut buckets = [0usize; 10];
    for _ in 0..SAMPLES {
        let code = generate_verification_code();
        let digit = (code.as_bytes()[0] - b'0') as usize;
        buckets[digit] += 1;
    }

    let expected = SAMPLES as f64 / 10.0;
    let chi_square: f64 = buckets
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // 9 degrees of freedom; 40 is far past the 0.01% critical value
    assert!(chi_square < 40.0, "chi-square too high: {} ({:?})", chi_square, buckets);
}

#[test]
fn test_codes_match() {
    assert!(codes_match("012345", "012345"));
    assert!(!codes_match("012345", "012346"));
    assert!(!codes_match("012345", "12345"));
    assert!(!codes_match("012345", ""));
}
