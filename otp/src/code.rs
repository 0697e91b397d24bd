//! 6-digit code generation.
//!
//! Codes are drawn uniformly from `000000..=999999`, all 10^6 values
//! equally likely, and carried as strings so leading zeros survive.

use rand::Rng;

/// Source of OTP codes. Pluggable so tests can inject deterministic codes.
pub trait CodeGenerator: Send + Sync {
    /// Produce a 6-digit, zero-padded numeric code.
    fn six_digit(&self) -> String;
}

/// The production generator, backed by the thread-local CSPRNG.
#[derive(Default)]
pub struct RandomCodes;

impl RandomCodes {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodes {
    fn six_digit(&self) -> String {
        let n: u32 = rand::thread_rng().gen_range(0..=999_999);
        format!("{n:06}")
    }
}
